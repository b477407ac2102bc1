use gridseries::{FetchStrategy, GridError, GridSeries, QueryMode, SeriesRequest};
use tokio::time::Duration;

use crate::helpers::{MockConnector, NSW1, as_of, demand_row, month, supply_row};

fn connector() -> std::sync::Arc<MockConnector> {
    MockConnector::builder()
        .delay(Duration::from_millis(50))
        .returns_market_rows(vec![demand_row(&month(2024, 1), NSW1, 8000)])
        .returns_network_rows(vec![supply_row(&month(2024, 1), NSW1, "coal", 10)])
        .build()
}

#[tokio::test(start_paused = true)]
async fn concurrent_strategy_overlaps_paired_fetches() {
    let c = connector();
    let grid = GridSeries::builder().with_connector(c.clone()).build().unwrap();
    grid.series(&SeriesRequest::new(QueryMode::DemandSupply).as_of(as_of()))
        .await
        .unwrap();

    let log = c.log().await;
    assert_eq!(&log[..2], &["market:start", "network:start"]);
}

#[tokio::test(start_paused = true)]
async fn sequential_strategy_fetches_one_after_another() {
    let c = connector();
    let grid = GridSeries::builder()
        .with_connector(c.clone())
        .fetch_strategy(FetchStrategy::Sequential)
        .build()
        .unwrap();
    let report = grid
        .series(&SeriesRequest::new(QueryMode::DemandSupply).as_of(as_of()))
        .await
        .unwrap();

    assert_eq!(
        c.log().await,
        vec!["market:start", "market:end", "network:start", "network:end"]
    );
    assert_eq!(report.series(NSW1).map(<[_]>::len), Some(1));
}

#[tokio::test]
async fn sequential_strategy_skips_companion_after_hard_failure() {
    let c = MockConnector::builder()
        .with_market_fn(|_| Err(GridError::provider("oe", Some(502), "bad gateway")))
        .returns_network_rows(vec![supply_row(&month(2024, 1), NSW1, "coal", 10)])
        .build();
    let grid = GridSeries::builder()
        .with_connector(c.clone())
        .fetch_strategy(FetchStrategy::Sequential)
        .build()
        .unwrap();
    let err = grid
        .series(&SeriesRequest::new(QueryMode::DemandSupply).as_of(as_of()))
        .await
        .expect_err("demand fetch failed");

    assert_eq!(err.status_code(), 502);
    assert_eq!(c.log().await, vec!["market:start", "market:end"]);
}

#[tokio::test]
async fn sequential_strategy_still_fetches_companion_after_no_data() {
    let c = MockConnector::builder()
        .with_market_fn(|_| Err(GridError::not_found("demand")))
        .returns_network_rows(vec![supply_row(&month(2024, 1), NSW1, "coal", 10)])
        .build();
    let grid = GridSeries::builder()
        .with_connector(c.clone())
        .fetch_strategy(FetchStrategy::Sequential)
        .build()
        .unwrap();
    let report = grid
        .series(&SeriesRequest::new(QueryMode::DemandSupply).as_of(as_of()))
        .await
        .unwrap();

    assert!(report.regions.is_empty());
    assert_eq!(
        c.log().await,
        vec!["market:start", "market:end", "network:start", "network:end"]
    );
}

#[test]
fn strategies_agree_on_output() {
    let run = |strategy| {
        tokio_test::block_on(async move {
            let grid = GridSeries::builder()
                .with_connector(
                    MockConnector::builder()
                        .returns_market_rows(vec![demand_row(&month(2024, 1), NSW1, 8000)])
                        .returns_network_rows(vec![supply_row(&month(2024, 1), NSW1, "coal", 10)])
                        .build(),
                )
                .fetch_strategy(strategy)
                .build()
                .unwrap();
            grid.series(&SeriesRequest::new(QueryMode::DemandSupply).as_of(as_of()))
                .await
                .unwrap()
        })
    };
    assert_eq!(run(FetchStrategy::Concurrent), run(FetchStrategy::Sequential));
}
