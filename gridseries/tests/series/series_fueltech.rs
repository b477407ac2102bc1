use gridseries::{GridError, GridSeries, PointValues, QueryMode, SeriesRequest};
use gridseries_core::Decimal;

use crate::helpers::{MockConnector, SA1, as_of, fueltech_row, month, price_row};

fn fueltech_rows() -> Vec<gridseries::RawRow> {
    vec![
        fueltech_row(&month(2024, 3), SA1, "wind", 10, 500),
        fueltech_row(&month(2024, 3), SA1, "wind", 20, 400),
        fueltech_row(&month(2024, 3), SA1, "solar_utility", 5, 0),
        fueltech_row(&month(2024, 3), SA1, "coal_black", 100, 9000),
    ]
}

fn values(report: &gridseries::SeriesReport, fueltech: &str) -> PointValues {
    report.regions[SA1]
        .fueltech(fueltech)
        .expect("fueltech series")[0]
        .values
        .clone()
}

#[tokio::test]
async fn weighted_price_against_baseload() {
    let c = MockConnector::builder()
        .returns_network_rows(fueltech_rows())
        .returns_market_rows(vec![price_row(&month(2024, 3), SA1, 60.0)])
        .build();
    let grid = GridSeries::builder().with_connector(c.clone()).build().unwrap();

    let report = grid
        .series(&SeriesRequest::new(QueryMode::Fueltech).as_of(as_of()))
        .await
        .unwrap();

    assert_eq!(
        values(&report, "wind"),
        PointValues::Fueltech {
            price: Decimal::from(30),
            percentage_of_baseload: Some(Decimal::from(50)),
            baseload_price: Some(Decimal::from(60)),
            total_energy: Decimal::from(30),
            total_market_value: Decimal::from(900),
        }
    );
    assert!(report.regions[SA1].fueltech("solar_utility").is_none());
    assert!(report.regions[SA1].fueltech("coal_black").is_none());
    assert_eq!(
        report
            .diagnostics
            .dropped(gridseries::DropReason::InconsistentPair),
        1
    );
    assert_eq!(
        report
            .diagnostics
            .dropped(gridseries::DropReason::UntrackedFueltech),
        1
    );

    let reqs = c.requests().await;
    let network = reqs
        .iter()
        .find(|r| r.secondary_grouping.is_some())
        .expect("network request");
    assert_eq!(
        network.fueltech_filter.as_deref(),
        Some(&["solar_utility".to_string(), "wind".to_string()][..])
    );
    assert_eq!(network.metric_names(), vec!["energy", "market_value"]);
}

#[tokio::test]
async fn baseload_failure_degrades_percentage_to_null() {
    let c = MockConnector::builder()
        .returns_network_rows(fueltech_rows())
        .with_market_fn(|_| Err(GridError::provider("mock", Some(500), "upstream down")))
        .build();
    let grid = GridSeries::builder().with_connector(c).build().unwrap();

    let report = grid
        .series(&SeriesRequest::new(QueryMode::Fueltech).as_of(as_of()))
        .await
        .expect("baseload is optional");

    let PointValues::Fueltech {
        price,
        percentage_of_baseload,
        baseload_price,
        ..
    } = values(&report, "wind")
    else {
        panic!("fueltech values expected");
    };
    assert_eq!(price, Decimal::from(30));
    assert_eq!(percentage_of_baseload, None);
    assert_eq!(baseload_price, None);
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].status_code(), 500);
}

#[tokio::test]
async fn non_positive_baseload_gives_null_percentage() {
    let c = MockConnector::builder()
        .returns_network_rows(fueltech_rows())
        .returns_market_rows(vec![price_row(&month(2024, 3), SA1, -12.0)])
        .build();
    let grid = GridSeries::builder().with_connector(c).build().unwrap();

    let report = grid
        .series(&SeriesRequest::new(QueryMode::Fueltech).as_of(as_of()))
        .await
        .unwrap();
    let PointValues::Fueltech {
        percentage_of_baseload,
        baseload_price,
        ..
    } = values(&report, "wind")
    else {
        panic!("fueltech values expected");
    };
    assert_eq!(percentage_of_baseload, None);
    assert_eq!(baseload_price, Some(Decimal::from(-12)));
}

#[tokio::test]
async fn filtered_fetch_falls_back_to_unfiltered() {
    let c = MockConnector::builder()
        .with_network_fn(|req| {
            if req.fueltech_filter.is_some() {
                Err(GridError::provider("mock", Some(400), "fueltech filter not supported"))
            } else {
                Ok(fueltech_rows())
            }
        })
        .returns_market_rows(vec![price_row(&month(2024, 3), SA1, 60.0)])
        .build();
    let grid = GridSeries::builder().with_connector(c.clone()).build().unwrap();

    let report = grid
        .series(&SeriesRequest::new(QueryMode::Fueltech).as_of(as_of()))
        .await
        .expect("fallback succeeds");
    assert!(report.regions[SA1].fueltech("wind").is_some());
    assert!(report.regions[SA1].fueltech("coal_black").is_none());
    assert!(report.warnings.is_empty());

    let network_calls = c
        .requests()
        .await
        .into_iter()
        .filter(|r| r.secondary_grouping.is_some())
        .map(|r| r.fueltech_filter.is_some())
        .collect::<Vec<_>>();
    assert_eq!(network_calls, vec![true, false]);
}

#[tokio::test]
async fn fallback_can_be_disabled() {
    let c = MockConnector::builder()
        .with_network_fn(|req| {
            if req.fueltech_filter.is_some() {
                Err(GridError::provider("mock", Some(400), "fueltech filter not supported"))
            } else {
                Ok(fueltech_rows())
            }
        })
        .returns_market_rows(vec![])
        .build();
    let grid = GridSeries::builder()
        .with_connector(c)
        .fueltech_filter_fallback(false)
        .build()
        .unwrap();

    let err = grid
        .series(&SeriesRequest::new(QueryMode::Fueltech).as_of(as_of()))
        .await
        .expect_err("no fallback");
    assert_eq!(err.status_code(), 400);
}

#[tokio::test]
async fn no_data_is_not_retried_unfiltered() {
    let c = MockConnector::builder()
        .with_network_fn(|_| Err(GridError::not_found("network rows")))
        .returns_market_rows(vec![])
        .build();
    let grid = GridSeries::builder().with_connector(c.clone()).build().unwrap();

    let report = grid
        .series(&SeriesRequest::new(QueryMode::Fueltech).as_of(as_of()))
        .await
        .unwrap();
    assert!(report.is_empty());
    let network_calls = c
        .requests()
        .await
        .iter()
        .filter(|r| r.secondary_grouping.is_some())
        .count();
    assert_eq!(network_calls, 1);
}
