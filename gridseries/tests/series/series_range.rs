use gridseries::{GridError, GridSeries, Interval, QueryMode, SeriesRequest};

use crate::helpers::{MockConnector, NSW1, as_of, dt, price_row};

fn grid() -> (GridSeries, std::sync::Arc<MockConnector>) {
    let c = MockConnector::builder()
        .returns_market_rows(vec![price_row("2024-06-14T14:30:00+10:00", NSW1, 55.0)])
        .build();
    let grid = GridSeries::builder().with_connector(c.clone()).build().unwrap();
    (grid, c)
}

#[tokio::test]
async fn oversized_lookback_is_clamped_with_warning() {
    let (grid, c) = grid();
    let report = grid
        .series(
            &SeriesRequest::new(QueryMode::Market)
                .interval(Interval::Hour)
                .months(12)
                .as_of(as_of()),
        )
        .await
        .expect("clamping is not an error");

    assert_eq!(report.effective_months, 1);
    assert_eq!(report.date_range.start.to_string(), "2024-05-14");
    assert_eq!(report.date_range.end.to_string(), "2024-06-15");
    assert_eq!(report.warnings.len(), 1);
    assert!(matches!(report.warnings[0], GridError::Other(_)));

    let req = &c.requests().await[0];
    assert_eq!(req.date_start.to_string(), "2024-05-14");
    assert_eq!(
        report.series(NSW1).expect("series")[0].label,
        "14 June 2024, 02:30 pm"
    );
}

#[tokio::test]
async fn five_minute_zero_months_is_an_eight_day_window() {
    let (grid, _) = grid();
    let report = grid
        .series(
            &SeriesRequest::new(QueryMode::Market)
                .interval(Interval::FiveMinutes)
                .months(0)
                .as_of(dt(2024, 6, 15, 12, 0)),
        )
        .await
        .unwrap();
    assert_eq!(report.date_range.start.to_string(), "2024-06-07");
    assert_eq!(report.date_range.end.to_string(), "2024-06-15");
    assert_eq!(report.effective_months, 0);
    assert!(report.warnings.is_empty());
}

#[tokio::test]
async fn defaults_come_from_configuration() {
    let c = MockConnector::builder().returns_market_rows(vec![]).build();
    let grid = GridSeries::builder()
        .with_connector(c.clone())
        .default_interval(Interval::Day)
        .default_months(2)
        .build()
        .unwrap();
    let report = grid
        .series(&SeriesRequest::from_query([("type", "market")]).unwrap().as_of(as_of()))
        .await
        .unwrap();
    assert_eq!(report.interval, Interval::Day);
    assert_eq!(report.effective_months, 2);
    assert_eq!(report.date_range.start.to_string(), "2024-04-15");
}
