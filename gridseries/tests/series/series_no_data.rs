use gridseries::{GridError, GridSeries, QueryMode, SeriesRequest};

use crate::helpers::{MockConnector, as_of};

#[tokio::test]
async fn not_found_is_an_empty_success_with_warning() {
    let c = MockConnector::builder()
        .with_market_fn(|_| Err(GridError::not_found("market rows in range")))
        .build();
    let grid = GridSeries::builder().with_connector(c).build().unwrap();

    let report = grid
        .series(&SeriesRequest::new(QueryMode::Curtailment).as_of(as_of()))
        .await
        .expect("no data is not an error");
    assert!(report.success);
    assert!(report.regions.is_empty());
    assert_eq!(report.warnings, vec![GridError::not_found("market rows in range")]);
    assert_eq!(report.diagnostics.rows_received, 0);
}

#[tokio::test]
async fn empty_rows_are_reported_as_no_data() {
    let c = MockConnector::builder().returns_market_rows(vec![]).build();
    let grid = GridSeries::builder().with_connector(c).build().unwrap();

    let report = grid
        .series(&SeriesRequest::new(QueryMode::Market).as_of(as_of()))
        .await
        .unwrap();
    assert!(report.is_empty());
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].is_no_data());
}

#[tokio::test]
async fn rows_all_dropped_still_succeed() {
    let c = MockConnector::builder()
        .returns_market_rows(vec![gridseries::RawRow::new().with("region", "NSW1").with("price", 10)])
        .build();
    let grid = GridSeries::builder().with_connector(c).build().unwrap();

    let report = grid
        .series(&SeriesRequest::new(QueryMode::Market).as_of(as_of()))
        .await
        .unwrap();
    assert!(report.is_empty());
    assert!(report.warnings.is_empty());
    assert_eq!(
        report.diagnostics.dropped(gridseries::DropReason::MissingTimestamp),
        1
    );
}
