use gridseries::{GridError, GridSeries, QueryMode, SeriesRequest};

use crate::helpers::{MockConnector, as_of};

#[tokio::test]
async fn provider_status_propagates() {
    let c = MockConnector::builder()
        .name("oe")
        .with_market_fn(|_| Err(GridError::provider("oe", Some(403), "invalid API key")))
        .build();
    let grid = GridSeries::builder().with_connector(c).build().unwrap();

    let err = grid
        .series(&SeriesRequest::new(QueryMode::Market).as_of(as_of()))
        .await
        .expect_err("auth failure");
    assert_eq!(err.status_code(), 403);
    assert_eq!(err.to_string(), "oe failed (403): invalid API key");
}

#[tokio::test]
async fn untyped_failures_are_attributed_to_the_connector() {
    let c = MockConnector::builder()
        .name("oe")
        .with_market_fn(|_| Err(GridError::Data("expected an array".into())))
        .build();
    let grid = GridSeries::builder().with_connector(c).build().unwrap();

    let err = grid
        .series(&SeriesRequest::new(QueryMode::Market).as_of(as_of()))
        .await
        .expect_err("bad payload");
    match err {
        GridError::Provider { connector, status, .. } => {
            assert_eq!(connector, "oe");
            assert_eq!(status, None);
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn generator_without_codes_is_rejected_before_fetching() {
    let c = MockConnector::builder()
        .with_facility_fn(|_| Ok(vec![]))
        .build();
    let grid = GridSeries::builder().with_connector(c.clone()).build().unwrap();

    let err = grid
        .series(&SeriesRequest::new(QueryMode::Generator).as_of(as_of()))
        .await
        .expect_err("codes required");
    assert_eq!(err.status_code(), 400);
    assert!(c.log().await.is_empty());
}

#[tokio::test]
async fn missing_role_is_unsupported() {
    let c = MockConnector::builder().returns_market_rows(vec![]).build();
    let grid = GridSeries::builder().with_connector(c).build().unwrap();

    let err = grid
        .series(&SeriesRequest::new(QueryMode::Fueltech).as_of(as_of()))
        .await
        .expect_err("no network provider");
    assert_eq!(err, GridError::unsupported("network-data"));
    assert_eq!(err.status_code(), 501);
}

#[tokio::test]
async fn first_connector_with_the_role_wins() {
    let market_only = MockConnector::builder()
        .name("a")
        .with_market_fn(|_| Err(GridError::provider("a", Some(500), "boom")))
        .build();
    let other = MockConnector::builder()
        .name("b")
        .returns_market_rows(vec![])
        .build();
    let grid = GridSeries::builder()
        .with_connector(market_only.clone())
        .with_connector(other.clone())
        .build()
        .unwrap();

    let err = grid
        .series(&SeriesRequest::new(QueryMode::Market).as_of(as_of()))
        .await
        .expect_err("first connector fails");
    assert_eq!(err.status_code(), 500);
    assert!(other.log().await.is_empty());
}

#[tokio::test]
async fn connector_aggregates_soften_only_when_all_members_are_no_data() {
    let grid = |err: fn() -> GridError| {
        let c = MockConnector::builder().with_market_fn(move |_| Err(err())).build();
        GridSeries::builder().with_connector(c).build().unwrap()
    };

    let report = grid(|| {
        GridError::AllProvidersFailed(vec![
            GridError::not_found("price v4"),
            GridError::not_found("price v3"),
        ])
    })
    .series(&SeriesRequest::new(QueryMode::Market).as_of(as_of()))
    .await
    .expect("no data is a warning");
    assert!(report.regions.is_empty());
    assert_eq!(report.warnings.len(), 1);

    let err = grid(|| {
        GridError::AllProvidersFailed(vec![
            GridError::not_found("price v4"),
            GridError::provider("oe", Some(502), "bad gateway"),
        ])
    })
    .series(&SeriesRequest::new(QueryMode::Market).as_of(as_of()))
    .await
    .expect_err("hard member fails the request");
    assert_eq!(err.status_code(), 502);
}
