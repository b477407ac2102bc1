use gridseries::{Decimal, FacilityFilter, GridError, GridSeries, RawRow, Renewable};

use crate::helpers::MockConnector;

fn unit(code: &str, unit: &str, fueltech: &str, capacity: f64) -> RawRow {
    RawRow::new()
        .with("facility_code", code)
        .with("facility_name", format!("{code} facility"))
        .with("facility_region", "NSW1")
        .with("unit_code", unit)
        .with("unit_fueltech", fueltech)
        .with("unit_status", "operating")
        .with("unit_capacity", capacity)
}

#[tokio::test]
async fn catalog_rows_roll_up_by_code() {
    let c = MockConnector::builder()
        .with_catalog_fn(|filter| {
            assert_eq!(filter.fueltechs, vec!["wind", "coal_black"]);
            Ok(vec![
                unit("ERARING", "ER01", "coal_black", 720.0),
                unit("BANGOWF", "BANGOWF1", "wind", 159.0),
                unit("ERARING", "ER02", "coal_black", 720.0),
                RawRow::new().with("unit_code", "ORPHAN1"),
            ])
        })
        .build();
    let grid = GridSeries::builder().with_connector(c).build().unwrap();

    let filter = FacilityFilter::from_query([("fueltech_id", "wind,coal_black")]);
    let facilities = grid.facilities(&filter).await.unwrap();

    assert_eq!(facilities.len(), 2);
    assert_eq!(facilities[0].code, "BANGOWF");
    assert_eq!(facilities[0].renewable, Some(Renewable::Renewable));
    assert_eq!(facilities[0].fueltech_group.as_deref(), Some("wind"));
    assert_eq!(facilities[1].code, "ERARING");
    assert_eq!(facilities[1].capacity, Some(Decimal::from(1440)));
    assert_eq!(facilities[1].renewable, Some(Renewable::NonRenewable));
    assert_eq!(facilities[1].fueltech_group.as_deref(), Some("coal"));
}

#[tokio::test]
async fn catalog_no_data_is_empty() {
    let c = MockConnector::builder()
        .with_catalog_fn(|_| Err(GridError::not_found("facilities")))
        .build();
    let grid = GridSeries::builder().with_connector(c).build().unwrap();
    let facilities = grid.facilities(&FacilityFilter::default()).await.unwrap();
    assert!(facilities.is_empty());
}

#[tokio::test]
async fn catalog_requires_a_provider() {
    let c = MockConnector::builder().returns_market_rows(vec![]).build();
    let grid = GridSeries::builder().with_connector(c).build().unwrap();
    let err = grid
        .facilities(&FacilityFilter::default())
        .await
        .expect_err("no catalog");
    assert_eq!(err, GridError::unsupported("facility-catalog"));
}
