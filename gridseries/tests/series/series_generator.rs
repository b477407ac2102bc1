use gridseries::{GridSeries, PointValues, QueryMode, SeriesRequest};
use gridseries_core::Decimal;

use crate::helpers::{MockConnector, as_of, dt, month, unit_row};

#[tokio::test]
async fn units_roll_up_to_facilities() {
    let c = MockConnector::builder()
        .with_facility_fn(|req| {
            assert_eq!(req.facility_codes, vec!["BANGOWF", "LIMOSF"]);
            Ok(vec![
                unit_row(&month(2024, 3), "BANGOWF1", 3).with("network_region", "nsw1"),
                unit_row(&month(2024, 3), "BANGOWF2", 7).with("power", 40),
                unit_row(&month(2024, 3), "LIMOSF11", 2),
                unit_row(&month(2024, 3), "99", 2),
            ])
        })
        .build();
    let grid = GridSeries::builder().with_connector(c).build().unwrap();

    let req = SeriesRequest::from_query([
        ("type", "generator"),
        ("interval", "1M"),
        ("facility_codes", "BANGOWF,LIMOSF"),
    ])
    .unwrap()
    .as_of(as_of());
    let report = grid.series(&req).await.unwrap();

    let bango = report.series("BANGOWF").expect("facility series");
    assert_eq!(
        bango[0].values,
        PointValues::Generator {
            energy: Some(Decimal::from(10)),
            market_value: None,
            power: Some(Decimal::from(40)),
            emissions: None,
            region: Some("NSW1".to_string()),
            unit_count: 2,
        }
    );
    assert_eq!(report.series("LIMOSF").map(<[_]>::len), Some(1));
    assert_eq!(report.regions.len(), 2);
    assert_eq!(
        report
            .diagnostics
            .dropped(gridseries::DropReason::MissingFacility),
        1
    );
}

#[tokio::test]
async fn daily_generator_labels() {
    let c = MockConnector::builder()
        .with_facility_fn(|_| {
            Ok(vec![
                unit_row("2024-03-16T00:00:00+10:00", "HPRG1", 5),
                unit_row("2024-03-15T00:00:00+10:00", "HPRG1", 4),
            ])
        })
        .build();
    let grid = GridSeries::builder().with_connector(c).build().unwrap();
    let report = grid
        .series(
            &SeriesRequest::new(QueryMode::Generator)
                .interval(gridseries::Interval::Day)
                .months(3)
                .facility_codes(["HPRG"])
                .as_of(dt(2024, 4, 1, 0, 0)),
        )
        .await
        .unwrap();
    let labels: Vec<&str> = report
        .series("HPRG")
        .expect("series")
        .iter()
        .map(|p| p.label.as_str())
        .collect();
    assert_eq!(labels, vec!["15 Mar 2024", "16 Mar 2024"]);
}
