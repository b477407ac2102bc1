use gridseries::{GridSeries, Interval, PointValues, SeriesRequest};
use gridseries_demos::common::{as_of, get_connector, print_summary};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let grid = GridSeries::builder().with_connector(get_connector()).build()?;

    // Same parameters a web handler would receive
    let req = SeriesRequest::from_query([
        ("type", "generator"),
        ("interval", "1d"),
        ("months", "1"),
        ("facility_codes", "BANGOWF,ERARING,NOPE"),
    ])?
    .as_of(as_of());
    assert_eq!(req.interval, Some(Interval::Day));

    let report = grid.series(&req).await?;
    print_summary(&report);

    for (code, series) in &report.regions {
        let Some(points) = series.as_flat() else { continue };
        let Some(last) = points.last() else { continue };
        if let PointValues::Generator {
            energy,
            region,
            unit_count,
            ..
        } = &last.values
        {
            println!(
                "  {code}: {} units in {}, {} MWh on {}",
                unit_count,
                region.as_deref().unwrap_or("?"),
                energy.map(|e| e.round_dp(1)).unwrap_or_default(),
                last.label
            );
        }
    }

    // Generator requests without facility codes are rejected before any fetch
    let err = grid
        .series(&SeriesRequest::from_query([("type", "generator")])?)
        .await
        .err();
    if let Some(e) = err {
        println!("  rejected ({}): {e}", e.status_code());
    }
    Ok(())
}
