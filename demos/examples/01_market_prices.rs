use gridseries::{GridSeries, PointValues, QueryMode, SeriesRequest};
use gridseries_demos::common::{as_of, get_connector, print_summary};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let grid = GridSeries::builder().with_connector(get_connector()).build()?;

    let req = SeriesRequest::new(QueryMode::Market).months(6).as_of(as_of());
    let report = grid.series(&req).await?;
    print_summary(&report);

    for point in report.series("NSW1").unwrap_or_default() {
        if let PointValues::Market { price } = &point.values {
            let price = price.map_or_else(|| "-".to_string(), |p| p.round_dp(2).to_string());
            println!("  {:>10}  {price:>8} $/MWh", point.label);
        }
    }

    // The JSON envelope as a web handler would return it
    let json = serde_json::to_string_pretty(&report)?;
    println!("{}", json.lines().take(20).collect::<Vec<_>>().join("\n"));
    Ok(())
}
