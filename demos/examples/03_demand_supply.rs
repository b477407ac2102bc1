use gridseries::{GridSeries, PointValues, QueryMode, SeriesRequest};
use gridseries_demos::common::{as_of, get_connector, print_summary};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let grid = GridSeries::builder().with_connector(get_connector()).build()?;

    let req = SeriesRequest::new(QueryMode::DemandSupply)
        .months(3)
        .as_of(as_of());
    let report = grid.series(&req).await?;
    print_summary(&report);
    println!("  groups: {:?}", report.fueltech_groups.as_deref().unwrap_or_default());

    for point in report.series("TAS1").unwrap_or_default() {
        if let PointValues::DemandSupply { demand, supply, .. } = &point.values {
            let supplied: Vec<String> = supply.iter().map(|(g, e)| format!("{g}={e}")).collect();
            println!("  {:>10}  demand={demand:?}  {}", point.label, supplied.join(" "));
        }
    }
    Ok(())
}
