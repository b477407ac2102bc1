use gridseries::{FacilityFilter, GridSeries};
use gridseries_demos::common::get_connector;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let grid = GridSeries::builder().with_connector(get_connector()).build()?;

    let filter = FacilityFilter::from_query([
        ("status_id", "operating"),
        ("network_region", "NSW1"),
    ]);
    for f in grid.facilities(&filter).await? {
        println!(
            "{:<8} {:<24} {:<14} {:>7} MW {:?}",
            f.code,
            f.name.as_deref().unwrap_or(""),
            f.fueltech.as_deref().unwrap_or(""),
            f.capacity.unwrap_or_default(),
            f.renewable,
        );
    }
    Ok(())
}
