use gridseries::{GridSeries, PointValues, QueryMode, SeriesRequest};
use gridseries_demos::common::{as_of, get_connector, print_groups, print_summary};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let grid = GridSeries::builder()
        .with_connector(get_connector())
        .tracked_fueltechs(["solar_utility", "wind"])
        .build()?;

    let report = grid
        .series(&SeriesRequest::new(QueryMode::Fueltech).as_of(as_of()))
        .await?;
    print_summary(&report);
    print_groups(&report);

    let Some(wind) = report.regions.get("SA1").and_then(|g| g.fueltech("wind")) else {
        println!("no SA1 wind series");
        return Ok(());
    };
    for point in wind {
        if let PointValues::Fueltech {
            price,
            percentage_of_baseload,
            ..
        } = &point.values
        {
            let pct = percentage_of_baseload
                .map_or_else(|| "n/a".to_string(), |p| format!("{}%", p.round_dp(1)));
            println!("  {:>10}  {:>8} $/MWh  {pct:>7} of baseload", point.label, price.round_dp(2));
        }
    }
    Ok(())
}
