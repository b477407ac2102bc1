use std::time::Instant;

use gridseries::{FetchStrategy, GridSeries, QueryMode, SeriesRequest};
use gridseries_demos::common::{as_of, get_connector};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // The mock delays every fetch on the SLOW network
    let req = SeriesRequest::new(QueryMode::Fueltech).as_of(as_of());

    for strategy in [FetchStrategy::Concurrent, FetchStrategy::Sequential] {
        let grid = GridSeries::builder()
            .with_connector(get_connector())
            .network("SLOW")
            .fetch_strategy(strategy)
            .build()?;
        let started = Instant::now();
        let report = grid.series(&req).await?;
        println!(
            "{strategy:?}: {} groups in {:?}",
            report.regions.len(),
            started.elapsed()
        );
    }

    // Upstream failures keep their status; "no data" is a warning
    let failing = GridSeries::builder()
        .with_connector(get_connector())
        .network("FAIL")
        .build()?;
    if let Err(e) = failing.series(&req).await {
        println!("FAIL network -> {} {e}", e.status_code());
    }
    let empty = GridSeries::builder()
        .with_connector(get_connector())
        .network("EMPTY")
        .build()?;
    let report = empty.series(&req).await?;
    println!("EMPTY network -> {} warnings", report.warnings.len());

    println!("Examples ran successfully.");
    Ok(())
}
