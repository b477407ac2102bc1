use gridseries::{GridSeries, Interval, QueryMode, SeriesRequest};
use gridseries_demos::common::{as_of, get_connector};
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Suggested: RUST_LOG=debug,gridseries=trace,gridseries_core=trace
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
        .try_init();

    let grid = GridSeries::builder().with_connector(get_connector()).build()?;

    // Fueltech over a year: spans for the paired fetches, a debug event per dropped row
    let req = SeriesRequest::new(QueryMode::Fueltech).as_of(as_of());
    let _ = grid.series(&req).await?;

    // Hourly over twelve months is clamped to the interval's window
    let req = SeriesRequest::new(QueryMode::Market)
        .interval(Interval::Hour)
        .months(12)
        .as_of(as_of());
    let _ = grid.series(&req).await?;

    Ok(())
}
