use gridseries_core::connector::GridConnector;
use gridseries_core::{Capability, GridError, ProviderRequest, RawRow};

/// Dispatch a fetch to the role trait serving `capability`.
///
/// Returns `Unsupported` when the connector does not advertise that role.
pub async fn fetch_rows(
    connector: &dyn GridConnector,
    capability: Capability,
    req: &ProviderRequest,
) -> Result<Vec<RawRow>, GridError> {
    let unsupported = || GridError::unsupported(capability.as_str());
    match capability {
        Capability::MarketData => match connector.as_market_provider() {
            Some(p) => p.market(req).await,
            None => Err(unsupported()),
        },
        Capability::NetworkData => match connector.as_network_provider() {
            Some(p) => p.network_data(req).await,
            None => Err(unsupported()),
        },
        Capability::FacilityData => match connector.as_facility_provider() {
            Some(p) => p.facility_data(req).await,
            None => Err(unsupported()),
        },
        _ => Err(unsupported()),
    }
}

/// Collapse a fetch failure into the request outcome for a soft-failing role.
///
/// Rules:
/// - "No data" (including aggregates made only of "no data") → warning, no rows.
/// - `tolerate_any` → any other failure also becomes a warning with no rows.
/// - Otherwise the failure is returned.
pub fn soften(
    err: GridError,
    tolerate_any: bool,
    warnings: &mut Vec<GridError>,
) -> Result<Vec<RawRow>, GridError> {
    if err.is_no_data() || tolerate_any {
        warnings.push(err);
        Ok(Vec::new())
    } else {
        Err(err)
    }
}
