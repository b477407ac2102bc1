use gridseries_core::{Capability, Facility, FacilityFilter, GridError, roll_up_facilities};

use crate::GridSeries;
use crate::core::tag_err;

impl GridSeries {
    /// List facilities matching `filter`, rolled up from unit-level catalog rows.
    ///
    /// Behavior:
    /// - Routed to the first connector advertising the facility catalog role.
    /// - One row per unit collapses to one facility per code with summed
    ///   capacity; the result is sorted by code.
    /// - "No data" yields an empty list.
    ///
    /// # Errors
    /// `Unsupported` when no connector serves the catalog, or the tagged provider
    /// error when the listing fails.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "gridseries::router::facilities",
            skip(self, filter),
            fields(fueltechs = filter.fueltechs.len(), region = ?filter.network_region),
        )
    )]
    pub async fn facilities(&self, filter: &FacilityFilter) -> Result<Vec<Facility>, GridError> {
        let connector = self.connector_for(Capability::FacilityCatalog)?;
        let Some(catalog) = connector.as_catalog_provider() else {
            return Err(GridError::unsupported(Capability::FacilityCatalog.as_str()));
        };
        match catalog.facilities(filter).await {
            Ok(rows) => Ok(roll_up_facilities(&rows)),
            Err(e) if e.is_no_data() => Ok(Vec::new()),
            Err(e) => Err(tag_err(connector.name(), e)),
        }
    }
}
