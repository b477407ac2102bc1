use chrono::Utc;
use gridseries_core::{
    DateRange, FetchPlan, FetchRole, FetchedRows, GridError, Interval, ModeStrategy,
    ProviderRequest, QueryMode, RawRow, ResolvedRange, SeriesPipeline, SeriesReport,
    resolve_range,
};
use gridseries_types::FetchStrategy;

use crate::GridSeries;
use crate::SeriesRequest;
use crate::core::tag_err;
use crate::router::util::{fetch_rows, soften};

impl GridSeries {
    /// Fetch, aggregate and present one time series.
    ///
    /// Behavior:
    /// - Validates the request before any fetch; a generator request without
    ///   facility codes is `InvalidArg`.
    /// - Resolves the lookback against the interval's maximum span; a clamped
    ///   window is served and reported as a warning.
    /// - Issues the mode's primary fetch and, for fueltech and demand/supply, its
    ///   companion fetch, concurrently or sequentially per `FetchStrategy`. When
    ///   sequential, a hard primary failure returns before the companion fetch.
    /// - "No data" from any fetch is a warning on an otherwise successful report.
    ///   A failed baseload fetch also degrades to a warning (percentages become
    ///   null); other failures are returned with the provider's status.
    ///
    /// # Errors
    /// `InvalidArg` for invalid requests, `Unsupported` when no connector serves a
    /// required role, and the tagged provider error for hard upstream failures.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "gridseries::router::series",
            skip(self, req),
            fields(mode = %req.mode, interval = ?req.interval, months = ?req.months),
        )
    )]
    pub async fn series(&self, req: &SeriesRequest) -> Result<SeriesReport, GridError> {
        req.validate()?;
        let strategy = ModeStrategy::for_mode(req.mode);
        let interval = req.interval.unwrap_or(self.cfg.default_interval);
        let months = req.months.unwrap_or(self.cfg.default_months);
        let range = resolve_range(interval, months, req.as_of.unwrap_or_else(Utc::now));
        let dates = range.date_range();

        let mut warnings = Vec::new();
        if range.clamped {
            warnings.push(clamp_warning(interval, &range));
        }

        let primary_req = self.provider_request(&strategy.primary, interval, dates, req);
        let (primary, secondary) = match &strategy.secondary {
            None => (self.fetch_plan(&strategy.primary, &primary_req).await, None),
            Some(plan) => {
                let secondary_req = self.provider_request(plan, interval, dates, req);
                if self.cfg.fetch_strategy == FetchStrategy::Sequential {
                    let p = self.fetch_plan(&strategy.primary, &primary_req).await;
                    // A hard primary failure fails the request; skip the companion.
                    if matches!(&p, Err(e) if !e.is_no_data()) {
                        (p, None)
                    } else {
                        let s = self.fetch_plan(plan, &secondary_req).await;
                        (p, Some((plan, s)))
                    }
                } else {
                    let (p, s) = futures::future::join(
                        self.fetch_plan(&strategy.primary, &primary_req),
                        self.fetch_plan(plan, &secondary_req),
                    )
                    .await;
                    (p, Some((plan, s)))
                }
            }
        };

        let primary = match primary {
            Ok(rows) if rows.is_empty() => {
                warnings.push(GridError::not_found(format!(
                    "{} rows for {} between {} and {}",
                    req.mode, self.cfg.network, dates.start, dates.end
                )));
                rows
            }
            Ok(rows) => rows,
            Err(e) => soften(e, false, &mut warnings)?,
        };

        let secondary = match secondary {
            None => Vec::new(),
            Some((_, Ok(rows))) => rows,
            Some((plan, Err(e))) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    mode = %req.mode,
                    kind = ?plan.kind,
                    error = %e,
                    "companion fetch failed"
                );
                soften(e, plan.role == FetchRole::Optional, &mut warnings)?
            }
        };

        let output = SeriesPipeline::new(req.mode, interval, &self.cfg)
            .run(&FetchedRows { primary, secondary });

        Ok(SeriesReport {
            success: true,
            mode: req.mode,
            interval,
            date_range: dates,
            effective_months: range.effective_months,
            regions: output.regions,
            fueltech_groups: output.fueltech_groups,
            warnings,
            diagnostics: output.diagnostics,
        })
    }

    fn provider_request(
        &self,
        plan: &FetchPlan,
        interval: Interval,
        dates: DateRange,
        req: &SeriesRequest,
    ) -> ProviderRequest {
        let mut out = ProviderRequest::new(&self.cfg.network, interval, dates.start, dates.end)
            .metrics(plan.metrics.iter().copied());
        if let Some(g) = plan.primary_grouping {
            out = out.primary_grouping(g);
        }
        if let Some(g) = plan.secondary_grouping {
            out = out.secondary_grouping(g);
        }
        if plan.filter_fueltechs {
            out = out.fueltech_filter(self.cfg.tracked_fueltechs.clone());
        }
        if req.mode == QueryMode::Generator {
            out = out.facility_codes(req.facility_codes.clone());
        }
        out
    }

    /// Fetch one plan from the first connector advertising its role.
    ///
    /// A filtered fetch that fails with anything but "no data" is retried once
    /// without the filter when `fueltech_filter_fallback` is set; the normalizer
    /// applies the fueltech filter to the unfiltered rows.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "gridseries::router::fetch_plan",
            skip(self, plan, req),
            fields(capability = %plan.capability, kind = ?plan.kind),
        )
    )]
    async fn fetch_plan(
        &self,
        plan: &FetchPlan,
        req: &ProviderRequest,
    ) -> Result<Vec<RawRow>, GridError> {
        let connector = self.connector_for(plan.capability)?;
        let first = fetch_rows(connector.as_ref(), plan.capability, req).await;
        match first {
            Err(e)
                if req.fueltech_filter.is_some()
                    && self.cfg.fueltech_filter_fallback
                    && !e.is_no_data() =>
            {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    connector = connector.name(),
                    error = %e,
                    "filtered fetch failed; retrying without fueltech filter"
                );
                let mut unfiltered = req.clone();
                unfiltered.fueltech_filter = None;
                fetch_rows(connector.as_ref(), plan.capability, &unfiltered)
                    .await
                    .map_err(|e| tag_err(connector.name(), e))
            }
            other => other.map_err(|e| tag_err(connector.name(), e)),
        }
    }
}

fn clamp_warning(interval: Interval, range: &ResolvedRange) -> GridError {
    #[cfg(feature = "tracing")]
    tracing::debug!(
        interval = %interval,
        requested = range.requested_months,
        effective = range.effective_months,
        "lookback clamped"
    );
    GridError::Other(format!(
        "requested {} months exceeds the {} day limit for {interval}; serving {} months",
        range.requested_months,
        interval.max_days(),
        range.effective_months,
    ))
}
