use std::sync::Arc;

use gridseries::{GridError, GridSeries, Interval, QueryMode, SeriesRequest};
use gridseries_mock::MockConnector;
use proptest::prelude::*;

use crate::helpers::as_of;

fn any_interval() -> impl Strategy<Value = Interval> {
    prop::sample::select(Interval::ALL.to_vec())
}

fn any_mode() -> impl Strategy<Value = QueryMode> {
    prop::sample::select(vec![
        QueryMode::Market,
        QueryMode::Fueltech,
        QueryMode::DemandSupply,
        QueryMode::Curtailment,
    ])
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 40, .. ProptestConfig::default() })]
    #[test]
    fn served_window_respects_interval_limit(
        interval in any_interval(),
        mode in any_mode(),
        months in 0u32..=48,
    ) {
        let report = tokio_test::block_on(async move {
            let grid = GridSeries::builder()
                .with_connector(Arc::new(MockConnector::new()))
                .build()
                .unwrap();
            grid.series(
                &SeriesRequest::new(mode)
                    .interval(interval)
                    .months(months)
                    .as_of(as_of()),
            )
            .await
        })
        .unwrap();

        let span = (report.date_range.end - report.date_range.start).num_days();
        prop_assert!(span <= i64::from(interval.max_days()));
        prop_assert!(report.effective_months <= months);

        let clamp_warnings = report
            .warnings
            .iter()
            .filter(|w| matches!(w, GridError::Other(_)))
            .count();
        prop_assert!(clamp_warnings <= 1);
        prop_assert_eq!(clamp_warnings == 1, report.effective_months < months);

        let d = &report.diagnostics;
        prop_assert_eq!(d.rows_accepted + d.total_dropped(), d.rows_received);
    }
}
