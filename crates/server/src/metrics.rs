//! Prometheus metrics
//!
//! The recorder is process-global, so it is installed at most once and the
//! render handle is shared by every router built afterwards.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

use plan_assistant_core::UiHint;

static HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

pub const TURNS_TOTAL: &str = "plan_assistant_turns_total";
pub const SESSIONS_CREATED_TOTAL: &str = "plan_assistant_sessions_created_total";

/// Install the Prometheus recorder, or return the one already installed
pub fn init_metrics() -> Option<PrometheusHandle> {
    match HANDLE.get_or_try_init(|| PrometheusBuilder::new().install_recorder()) {
        Ok(handle) => Some(handle.clone()),
        Err(e) => {
            tracing::warn!(error = %e, "Prometheus recorder not installed");
            None
        },
    }
}

/// Count one processed turn by the hint it produced
pub fn record_turn(hint: UiHint) {
    metrics::counter!(TURNS_TOTAL, "ui_hint" => hint.as_str()).increment(1);
}

pub fn record_session_created() {
    metrics::counter!(SESSIONS_CREATED_TOTAL).increment(1);
}
