//! Application State
//!
//! Shared state across all handlers.

use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;

use plan_assistant_agent::DialogueController;
use plan_assistant_config::Settings;

use crate::session::{Session, SessionManager};
use crate::ServerError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Settings>,
    pub sessions: Arc<SessionManager>,
    metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(config: Settings) -> Self {
        Self {
            sessions: Arc::new(SessionManager::from_config(&config.server)),
            config: Arc::new(config),
            metrics: None,
        }
    }

    /// Expose `/metrics` through this handle
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    pub fn metrics_handle(&self) -> Option<&PrometheusHandle> {
        self.metrics.as_ref()
    }

    /// Build a fresh controller from settings and register it as a new session
    pub fn create_session(&self) -> Result<Arc<Session>, ServerError> {
        let controller =
            DialogueController::from_config(&self.config.dialogue, &self.config.account);
        let session = self.sessions.create(controller)?;
        crate::metrics::record_session_created();
        Ok(session)
    }
}
