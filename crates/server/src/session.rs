//! Session Management
//!
//! One conversation per session. Each session owns its own
//! `DialogueController` behind a mutex, so turns against the same
//! conversation are applied one at a time while different conversations
//! proceed independently.

use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::watch;

use plan_assistant_agent::{DialogueController, DialogueState, Phase};
use plan_assistant_config::ServerConfig;
use plan_assistant_core::{Response, TaskType};

use crate::ServerError;

/// Session state
pub struct Session {
    pub id: String,
    pub created_at: DateTime<Utc>,
    controller: Mutex<DialogueController>,
    last_activity: RwLock<Instant>,
    turn_count: AtomicUsize,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("created_at", &self.created_at)
            .finish_non_exhaustive()
    }
}

/// Listing entry for a session
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub session_id: String,
    pub created_at: DateTime<Utc>,
    pub phase: Phase,
    pub active_task: Option<TaskType>,
    pub turn_count: usize,
}

impl Session {
    pub fn new(id: impl Into<String>, controller: DialogueController) -> Self {
        Self {
            id: id.into(),
            created_at: Utc::now(),
            controller: Mutex::new(controller),
            last_activity: RwLock::new(Instant::now()),
            turn_count: AtomicUsize::new(0),
        }
    }

    /// Apply one user utterance
    pub fn handle_turn(&self, text: &str) -> Response {
        self.touch();
        self.turn_count.fetch_add(1, Ordering::Relaxed);
        self.controller.lock().handle_user_input(text)
    }

    pub fn greeting(&self) -> Response {
        self.controller.lock().greeting()
    }

    pub fn cancel(&self) -> Response {
        self.touch();
        self.controller.lock().cancel()
    }

    pub fn go_back(&self) -> Response {
        self.touch();
        self.controller.lock().go_back()
    }

    pub fn reset(&self) {
        self.touch();
        self.controller.lock().reset();
    }

    /// Copy of the current dialogue state
    pub fn snapshot(&self) -> DialogueState {
        self.controller.lock().state().clone()
    }

    pub fn summary(&self) -> SessionSummary {
        let state = self.snapshot();
        SessionSummary {
            session_id: self.id.clone(),
            created_at: self.created_at,
            phase: state.phase,
            active_task: state.active_task,
            turn_count: self.turn_count(),
        }
    }

    pub fn turn_count(&self) -> usize {
        self.turn_count.load(Ordering::Relaxed)
    }

    /// Update last activity
    pub fn touch(&self) {
        *self.last_activity.write() = Instant::now();
    }

    pub fn is_expired(&self, timeout: Duration) -> bool {
        self.last_activity.read().elapsed() > timeout
    }
}

/// Session manager
pub struct SessionManager {
    sessions: RwLock<HashMap<String, Arc<Session>>>,
    max_sessions: usize,
    session_timeout: Duration,
    cleanup_interval: Duration,
}

impl SessionManager {
    pub fn new(max_sessions: usize, session_timeout: Duration, cleanup_interval: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            max_sessions,
            session_timeout,
            cleanup_interval,
        }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(
            config.max_sessions,
            Duration::from_secs(config.session_timeout_secs),
            Duration::from_secs(config.cleanup_interval_secs),
        )
    }

    /// Start a background task that periodically drops expired sessions
    ///
    /// Send `true` on the returned channel to stop it.
    pub fn start_cleanup_task(self: &Arc<Self>) -> watch::Sender<bool> {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let manager = Arc::clone(self);
        let interval = manager.cleanup_interval;

        tokio::spawn(async move {
            let mut interval_timer = tokio::time::interval(interval);
            interval_timer.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = interval_timer.tick() => {
                        let removed = manager.cleanup_expired();
                        if removed > 0 {
                            tracing::info!(
                                removed,
                                remaining = manager.count(),
                                "Session cleanup"
                            );
                        }
                    }
                    _ = shutdown_rx.changed() => {
                        if *shutdown_rx.borrow() {
                            tracing::info!("Session cleanup task shutting down");
                            break;
                        }
                    }
                }
            }
        });

        shutdown_tx
    }

    /// Register a new session around an already built controller
    pub fn create(&self, controller: DialogueController) -> Result<Arc<Session>, ServerError> {
        let mut sessions = self.sessions.write();

        if sessions.len() >= self.max_sessions {
            self.cleanup_expired_internal(&mut sessions);

            if sessions.len() >= self.max_sessions {
                tracing::warn!(max_sessions = self.max_sessions, "Session capacity reached");
                return Err(ServerError::Capacity(self.max_sessions));
            }
        }

        let id = uuid::Uuid::new_v4().to_string();
        let session = Arc::new(Session::new(&id, controller));
        sessions.insert(id.clone(), session.clone());

        tracing::info!(session_id = %id, active = sessions.len(), "Created session");
        Ok(session)
    }

    pub fn get(&self, id: &str) -> Option<Arc<Session>> {
        self.sessions.read().get(id).cloned()
    }

    /// Look up a session, failing with `SessionNotFound`
    pub fn require(&self, id: &str) -> Result<Arc<Session>, ServerError> {
        self.get(id)
            .ok_or_else(|| ServerError::SessionNotFound(id.to_string()))
    }

    /// Remove a session; returns whether it existed
    pub fn remove(&self, id: &str) -> bool {
        let removed = self.sessions.write().remove(id).is_some();
        if removed {
            tracing::info!(session_id = %id, "Removed session");
        }
        removed
    }

    pub fn count(&self) -> usize {
        self.sessions.read().len()
    }

    /// Drop expired sessions; returns how many went
    pub fn cleanup_expired(&self) -> usize {
        let mut sessions = self.sessions.write();
        self.cleanup_expired_internal(&mut sessions)
    }

    fn cleanup_expired_internal(&self, sessions: &mut HashMap<String, Arc<Session>>) -> usize {
        let timeout = self.session_timeout;
        let before = sessions.len();
        sessions.retain(|id, session| {
            let expired = session.is_expired(timeout);
            if expired {
                tracing::debug!(session_id = %id, "Expired session");
            }
            !expired
        });
        before - sessions.len()
    }

    pub fn list(&self) -> Vec<SessionSummary> {
        self.sessions
            .read()
            .values()
            .map(|session| session.summary())
            .collect()
    }
}
