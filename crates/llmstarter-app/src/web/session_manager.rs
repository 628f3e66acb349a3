use chrono::{DateTime, Utc};
use log::{debug, info};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use llmstarter_llm_api::{ClientProvider, LlmApiError};

use crate::chat::ChatPanel;
use crate::config::SecretStore;
use crate::session::SessionState;
use crate::shell::{self, InputError, SessionView};
use crate::web::protocol::{SessionId, SessionInfo};

/// Result of one chat submission: the page as it stands afterwards, plus the
/// failure if the completion did not come back
pub struct ChatOutcome {
    pub view: SessionView,
    pub error: Option<LlmApiError>,
}

/// One browser session.
///
/// All access to the state goes through one mutex, so operations on a
/// session run one at a time even when requests arrive concurrently.
/// The session ends when its last websocket connection closes.
pub struct Session {
    pub id: SessionId,
    state: Mutex<SessionState>,
    pub created_at: DateTime<Utc>,
    last_activity: Mutex<DateTime<Utc>>,
    connections: AtomicUsize,
}

impl Session {
    pub fn new(id: SessionId) -> Self {
        Self {
            id,
            state: Mutex::new(SessionState::new()),
            created_at: Utc::now(),
            last_activity: Mutex::new(Utc::now()),
            connections: AtomicUsize::new(0),
        }
    }

    /// Register an open websocket connection
    pub fn attach(&self) {
        self.connections.fetch_add(1, Ordering::SeqCst);
    }

    /// Drop a websocket connection. Returns true if it was the last one.
    pub fn detach(&self) -> bool {
        self.connections.fetch_sub(1, Ordering::SeqCst) == 1
    }

    pub async fn update_activity(&self) {
        *self.last_activity.lock().await = Utc::now();
    }

    pub async fn render(&self, secrets: &SecretStore) -> SessionView {
        let mut state = self.state.lock().await;
        shell::render(&mut state, secrets)
    }

    pub async fn set_credential(&self, credential: &str, secrets: &SecretStore) -> SessionView {
        let mut state = self.state.lock().await;
        shell::apply_credential(&mut state, credential);
        self.update_activity().await;
        shell::render(&mut state, secrets)
    }

    pub async fn set_params(
        &self,
        model: &str,
        temperature: f64,
        secrets: &SecretStore,
    ) -> Result<SessionView, InputError> {
        let mut state = self.state.lock().await;
        shell::apply_params(&mut state, model, temperature)?;
        self.update_activity().await;
        Ok(shell::render(&mut state, secrets))
    }

    /// Label of the model a submission would use right now
    pub async fn current_model_label(&self) -> String {
        let mut state = self.state.lock().await;
        state.init_defaults();
        state.model().label().to_string()
    }

    /// Run the chat panel and re-render. The lock is held across the remote
    /// call; the render sees the finished mutation.
    pub async fn send_message(
        &self,
        content: &str,
        provider: &dyn ClientProvider,
        secrets: &SecretStore,
    ) -> ChatOutcome {
        let mut state = self.state.lock().await;
        state.init_defaults();

        let error = ChatPanel::new(provider, secrets)
            .submit(&mut state, content)
            .await
            .err();

        self.update_activity().await;
        ChatOutcome {
            view: shell::render(&mut state, secrets),
            error,
        }
    }

    pub async fn get_info(&self) -> SessionInfo {
        let state = self.state.lock().await;
        let last_activity = *self.last_activity.lock().await;

        SessionInfo {
            id: self.id,
            created_at: self.created_at.to_rfc3339(),
            last_activity: last_activity.to_rfc3339(),
            message_count: state.history().len(),
            current_model: state.model().label().to_string(),
        }
    }
}

/// Manages all active sessions
#[derive(Default)]
pub struct SessionManager {
    sessions: RwLock<HashMap<SessionId, Arc<Session>>>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new, empty session
    pub async fn create_session(&self) -> Arc<Session> {
        let session = Arc::new(Session::new(Uuid::new_v4()));
        self.sessions.write().await.insert(session.id, session.clone());
        info!("Session {} created", session.id);
        session
    }

    /// Get a session by ID
    pub async fn get_session(&self, session_id: &SessionId) -> Option<Arc<Session>> {
        self.sessions.read().await.get(session_id).cloned()
    }

    /// List all active sessions, most recent activity first
    pub async fn list_sessions(&self) -> Vec<SessionInfo> {
        let sessions: Vec<Arc<Session>> = self.sessions.read().await.values().cloned().collect();

        let mut infos = Vec::with_capacity(sessions.len());
        for session in sessions {
            infos.push(session.get_info().await);
        }

        infos.sort_by(|a, b| b.last_activity.cmp(&a.last_activity));
        infos
    }

    /// End a session; its state is dropped with it. Returns whether it existed.
    pub async fn remove_session(&self, session_id: &SessionId) -> bool {
        let removed = self.sessions.write().await.remove(session_id).is_some();
        if removed {
            info!("Session {} closed", session_id);
        } else {
            debug!("Session {} already gone", session_id);
        }
        removed
    }
}
