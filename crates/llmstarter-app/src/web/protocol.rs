use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shell::SessionView;

/// Session ID type
pub type SessionId = Uuid;

/// Body of `PUT /api/sessions/:id/credential`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialUpdate {
    #[serde(default)]
    pub credential: String,
}

/// Body of `PUT /api/sessions/:id/params`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamsUpdate {
    pub model: String,
    pub temperature: f64,
}

/// Body of `POST /api/sessions/:id/messages`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSubmission {
    pub content: String,
}

/// Messages sent from client to server over the websocket
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ClientMessage {
    SetCredential { credential: String },
    SetParams { model: String, temperature: f64 },
    SendMessage { content: String },
    Render,
}

/// Messages sent from server to client over the websocket
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ServerMessage {
    SessionJoined {
        session_id: SessionId,
        created_at: String,
        view: SessionView,
    },
    /// A completion request is in flight
    Thinking {
        message: String,
    },
    Rendered {
        view: SessionView,
    },
    Error {
        message: String,
        recoverable: bool,
    },
}

/// Session information for listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInfo {
    pub id: SessionId,
    pub created_at: String,
    pub last_activity: String,
    pub message_count: usize,
    pub current_model: String,
}
