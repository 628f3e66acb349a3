use axum::{
    extract::{
        ws::{Message as WsMessage, WebSocket},
        Path, State, WebSocketUpgrade,
    },
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post, put},
    Router,
};
use futures_util::{SinkExt, StreamExt};
use log::{debug, warn};
use std::sync::Arc;
use tokio::sync::mpsc;

use llmstarter_llm_api::{ClientProvider, LlmApiError};
use llmstarter_types::{model_menu, ModelOption};

use crate::config::SecretStore;
use crate::shell::{InputError, SessionView};
use crate::web::{
    protocol::{
        ChatSubmission, ClientMessage, CredentialUpdate, ParamsUpdate, ServerMessage, SessionId,
        SessionInfo,
    },
    session_manager::{Session, SessionManager},
};

/// Application state shared across routes
#[derive(Clone)]
pub struct AppState {
    pub session_manager: Arc<SessionManager>,
    pub provider: Arc<dyn ClientProvider>,
    pub secrets: Arc<SecretStore>,
}

/// Create router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // API routes
        .route("/api/models", get(list_models))
        .route("/api/sessions", get(list_sessions).post(create_session))
        .route(
            "/api/sessions/:id",
            get(render_session).delete(close_session),
        )
        .route("/api/sessions/:id/credential", put(update_credential))
        .route("/api/sessions/:id/params", put(update_params))
        .route("/api/sessions/:id/messages", post(send_message))
        // WebSocket endpoint
        .route("/ws/:session_id", get(websocket_handler))
        // The page itself
        .route("/", get(serve_index))
        .with_state(state)
}

/// GET /api/models - The model dropdown
async fn list_models() -> Json<Vec<ModelOption>> {
    Json(model_menu())
}

/// GET /api/sessions - List all active sessions
async fn list_sessions(State(state): State<AppState>) -> Json<Vec<SessionInfo>> {
    Json(state.session_manager.list_sessions().await)
}

/// POST /api/sessions - Create a new session
async fn create_session(State(state): State<AppState>) -> (StatusCode, Json<serde_json::Value>) {
    let session = state.session_manager.create_session().await;

    (
        StatusCode::CREATED,
        Json(serde_json::json!({
            "session_id": session.id,
            "created_at": session.created_at.to_rfc3339(),
            "websocket_url": format!("/ws/{}", session.id),
        })),
    )
}

/// GET /api/sessions/:id - Render the session
async fn render_session(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
) -> Result<Json<SessionView>, AppError> {
    let session = find_session(&state, &id).await?;
    Ok(Json(session.render(&state.secrets).await))
}

/// DELETE /api/sessions/:id - End a session
async fn close_session(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
) -> Result<StatusCode, AppError> {
    if state.session_manager.remove_session(&id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Session {} not found", id)))
    }
}

/// PUT /api/sessions/:id/credential
async fn update_credential(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
    Json(payload): Json<CredentialUpdate>,
) -> Result<Json<SessionView>, AppError> {
    let session = find_session(&state, &id).await?;
    Ok(Json(
        session.set_credential(&payload.credential, &state.secrets).await,
    ))
}

/// PUT /api/sessions/:id/params
async fn update_params(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
    Json(payload): Json<ParamsUpdate>,
) -> Result<Json<SessionView>, AppError> {
    let session = find_session(&state, &id).await?;
    let view = session
        .set_params(&payload.model, payload.temperature, &state.secrets)
        .await?;
    Ok(Json(view))
}

/// POST /api/sessions/:id/messages - Run the chat panel
async fn send_message(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
    Json(payload): Json<ChatSubmission>,
) -> Result<Json<SessionView>, AppError> {
    let session = find_session(&state, &id).await?;
    let outcome = session
        .send_message(&payload.content, state.provider.as_ref(), &state.secrets)
        .await;

    match outcome.error {
        Some(err) => Err(AppError::Completion(err)),
        None => Ok(Json(outcome.view)),
    }
}

async fn find_session(state: &AppState, id: &SessionId) -> Result<Arc<Session>, AppError> {
    state
        .session_manager
        .get_session(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session {} not found", id)))
}

/// GET /ws/:session_id - WebSocket endpoint
async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    Path(session_id): Path<SessionId>,
) -> Result<Response, AppError> {
    let session = find_session(&state, &session_id).await?;
    Ok(ws.on_upgrade(move |socket| handle_websocket(socket, state, session)))
}

/// Handle WebSocket connection
async fn handle_websocket(socket: WebSocket, state: AppState, session: Arc<Session>) {
    session.attach();
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerMessage>();
    let (mut ws_sink, mut ws_stream) = socket.split();

    // Forward queued messages so `Thinking` goes out while the request runs
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            match serde_json::to_string(&msg) {
                Ok(json) => {
                    if ws_sink.send(WsMessage::Text(json)).await.is_err() {
                        break;
                    }
                }
                Err(e) => warn!("Failed to serialize server message: {}", e),
            }
        }
    });

    let _ = tx.send(ServerMessage::SessionJoined {
        session_id: session.id,
        created_at: session.created_at.to_rfc3339(),
        view: session.render(&state.secrets).await,
    });

    while let Some(Ok(msg)) = ws_stream.next().await {
        let text = match msg {
            WsMessage::Text(text) => text,
            WsMessage::Close(_) => break,
            _ => continue,
        };

        match serde_json::from_str::<ClientMessage>(&text) {
            Ok(client_msg) => {
                debug!("Session {}: {:?}", session.id, client_msg_kind(&client_msg));
                handle_client_message(client_msg, &session, &state, &tx).await;
            }
            Err(e) => {
                warn!("Session {}: unparseable message: {}", session.id, e);
                let _ = tx.send(ServerMessage::Error {
                    message: format!("Invalid message: {}", e),
                    recoverable: true,
                });
            }
        }
    }

    debug!("Session {}: websocket closed", session.id);
    drop(tx);
    let _ = send_task.await;

    // Browser connection gone; the session and its credential go with it
    if session.detach() {
        state.session_manager.remove_session(&session.id).await;
    }
}

/// Message kind without its payload; keeps credentials out of the log
fn client_msg_kind(msg: &ClientMessage) -> &'static str {
    match msg {
        ClientMessage::SetCredential { .. } => "SetCredential",
        ClientMessage::SetParams { .. } => "SetParams",
        ClientMessage::SendMessage { .. } => "SendMessage",
        ClientMessage::Render => "Render",
    }
}

/// Handle a message from the client
async fn handle_client_message(
    message: ClientMessage,
    session: &Arc<Session>,
    state: &AppState,
    tx: &mpsc::UnboundedSender<ServerMessage>,
) {
    use ClientMessage::*;

    match message {
        SetCredential { credential } => {
            let view = session.set_credential(&credential, &state.secrets).await;
            let _ = tx.send(ServerMessage::Rendered { view });
        }
        SetParams { model, temperature } => {
            match session.set_params(&model, temperature, &state.secrets).await {
                Ok(view) => {
                    let _ = tx.send(ServerMessage::Rendered { view });
                }
                Err(e) => {
                    let _ = tx.send(ServerMessage::Error {
                        message: e.to_string(),
                        recoverable: true,
                    });
                }
            }
        }
        SendMessage { content } => {
            if !content.is_empty() {
                let _ = tx.send(ServerMessage::Thinking {
                    message: format!("{} is thinking…", session.current_model_label().await),
                });
            }

            let outcome = session
                .send_message(&content, state.provider.as_ref(), &state.secrets)
                .await;

            if let Some(err) = outcome.error {
                let _ = tx.send(ServerMessage::Error {
                    message: err.to_string(),
                    recoverable: true,
                });
            }
            let _ = tx.send(ServerMessage::Rendered { view: outcome.view });
        }
        Render => {
            let view = session.render(&state.secrets).await;
            let _ = tx.send(ServerMessage::Rendered { view });
        }
    }
}

/// GET / - Serve the page
async fn serve_index() -> Html<&'static str> {
    Html(include_str!("../../web/index.html"))
}

/// Error handling
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    Input(InputError),
    Completion(LlmApiError),
}

impl From<InputError> for AppError {
    fn from(err: InputError) -> Self {
        AppError::Input(err)
    }
}

impl From<LlmApiError> for AppError {
    fn from(err: LlmApiError) -> Self {
        AppError::Completion(err)
    }
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Input(_) => StatusCode::BAD_REQUEST,
            AppError::Completion(LlmApiError::MissingCredential) => StatusCode::UNAUTHORIZED,
            AppError::Completion(LlmApiError::ProviderNotWired { .. }) => StatusCode::NOT_IMPLEMENTED,
            AppError::Completion(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            AppError::NotFound(msg) => msg,
            AppError::Input(err) => err.to_string(),
            AppError::Completion(err) => err.to_string(),
        };

        let body = Json(serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
