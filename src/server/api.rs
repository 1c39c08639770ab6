use crate::agent::ChatAgent;
use crate::error::ChatError;
use crate::models::api::{ GenerateRequest, Summary };
use crate::models::chat::Role;
use std::sync::Arc;
use axum::{
    body::Bytes,
    routing::{ get, post },
    Router,
    extract::{ Path, State },
    response::IntoResponse,
    http::{ header, StatusCode },
    Json,
};
use tower_http::cors::{ Any, CorsLayer };
use tower_http::services::ServeDir;
use log::info;

#[derive(Clone)]
struct AppState {
    agent: Arc<ChatAgent>,
}

/// Builds the HTTP surface. A known path with the wrong method is a 404.
/// Unmatched paths fall through to `static_dir` when one is configured and
/// 404 otherwise.
pub fn router(agent: Arc<ChatAgent>, static_dir: Option<&str>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api: Router<AppState> = Router::new()
        .route("/api/generate", post(generate_handler))
        .route("/api/summary/{id}", post(summary_handler))
        .route("/api/{id}", get(history_handler).delete(clear_handler))
        .method_not_allowed_fallback(not_found_handler);

    let app = match static_dir {
        Some(dir) => {
            info!("Serving static files from: {}", dir);
            api.fallback_service(ServeDir::new(dir))
        }
        None => api.fallback(not_found_handler),
    };

    app.layer(cors).with_state(AppState { agent })
}

// The browser UI posts JSON without a content type, so the body is parsed by hand.
fn parse_generate_request(body: &[u8]) -> Result<GenerateRequest, ChatError> {
    let req: GenerateRequest = serde_json
        ::from_slice(body)
        .map_err(|e| ChatError::InvalidRequest(format!("malformed generate request: {}", e)))?;

    if req.id.trim().is_empty() {
        return Err(ChatError::InvalidRequest("conversation id is empty".to_string()));
    }
    if let Some(role) = req.role.as_deref() {
        match role.parse::<Role>() {
            Ok(Role::User) => {}
            Ok(other) => {
                return Err(
                    ChatError::InvalidRequest(format!("role must be User, got {}", other))
                );
            }
            Err(e) => {
                return Err(ChatError::InvalidRequest(e.to_string()));
            }
        }
    }
    Ok(req)
}

async fn generate_handler(
    State(state): State<AppState>,
    body: Bytes
) -> Result<String, ChatError> {
    let req = parse_generate_request(&body)?;
    info!("Generate request for conversation {}", req.id);
    state.agent.generate(&req.id, &req.content).await
}

async fn history_handler(
    State(state): State<AppState>,
    Path(id): Path<String>
) -> Result<impl IntoResponse, ChatError> {
    let history = state.agent.get_history(&id).await?;
    Ok(([(header::CONTENT_TYPE, "application/json")], history))
}

async fn clear_handler(
    State(state): State<AppState>,
    Path(id): Path<String>
) -> Result<StatusCode, ChatError> {
    state.agent.clear(&id).await?;
    Ok(StatusCode::OK)
}

async fn summary_handler(
    State(state): State<AppState>,
    Path(id): Path<String>
) -> Result<Json<Summary>, ChatError> {
    info!("Summary request for conversation {}", id);
    Ok(Json(state.agent.summarize(&id).await?))
}

async fn not_found_handler() -> StatusCode {
    StatusCode::NOT_FOUND
}
