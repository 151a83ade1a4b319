pub mod accounts;
pub mod chat;
pub mod incidents;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post, put};
use axum::Router;
use serde_json::Value;

use crate::config::AppConfig;
use crate::error::{AlertError, GuardError};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub database: crate::database::Database,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/status", get(status))
        .route("/api/accounts/students", post(accounts::create_student))
        .route("/api/accounts/students/:id", get(accounts::get_student))
        .route("/api/accounts/admins", post(accounts::create_admin))
        .route("/api/accounts/students/login", post(accounts::login))
        .route(
            "/api/accounts/students/:id/status",
            post(accounts::set_status),
        )
        .route(
            "/api/accounts/students/:id/emergency-info",
            put(accounts::update_emergency_info),
        )
        .route("/api/incidents", post(incidents::report))
        .route("/api/incidents/archive", get(incidents::list_archived))
        .route("/api/incidents/:id", get(incidents::get_incident))
        .route("/api/incidents/:id/resolve", post(incidents::resolve))
        .route("/api/incidents/:id/archive", post(incidents::archive))
        .route("/api/incidents/:id/messages", get(chat::conversation))
        .route("/api/chat/messages", post(chat::send_message))
        .route("/api/chat/messages/:id/read", post(chat::mark_read))
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "alert-app",
        "timestamp": chrono::Utc::now()
    }))
}

async fn status(State(state): State<AppState>) -> Json<Value> {
    let database = match sqlx::query("SELECT 1").execute(state.database.pool()).await {
        Ok(_) => "healthy",
        Err(_) => "error",
    };

    Json(serde_json::json!({
        "status": "healthy",
        "service": "alert-app",
        "timestamp": chrono::Utc::now(),
        "server_host": state.config.server_host,
        "database": database
    }))
}

/// Map service failures onto HTTP statuses. Guard violations carry their
/// reason string through unchanged; the application layer on the other side
/// turns them into user-facing copy.
pub(crate) fn error_response(err: AlertError) -> (StatusCode, Json<Value>) {
    let status = match &err {
        AlertError::Guard(GuardError::UnknownIncident { .. }) | AlertError::NotFound(_) => {
            StatusCode::NOT_FOUND
        }
        AlertError::Guard(_) => StatusCode::UNPROCESSABLE_ENTITY,
        AlertError::Duplicate(_) => StatusCode::CONFLICT,
        AlertError::Config(_) | AlertError::Database(_) | AlertError::Password(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    (status, Json(serde_json::json!({ "error": err.to_string() })))
}
