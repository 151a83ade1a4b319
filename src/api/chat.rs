use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde_json::Value;

use crate::chat::ChatService;
use crate::database::models::NewChatMessage;

use super::{error_response, AppState};

pub async fn send_message(
    State(state): State<AppState>,
    Json(payload): Json<NewChatMessage>,
) -> (StatusCode, Json<Value>) {
    let service = ChatService::new(state.database.clone());
    match service.send_message(payload).await {
        Ok(message) => (
            StatusCode::CREATED,
            Json(serde_json::json!({ "message": message })),
        ),
        Err(err) => error_response(err),
    }
}

pub async fn mark_read(
    State(state): State<AppState>,
    Path(message_id): Path<i64>,
) -> (StatusCode, Json<Value>) {
    let service = ChatService::new(state.database.clone());
    match service.mark_read(message_id).await {
        Ok(message) => (StatusCode::OK, Json(serde_json::json!({ "message": message }))),
        Err(err) => error_response(err),
    }
}

pub async fn conversation(
    State(state): State<AppState>,
    Path(incident_id): Path<String>,
) -> (StatusCode, Json<Value>) {
    let service = ChatService::new(state.database.clone());
    match service.conversation(&incident_id).await {
        Ok(messages) => (
            StatusCode::OK,
            Json(serde_json::json!({ "messages": messages })),
        ),
        Err(err) => error_response(err),
    }
}
