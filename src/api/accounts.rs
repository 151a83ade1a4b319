use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::accounts::AccountService;
use crate::database::models::{EmergencyInfoUpdate, NewAdminAccount, NewStudentAccount};

use super::{error_response, AppState};

pub async fn create_student(
    State(state): State<AppState>,
    Json(payload): Json<NewStudentAccount>,
) -> (StatusCode, Json<Value>) {
    let service = AccountService::new(state.database.clone());
    match service.create_student(payload).await {
        Ok(account) => (
            StatusCode::CREATED,
            Json(serde_json::json!({ "account": account })),
        ),
        Err(err) => error_response(err),
    }
}

pub async fn create_admin(
    State(state): State<AppState>,
    Json(payload): Json<NewAdminAccount>,
) -> (StatusCode, Json<Value>) {
    let service = AccountService::new(state.database.clone());
    match service.create_admin(payload).await {
        Ok(account) => (
            StatusCode::CREATED,
            Json(serde_json::json!({ "account": account })),
        ),
        Err(err) => error_response(err),
    }
}

pub async fn get_student(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> (StatusCode, Json<Value>) {
    let service = AccountService::new(state.database.clone());
    match service.student(user_id).await {
        Ok(Some(account)) => (StatusCode::OK, Json(serde_json::json!({ "account": account }))),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": format!("student account {} not found", user_id) })),
        ),
        Err(err) => error_response(err),
    }
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> (StatusCode, Json<Value>) {
    let service = AccountService::new(state.database.clone());
    match service
        .authenticate_student(&payload.username, &payload.password)
        .await
    {
        Ok(Some(account)) => (StatusCode::OK, Json(serde_json::json!({ "account": account }))),
        Ok(None) => {
            warn!("failed login for {}", payload.username);
            (
                StatusCode::UNAUTHORIZED,
                Json(serde_json::json!({ "error": "invalid username or password" })),
            )
        }
        Err(err) => error_response(err),
    }
}

#[derive(Deserialize)]
pub struct StatusRequest {
    pub active: bool,
}

pub async fn set_status(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(payload): Json<StatusRequest>,
) -> (StatusCode, Json<Value>) {
    let service = AccountService::new(state.database.clone());
    match service.set_student_active(user_id, payload.active).await {
        Ok(account) => (StatusCode::OK, Json(serde_json::json!({ "account": account }))),
        Err(err) => error_response(err),
    }
}

pub async fn update_emergency_info(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(payload): Json<EmergencyInfoUpdate>,
) -> (StatusCode, Json<Value>) {
    let service = AccountService::new(state.database.clone());
    match service.update_emergency_info(user_id, payload).await {
        Ok(account) => (StatusCode::OK, Json(serde_json::json!({ "account": account }))),
        Err(err) => error_response(err),
    }
}
