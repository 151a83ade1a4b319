use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;
use serde_json::Value;

use crate::database::models::NewIncident;
use crate::incidents::{ArchiveService, IncidentService};

use super::{error_response, AppState};

pub async fn report(
    State(state): State<AppState>,
    Json(payload): Json<NewIncident>,
) -> (StatusCode, Json<Value>) {
    let service = IncidentService::new(state.database.clone());
    match service.report(payload).await {
        Ok(incident) => (
            StatusCode::CREATED,
            Json(serde_json::json!({ "incident": incident })),
        ),
        Err(err) => error_response(err),
    }
}

pub async fn get_incident(
    State(state): State<AppState>,
    Path(incident_id): Path<String>,
) -> (StatusCode, Json<Value>) {
    let service = IncidentService::new(state.database.clone());
    match service.get(&incident_id).await {
        Ok(Some(incident)) => (
            StatusCode::OK,
            Json(serde_json::json!({ "incident": incident })),
        ),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": format!("incident {} not found", incident_id) })),
        ),
        Err(err) => error_response(err),
    }
}

pub async fn resolve(
    State(state): State<AppState>,
    Path(incident_id): Path<String>,
) -> (StatusCode, Json<Value>) {
    let service = IncidentService::new(state.database.clone());
    match service.resolve(&incident_id).await {
        Ok(incident) => (
            StatusCode::OK,
            Json(serde_json::json!({ "incident": incident })),
        ),
        Err(err) => error_response(err),
    }
}

#[derive(Deserialize)]
pub struct ArchiveRequest {
    pub archived_by: i64,
}

pub async fn archive(
    State(state): State<AppState>,
    Path(incident_id): Path<String>,
    Json(payload): Json<ArchiveRequest>,
) -> (StatusCode, Json<Value>) {
    let service = ArchiveService::new(state.database.clone());
    match service.archive(&incident_id, payload.archived_by).await {
        Ok(archived) => (
            StatusCode::OK,
            Json(serde_json::json!({ "archived": archived })),
        ),
        Err(err) => error_response(err),
    }
}

pub async fn list_archived(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let service = ArchiveService::new(state.database.clone());
    match service.list().await {
        Ok(archived) => (
            StatusCode::OK,
            Json(serde_json::json!({ "archived": archived })),
        ),
        Err(err) => error_response(err),
    }
}
