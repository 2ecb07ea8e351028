//! Generic CRUD for every backend collection.

use crate::forms::validate_resource_payload;
use crate::middleware::AccessToken;
use crate::models::resource::is_valid_record_id;
use crate::models::Resource;
use crate::table::{paginate, Page, TableQuery};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use console_core::error::AppError;
use serde_json::Value;

fn parse_resource(segment: &str) -> Result<Resource, AppError> {
    segment
        .parse::<Resource>()
        .map_err(|e| AppError::NotFound(anyhow::anyhow!(e)))
}

fn check_id(id: &str) -> Result<(), AppError> {
    if is_valid_record_id(id) {
        Ok(())
    } else {
        Err(AppError::BadRequest(anyhow::anyhow!("invalid record id: {:?}", id)))
    }
}

pub async fn list(
    State(state): State<AppState>,
    token: AccessToken,
    Path(resource): Path<String>,
    Query(query): Query<TableQuery>,
) -> Result<Json<Page<Value>>, AppError> {
    let resource = parse_resource(&resource)?;
    let rows = state.resources.list(&token, resource).await?;
    Ok(Json(paginate(rows, &query)))
}

pub async fn show(
    State(state): State<AppState>,
    token: AccessToken,
    Path((resource, id)): Path<(String, String)>,
) -> Result<Json<Value>, AppError> {
    let resource = parse_resource(&resource)?;
    check_id(&id)?;
    let record = state.resources.get(&token, resource, &id).await?;
    Ok(Json(record))
}

#[tracing::instrument(skip(state, token, body))]
pub async fn create(
    State(state): State<AppState>,
    token: AccessToken,
    Path(resource): Path<String>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let resource = parse_resource(&resource)?;
    validate_resource_payload(resource, &body)?;

    let created = state.resources.create(&token, resource, &body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[tracing::instrument(skip(state, token, body))]
pub async fn update(
    State(state): State<AppState>,
    token: AccessToken,
    Path((resource, id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, AppError> {
    let resource = parse_resource(&resource)?;
    check_id(&id)?;
    validate_resource_payload(resource, &body)?;

    let updated = state.resources.update(&token, resource, &id, &body).await?;
    Ok(Json(updated))
}

#[tracing::instrument(skip(state, token))]
pub async fn delete(
    State(state): State<AppState>,
    token: AccessToken,
    Path((resource, id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    let resource = parse_resource(&resource)?;
    check_id(&id)?;
    state.resources.delete(&token, resource, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
