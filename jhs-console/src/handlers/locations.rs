use crate::location::{
    save_hierarchy, HierarchyDraft, HierarchySaveError, LocationCatalog, LocationLevel,
    LocationSelection, SavedLevel, SelectorView,
};
use crate::middleware::AccessToken;
use crate::models::location::LocationId;
use crate::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use console_core::error::AppError;
use serde::{Deserialize, Serialize};

pub async fn catalog(
    State(state): State<AppState>,
    token: AccessToken,
) -> Result<Json<LocationCatalog>, AppError> {
    let catalog = LocationCatalog::load(&state.resources, &token).await?;
    Ok(Json(catalog))
}

#[derive(Debug, Deserialize)]
pub struct SelectionChange {
    #[serde(default)]
    pub selection: LocationSelection,
    pub level: LocationLevel,
    pub id: Option<LocationId>,
}

/// Applies one dropdown change and returns every level's state after it.
#[tracing::instrument(skip(state, token))]
pub async fn select(
    State(state): State<AppState>,
    token: AccessToken,
    Json(change): Json<SelectionChange>,
) -> Result<Json<SelectorView>, AppError> {
    let catalog = LocationCatalog::load(&state.resources, &token).await?;

    let mut selection = change.selection;
    selection
        .select(&catalog, change.level, change.id)
        .map_err(|e| AppError::BadRequest(anyhow::anyhow!(e)))?;

    Ok(Json(SelectorView::build(&catalog, selection)))
}

fn all_levels() -> Vec<LocationLevel> {
    LocationLevel::ALL.to_vec()
}

#[derive(Debug, Deserialize)]
pub struct SelectionValidation {
    pub selection: LocationSelection,
    #[serde(default = "all_levels")]
    pub required: Vec<LocationLevel>,
}

pub async fn validate_selection(
    Json(body): Json<SelectionValidation>,
) -> Result<StatusCode, AppError> {
    body.selection.validate(&body.required)?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Serialize)]
pub struct HierarchySaved {
    pub saved: Vec<SavedLevel>,
}

#[derive(Debug, Serialize)]
struct HierarchyFailure {
    error: String,
    failed_level: LocationLevel,
    saved: Vec<SavedLevel>,
}

/// Failed saves report what is already stored, since nothing is rolled back.
fn failure_response(err: HierarchySaveError) -> Response {
    let error = err.to_string();
    let HierarchySaveError {
        level,
        saved,
        source,
    } = err;
    let status = AppError::from(source).status_code();

    (
        status,
        Json(HierarchyFailure {
            error,
            failed_level: level,
            saved,
        }),
    )
        .into_response()
}

#[tracing::instrument(skip(state, token, draft))]
pub async fn save(
    State(state): State<AppState>,
    token: AccessToken,
    Json(draft): Json<HierarchyDraft>,
) -> Response {
    if let Err(errors) = draft.validate() {
        return AppError::from(errors).into_response();
    }

    match save_hierarchy(&state.resources, &token, &draft).await {
        Ok(saved) => (StatusCode::OK, Json(HierarchySaved { saved })).into_response(),
        Err(err) => failure_response(err),
    }
}
