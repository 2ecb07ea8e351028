//! Saving a location chain edited in one form.
//!
//! Levels are upserted one by one, top first; each child gets the id its
//! parent came back with. There is no transaction: when a call fails the
//! levels already stored stay stored, and the error lists them.

use crate::location::selector::LocationLevel;
use crate::middleware::AccessToken;
use crate::models::location::LocationId;
use crate::models::Resource;
use crate::services::{ApiError, ResourceService};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::borrow::Cow;
use thiserror::Error;
use validator::{Validate, ValidationError, ValidationErrors};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LevelDraft {
    /// Present when editing an existing row.
    #[serde(default)]
    pub id: Option<LocationId>,
    #[validate(length(min = 1, max = 100, message = "El nombre debe tener entre 1 y 100 caracteres"))]
    pub name: String,
    /// Parent of the top-most level in the draft. Ignored on lower levels,
    /// which take the id of the level saved just above them.
    #[serde(default)]
    pub parent_id: Option<LocationId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HierarchyDraft {
    #[serde(default)]
    pub province: Option<LevelDraft>,
    #[serde(default)]
    pub municipality: Option<LevelDraft>,
    #[serde(default)]
    pub sector: Option<LevelDraft>,
    #[serde(default)]
    pub district: Option<LevelDraft>,
    #[serde(default)]
    pub neighborhood: Option<LevelDraft>,
}

impl HierarchyDraft {
    pub fn get(&self, level: LocationLevel) -> Option<&LevelDraft> {
        match level {
            LocationLevel::Province => self.province.as_ref(),
            LocationLevel::Municipality => self.municipality.as_ref(),
            LocationLevel::Sector => self.sector.as_ref(),
            LocationLevel::District => self.district.as_ref(),
            LocationLevel::Neighborhood => self.neighborhood.as_ref(),
        }
    }

    /// Levels present in the draft, top first.
    pub fn levels(&self) -> Vec<(LocationLevel, &LevelDraft)> {
        LocationLevel::ALL
            .into_iter()
            .filter_map(|level| self.get(level).map(|draft| (level, draft)))
            .collect()
    }

    /// The draft must be one unbroken run of levels, the top one anchored
    /// to a parent unless it is the province, and every name valid.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let levels = self.levels();

        let Some(&(top, top_draft)) = levels.first() else {
            errors.add("hierarchy", message_error("empty", "No hay niveles para guardar"));
            return Err(errors);
        };

        if top != LocationLevel::Province && top_draft.parent_id.is_none() {
            errors.add(
                top.as_str(),
                message_error("parent_required", "Seleccione el nivel superior"),
            );
        }

        for pair in levels.windows(2) {
            let (upper, _) = pair[0];
            let (lower, _) = pair[1];
            if upper.child() != Some(lower) {
                errors.add(
                    lower.as_str(),
                    message_error("gap", "Falta un nivel intermedio en la jerarquía"),
                );
            }
        }

        // Names are saved trimmed, so they are checked trimmed.
        for (level, draft) in &levels {
            let saved_form = LevelDraft {
                name: draft.name.trim().to_string(),
                ..(*draft).clone()
            };
            if saved_form.validate().is_err() {
                errors.add(
                    level.as_str(),
                    message_error("name", "El nombre debe tener entre 1 y 100 caracteres"),
                );
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn message_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

pub fn resource_for(level: LocationLevel) -> Resource {
    match level {
        LocationLevel::Province => Resource::Provinces,
        LocationLevel::Municipality => Resource::Municipalities,
        LocationLevel::Sector => Resource::Sectors,
        LocationLevel::District => Resource::Districts,
        LocationLevel::Neighborhood => Resource::Neighborhoods,
    }
}

/// JSON field holding the parent reference, matching the backend models.
fn parent_field(level: LocationLevel) -> Option<&'static str> {
    match level {
        LocationLevel::Province => None,
        LocationLevel::Municipality => Some("provinceId"),
        LocationLevel::Sector => Some("municipalityId"),
        LocationLevel::District => Some("sectorId"),
        LocationLevel::Neighborhood => Some("districtId"),
    }
}

fn request_body(level: LocationLevel, draft: &LevelDraft, parent_id: Option<LocationId>) -> Value {
    let mut body = json!({ "name": draft.name.trim() });
    if let (Some(field), Some(parent)) = (parent_field(level), parent_id) {
        body[field] = json!(parent);
    }
    body
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SavedLevel {
    pub level: LocationLevel,
    pub id: LocationId,
    pub created: bool,
}

#[derive(Debug, Error)]
#[error("saving {} failed after {} level(s) were stored: {source}", .level.as_str(), .saved.len())]
pub struct HierarchySaveError {
    pub level: LocationLevel,
    pub saved: Vec<SavedLevel>,
    #[source]
    pub source: ApiError,
}

/// Upserts every level of an already validated draft, top first.
pub async fn save_hierarchy(
    resources: &ResourceService,
    token: &AccessToken,
    draft: &HierarchyDraft,
) -> Result<Vec<SavedLevel>, HierarchySaveError> {
    let mut saved: Vec<SavedLevel> = Vec::new();

    for (level, level_draft) in draft.levels() {
        let parent_id = saved.last().map(|s| s.id).or(level_draft.parent_id);
        let body = request_body(level, level_draft, parent_id);
        let resource = resource_for(level);

        let outcome = match level_draft.id {
            Some(id) => resources
                .update(token, resource, &id.to_string(), &body)
                .await
                .map(|_| (id, false)),
            None => match resources.create(token, resource, &body).await {
                Ok(created) => created
                    .get("id")
                    .and_then(Value::as_i64)
                    .map(|id| (id, true))
                    .ok_or_else(|| {
                        ApiError::Decode(format!("{} create response has no id", resource))
                    }),
                Err(e) => Err(e),
            },
        };

        match outcome {
            Ok((id, created)) => {
                tracing::info!(level = level.as_str(), id, created, "Location level saved");
                saved.push(SavedLevel { level, id, created });
            }
            Err(source) => {
                tracing::error!(
                    level = level.as_str(),
                    stored = saved.len(),
                    error = %source,
                    "Location hierarchy save stopped; stored levels are kept"
                );
                return Err(HierarchySaveError {
                    level,
                    saved,
                    source,
                });
            }
        }
    }

    Ok(saved)
}
