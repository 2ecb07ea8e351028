//! Cascading province → neighborhood selection.
//!
//! The selection is five linearly dependent fields. Changing one level wipes
//! every level below it, and a level's options come only from the level
//! above.

use crate::location::catalog::LocationCatalog;
use crate::models::location::{ChildLocation, LocationId, LocationOption};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use thiserror::Error;
use validator::{ValidationError, ValidationErrors};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationLevel {
    Province,
    Municipality,
    Sector,
    District,
    Neighborhood,
}

impl LocationLevel {
    pub const ALL: [LocationLevel; 5] = [
        LocationLevel::Province,
        LocationLevel::Municipality,
        LocationLevel::Sector,
        LocationLevel::District,
        LocationLevel::Neighborhood,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Field name used in validation errors and JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            LocationLevel::Province => "province",
            LocationLevel::Municipality => "municipality",
            LocationLevel::Sector => "sector",
            LocationLevel::District => "district",
            LocationLevel::Neighborhood => "neighborhood",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LocationLevel::Province => "Provincia",
            LocationLevel::Municipality => "Municipio",
            LocationLevel::Sector => "Sector",
            LocationLevel::District => "Distrito",
            LocationLevel::Neighborhood => "Barrio",
        }
    }

    pub fn parent(self) -> Option<LocationLevel> {
        self.index().checked_sub(1).map(|i| Self::ALL[i])
    }

    pub fn child(self) -> Option<LocationLevel> {
        Self::ALL.get(self.index() + 1).copied()
    }

    /// This level and every level under it.
    pub fn and_below(self) -> &'static [LocationLevel] {
        let all: &'static [LocationLevel; 5] = &Self::ALL;
        &all[self.index()..]
    }
}

/// Entries of `children` that hang off `parent_id`. No parent, no options.
pub fn derive_child_options<T: ChildLocation>(parent_id: Option<LocationId>, children: &[T]) -> Vec<&T> {
    match parent_id {
        Some(parent) => children.iter().filter(|c| c.parent_id() == parent).collect(),
        None => Vec::new(),
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("{} is disabled until a {} is selected", .level.label(), .parent.label())]
    LevelDisabled {
        level: LocationLevel,
        parent: LocationLevel,
    },

    #[error("{} {id} is not an option under the current selection", .level.label())]
    NotAnOption { level: LocationLevel, id: LocationId },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationSelection {
    #[serde(default)]
    pub province: Option<LocationId>,
    #[serde(default)]
    pub municipality: Option<LocationId>,
    #[serde(default)]
    pub sector: Option<LocationId>,
    #[serde(default)]
    pub district: Option<LocationId>,
    #[serde(default)]
    pub neighborhood: Option<LocationId>,
}

impl LocationSelection {
    pub fn get(&self, level: LocationLevel) -> Option<LocationId> {
        match level {
            LocationLevel::Province => self.province,
            LocationLevel::Municipality => self.municipality,
            LocationLevel::Sector => self.sector,
            LocationLevel::District => self.district,
            LocationLevel::Neighborhood => self.neighborhood,
        }
    }

    fn slot(&mut self, level: LocationLevel) -> &mut Option<LocationId> {
        match level {
            LocationLevel::Province => &mut self.province,
            LocationLevel::Municipality => &mut self.municipality,
            LocationLevel::Sector => &mut self.sector,
            LocationLevel::District => &mut self.district,
            LocationLevel::Neighborhood => &mut self.neighborhood,
        }
    }

    /// The province is always enabled; any other level needs its parent.
    pub fn is_enabled(&self, level: LocationLevel) -> bool {
        level.parent().map_or(true, |parent| self.get(parent).is_some())
    }

    /// Sets `level` and clears everything below it.
    ///
    /// Re-selecting the current value is not a change; descendants stay.
    /// Returns whether anything changed.
    pub fn set(&mut self, level: LocationLevel, id: Option<LocationId>) -> bool {
        if self.get(level) == id {
            return false;
        }
        *self.slot(level) = id;
        if let Some(child) = level.child() {
            self.clear_from(child);
        }
        true
    }

    /// Clears `level` and every level under it.
    pub fn clear_from(&mut self, level: LocationLevel) {
        for &l in level.and_below() {
            *self.slot(l) = None;
        }
    }

    /// Applies a user's pick at `level`, checking it against the options the
    /// catalog offers for the current parent.
    pub fn select(
        &mut self,
        catalog: &LocationCatalog,
        level: LocationLevel,
        id: Option<LocationId>,
    ) -> Result<bool, SelectionError> {
        if !self.is_enabled(level) {
            // Clearing an already disabled level is harmless.
            if id.is_none() {
                return Ok(false);
            }
            let parent = level.parent().unwrap_or(LocationLevel::Province);
            return Err(SelectionError::LevelDisabled { level, parent });
        }

        if let Some(id) = id {
            let parent_id = level.parent().and_then(|p| self.get(p));
            if !catalog.has_option(level, parent_id, id) {
                return Err(SelectionError::NotAnOption { level, id });
            }
        }

        Ok(self.set(level, id))
    }

    /// Every level in `required` must be selected. Errors are keyed by level.
    pub fn validate(&self, required: &[LocationLevel]) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        for &level in required {
            if self.get(level).is_none() {
                let mut error = ValidationError::new("required");
                error.message = Some(Cow::Owned(format!("{} es requerido", level.label())));
                errors.add(level.as_str(), error);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// What a dropdown needs to render one level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelView {
    pub level: LocationLevel,
    pub label: &'static str,
    pub enabled: bool,
    pub selected: Option<LocationId>,
    pub options: Vec<LocationOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectorView {
    pub selection: LocationSelection,
    pub levels: Vec<LevelView>,
}

impl SelectorView {
    pub fn build(catalog: &LocationCatalog, selection: LocationSelection) -> Self {
        let levels = LocationLevel::ALL
            .into_iter()
            .map(|level| {
                let parent_id = level.parent().and_then(|p| selection.get(p));
                let enabled = selection.is_enabled(level);
                LevelView {
                    level,
                    label: level.label(),
                    enabled,
                    selected: selection.get(level),
                    options: if enabled {
                        catalog.options_for(level, parent_id)
                    } else {
                        Vec::new()
                    },
                }
            })
            .collect();

        Self { selection, levels }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::location::{District, Municipality, Neighborhood, Province, Sector};

    fn catalog() -> LocationCatalog {
        LocationCatalog {
            provinces: vec![
                Province { id: 1, name: "Santo Domingo".into() },
                Province { id: 2, name: "Santiago".into() },
            ],
            municipalities: vec![
                Municipality { id: 10, name: "Santo Domingo Este".into(), province_id: 1 },
                Municipality { id: 11, name: "Boca Chica".into(), province_id: 1 },
                Municipality { id: 20, name: "Santiago de los Caballeros".into(), province_id: 2 },
            ],
            sectors: vec![
                Sector { id: 100, name: "Los Mina".into(), municipality_id: 10 },
                Sector { id: 110, name: "Andrés".into(), municipality_id: 11 },
                Sector { id: 200, name: "Cienfuegos".into(), municipality_id: 20 },
            ],
            districts: vec![
                District { id: 1000, name: "Los Mina Norte".into(), sector_id: 100 },
                District { id: 1100, name: "Andrés Centro".into(), sector_id: 110 },
            ],
            neighborhoods: vec![
                Neighborhood { id: 10000, name: "Invivienda".into(), district_id: 1000 },
                Neighborhood { id: 11000, name: "La Caleta".into(), district_id: 1100 },
            ],
        }
    }

    fn full_chain() -> LocationSelection {
        LocationSelection {
            province: Some(1),
            municipality: Some(10),
            sector: Some(100),
            district: Some(1000),
            neighborhood: Some(10000),
        }
    }

    #[test]
    fn derive_child_options_filters_by_parent() {
        let catalog = catalog();
        let options = derive_child_options(Some(1), &catalog.municipalities);
        let ids: Vec<_> = options.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![10, 11]);
    }

    #[test]
    fn derive_child_options_without_parent_is_empty() {
        let catalog = catalog();
        assert!(derive_child_options(None, &catalog.sectors).is_empty());
    }

    #[test]
    fn changing_province_clears_every_level_below() {
        let catalog = catalog();
        let mut selection = full_chain();

        let changed = selection.select(&catalog, LocationLevel::Province, Some(2)).unwrap();

        assert!(changed);
        assert_eq!(
            selection,
            LocationSelection {
                province: Some(2),
                ..Default::default()
            }
        );
    }

    #[test]
    fn changing_municipality_clears_sector_district_and_neighborhood() {
        let catalog = catalog();
        let mut selection = full_chain();

        selection
            .select(&catalog, LocationLevel::Municipality, Some(11))
            .unwrap();

        assert_eq!(selection.province, Some(1));
        assert_eq!(selection.municipality, Some(11));
        assert_eq!(selection.sector, None);
        assert_eq!(selection.district, None);
        assert_eq!(selection.neighborhood, None);
    }

    #[test]
    fn reselecting_same_value_keeps_descendants() {
        let catalog = catalog();
        let mut selection = full_chain();

        let changed = selection.select(&catalog, LocationLevel::Province, Some(1)).unwrap();

        assert!(!changed);
        assert_eq!(selection, full_chain());
    }

    #[test]
    fn clearing_a_level_clears_descendants() {
        let catalog = catalog();
        let mut selection = full_chain();

        selection.select(&catalog, LocationLevel::Sector, None).unwrap();

        assert_eq!(selection.municipality, Some(10));
        assert_eq!(selection.sector, None);
        assert_eq!(selection.neighborhood, None);
    }

    #[test]
    fn rejects_option_from_another_parent() {
        let catalog = catalog();
        let mut selection = LocationSelection {
            province: Some(1),
            municipality: Some(10),
            ..Default::default()
        };

        let err = selection
            .select(&catalog, LocationLevel::Sector, Some(200))
            .unwrap_err();

        assert_eq!(
            err,
            SelectionError::NotAnOption {
                level: LocationLevel::Sector,
                id: 200
            }
        );
        assert_eq!(selection.sector, None);
    }

    #[test]
    fn child_level_disabled_until_parent_selected() {
        let catalog = catalog();
        let mut selection = LocationSelection::default();

        assert!(selection.is_enabled(LocationLevel::Province));
        assert!(!selection.is_enabled(LocationLevel::Municipality));

        let err = selection
            .select(&catalog, LocationLevel::Municipality, Some(10))
            .unwrap_err();
        assert!(matches!(err, SelectionError::LevelDisabled { .. }));
    }

    #[test]
    fn validation_reports_each_missing_level() {
        let selection = LocationSelection {
            province: Some(1),
            ..Default::default()
        };

        let errors = selection
            .validate(&[
                LocationLevel::Province,
                LocationLevel::Municipality,
                LocationLevel::Sector,
            ])
            .unwrap_err();

        let fields = errors.field_errors();
        assert!(!fields.contains_key("province"));
        assert!(fields.contains_key("municipality"));
        assert!(fields.contains_key("sector"));
    }

    #[test]
    fn view_disables_levels_below_first_gap() {
        let catalog = catalog();
        let selection = LocationSelection {
            province: Some(1),
            ..Default::default()
        };

        let view = SelectorView::build(&catalog, selection);

        assert!(view.levels[0].enabled);
        assert_eq!(view.levels[0].options.len(), 2);
        assert!(view.levels[1].enabled);
        assert_eq!(view.levels[1].options.len(), 2);
        assert!(!view.levels[2].enabled);
        assert!(view.levels[2].options.is_empty());
    }

    #[test]
    fn level_navigation() {
        assert_eq!(LocationLevel::Province.parent(), None);
        assert_eq!(LocationLevel::Sector.parent(), Some(LocationLevel::Municipality));
        assert_eq!(LocationLevel::Neighborhood.child(), None);
        assert_eq!(LocationLevel::District.and_below().len(), 2);
    }
}
