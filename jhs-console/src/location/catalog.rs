//! The five reference collections behind the location selector.

use crate::location::selector::{derive_child_options, LocationLevel};
use crate::middleware::AccessToken;
use crate::models::location::{
    District, LocationId, LocationOption, Municipality, Neighborhood, Province, Sector,
};
use crate::models::Resource;
use crate::services::{ApiError, ResourceService};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationCatalog {
    pub provinces: Vec<Province>,
    pub municipalities: Vec<Municipality>,
    pub sectors: Vec<Sector>,
    pub districts: Vec<District>,
    pub neighborhoods: Vec<Neighborhood>,
}

impl LocationCatalog {
    /// Loads all five collections concurrently. Each one is served from the
    /// query cache when fresh, so selection changes never hit the backend.
    pub async fn load(resources: &ResourceService, token: &AccessToken) -> Result<Self, ApiError> {
        let (provinces, municipalities, sectors, districts, neighborhoods) = tokio::try_join!(
            resources.list_as::<Province>(token, Resource::Provinces),
            resources.list_as::<Municipality>(token, Resource::Municipalities),
            resources.list_as::<Sector>(token, Resource::Sectors),
            resources.list_as::<District>(token, Resource::Districts),
            resources.list_as::<Neighborhood>(token, Resource::Neighborhoods),
        )?;

        Ok(Self {
            provinces,
            municipalities,
            sectors,
            districts,
            neighborhoods,
        })
    }

    /// Options for `level` given the id selected one level up.
    /// Provinces ignore `parent_id`.
    pub fn options_for(&self, level: LocationLevel, parent_id: Option<LocationId>) -> Vec<LocationOption> {
        fn to_options<T>(rows: Vec<&T>) -> Vec<LocationOption>
        where
            for<'a> LocationOption: From<&'a T>,
        {
            rows.into_iter().map(LocationOption::from).collect()
        }

        match level {
            LocationLevel::Province => self.provinces.iter().map(LocationOption::from).collect(),
            LocationLevel::Municipality => {
                to_options(derive_child_options(parent_id, &self.municipalities))
            }
            LocationLevel::Sector => to_options(derive_child_options(parent_id, &self.sectors)),
            LocationLevel::District => to_options(derive_child_options(parent_id, &self.districts)),
            LocationLevel::Neighborhood => {
                to_options(derive_child_options(parent_id, &self.neighborhoods))
            }
        }
    }

    pub fn has_option(&self, level: LocationLevel, parent_id: Option<LocationId>, id: LocationId) -> bool {
        self.options_for(level, parent_id).iter().any(|o| o.id == id)
    }
}
