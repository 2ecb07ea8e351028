//! Location hierarchy reference data.
//!
//! Province → municipality → sector → district → neighborhood. Every level
//! below the province points at its parent through a `*_id` field.

use serde::{Deserialize, Serialize};

pub type LocationId = i64;

/// A reference-data row that belongs to a parent row on the level above.
pub trait ChildLocation {
    fn id(&self) -> LocationId;
    fn parent_id(&self) -> LocationId;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Province {
    pub id: LocationId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Municipality {
    pub id: LocationId,
    pub name: String,
    pub province_id: LocationId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sector {
    pub id: LocationId,
    pub name: String,
    pub municipality_id: LocationId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct District {
    pub id: LocationId,
    pub name: String,
    pub sector_id: LocationId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Neighborhood {
    pub id: LocationId,
    pub name: String,
    pub district_id: LocationId,
}

macro_rules! child_location {
    ($ty:ty, $parent:ident) => {
        impl ChildLocation for $ty {
            fn id(&self) -> LocationId {
                self.id
            }

            fn parent_id(&self) -> LocationId {
                self.$parent
            }
        }
    };
}

child_location!(Municipality, province_id);
child_location!(Sector, municipality_id);
child_location!(District, sector_id);
child_location!(Neighborhood, district_id);

/// One selectable entry in a level's dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationOption {
    pub id: LocationId,
    pub name: String,
}

macro_rules! option_from {
    ($($ty:ty),*) => {
        $(
            impl From<&$ty> for LocationOption {
                fn from(row: &$ty) -> Self {
                    Self {
                        id: row.id,
                        name: row.name.clone(),
                    }
                }
            }
        )*
    };
}

option_from!(Province, Municipality, Sector, District, Neighborhood);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_camel_case_parent_reference() {
        let sector: Sector =
            serde_json::from_str(r#"{"id":3,"name":"Los Prados","municipalityId":12}"#).unwrap();
        assert_eq!(sector.parent_id(), 12);
        assert_eq!(sector.id(), 3);
    }
}
