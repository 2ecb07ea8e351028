//! Backend collections the console can reach.

use std::fmt;
use std::str::FromStr;

/// A REST collection on the shop backend, named by its path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Clients,
    Vehicles,
    Brands,
    Models,
    Colors,
    Employees,
    Suppliers,
    Users,
    Receptions,
    Inspections,
    Repairs,
    Invoices,
    InvoicePayments,
    Provinces,
    Municipalities,
    Sectors,
    Districts,
    Neighborhoods,
}

impl Resource {
    pub const ALL: [Resource; 18] = [
        Resource::Clients,
        Resource::Vehicles,
        Resource::Brands,
        Resource::Models,
        Resource::Colors,
        Resource::Employees,
        Resource::Suppliers,
        Resource::Users,
        Resource::Receptions,
        Resource::Inspections,
        Resource::Repairs,
        Resource::Invoices,
        Resource::InvoicePayments,
        Resource::Provinces,
        Resource::Municipalities,
        Resource::Sectors,
        Resource::Districts,
        Resource::Neighborhoods,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Clients => "clientes",
            Resource::Vehicles => "vehiculos",
            Resource::Brands => "marcas",
            Resource::Models => "modelos",
            Resource::Colors => "colores",
            Resource::Employees => "empleados",
            Resource::Suppliers => "suplidores",
            Resource::Users => "usuarios",
            Resource::Receptions => "recepciones",
            Resource::Inspections => "inspecciones",
            Resource::Repairs => "reparaciones",
            Resource::Invoices => "facturas",
            Resource::InvoicePayments => "pagos-facturas",
            Resource::Provinces => "provincias",
            Resource::Municipalities => "municipios",
            Resource::Sectors => "sectores",
            Resource::Districts => "distritos",
            Resource::Neighborhoods => "barrios",
        }
    }

    /// Collection path, e.g. `clientes`.
    pub fn collection_path(&self) -> String {
        self.as_str().to_string()
    }

    /// Item path, e.g. `clientes/12`.
    pub fn item_path(&self, id: impl fmt::Display) -> String {
        format!("{}/{}", self.as_str(), id)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown resource: {0}")]
pub struct UnknownResource(pub String);

/// Record ids are one path segment of ASCII letters, digits, `-` or `_`.
/// Anything else could address a different backend resource once decoded.
pub fn is_valid_record_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= 64
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

impl FromStr for Resource {
    type Err = UnknownResource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Resource::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| UnknownResource(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_path_segment() {
        for resource in Resource::ALL {
            assert_eq!(resource.as_str().parse::<Resource>().unwrap(), resource);
        }
    }

    #[test]
    fn rejects_unknown_segment() {
        assert!("facturitas".parse::<Resource>().is_err());
    }

    #[test]
    fn record_ids_stay_within_one_segment() {
        assert!(is_valid_record_id("12"));
        assert!(is_valid_record_id("a1b2-c3_d4"));

        assert!(!is_valid_record_id(""));
        assert!(!is_valid_record_id("../clientes/5"));
        assert!(!is_valid_record_id("5/../../usuarios"));
        assert!(!is_valid_record_id(".."));
        assert!(!is_valid_record_id("5?admin=true"));
        assert!(!is_valid_record_id("5#x"));
        assert!(!is_valid_record_id("5%2F6"));
        assert!(!is_valid_record_id(&"9".repeat(65)));
    }

    #[test]
    fn builds_item_paths() {
        assert_eq!(Resource::InvoicePayments.item_path(9), "pagos-facturas/9");
        assert_eq!(Resource::Vehicles.collection_path(), "vehiculos");
    }
}
