//! Forms of the master-data screens, validated before they reach the backend.

use crate::forms::validators::{CEDULA_RE, PERSON_NAME_RE, PHONE_RE, PLATE_RE, RNC_RE, VIN_RE};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ClientForm {
    #[validate(
        length(min = 2, max = 60, message = "El nombre debe tener entre 2 y 60 caracteres"),
        regex(path = *PERSON_NAME_RE, message = "El nombre solo puede contener letras")
    )]
    pub first_name: String,
    #[validate(
        length(min = 2, max = 60, message = "El apellido debe tener entre 2 y 60 caracteres"),
        regex(path = *PERSON_NAME_RE, message = "El apellido solo puede contener letras")
    )]
    pub last_name: String,
    #[validate(regex(path = *CEDULA_RE, message = "Cédula inválida (000-0000000-0)"))]
    #[serde(default)]
    pub cedula: Option<String>,
    #[validate(regex(path = *RNC_RE, message = "RNC inválido (9 dígitos)"))]
    #[serde(default)]
    pub rnc: Option<String>,
    #[validate(regex(path = *PHONE_RE, message = "Teléfono inválido (809-000-0000)"))]
    pub phone: String,
    #[validate(email(message = "Correo electrónico inválido"))]
    #[serde(default)]
    pub email: Option<String>,
    #[validate(length(max = 200, message = "La dirección no puede exceder 200 caracteres"))]
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VehicleForm {
    #[validate(regex(path = *PLATE_RE, message = "Placa inválida (A123456)"))]
    pub plate: String,
    #[validate(regex(path = *VIN_RE, message = "VIN inválido (17 caracteres)"))]
    #[serde(default)]
    pub vin: Option<String>,
    #[validate(range(min = 1, message = "Seleccione una marca"))]
    pub brand_id: i64,
    #[validate(range(min = 1, message = "Seleccione un modelo"))]
    pub model_id: i64,
    #[validate(range(min = 1, message = "Seleccione un color"))]
    pub color_id: i64,
    #[validate(range(min = 1, message = "Seleccione un cliente"))]
    pub client_id: i64,
    #[validate(range(min = 1950, max = 2100, message = "Año inválido"))]
    pub year: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeForm {
    #[validate(
        length(min = 2, max = 60, message = "El nombre debe tener entre 2 y 60 caracteres"),
        regex(path = *PERSON_NAME_RE, message = "El nombre solo puede contener letras")
    )]
    pub first_name: String,
    #[validate(
        length(min = 2, max = 60, message = "El apellido debe tener entre 2 y 60 caracteres"),
        regex(path = *PERSON_NAME_RE, message = "El apellido solo puede contener letras")
    )]
    pub last_name: String,
    #[validate(regex(path = *CEDULA_RE, message = "Cédula inválida (000-0000000-0)"))]
    pub cedula: String,
    #[validate(regex(path = *PHONE_RE, message = "Teléfono inválido (809-000-0000)"))]
    pub phone: String,
    #[validate(length(min = 2, max = 60, message = "Indique el cargo"))]
    pub position: String,
    #[validate(email(message = "Correo electrónico inválido"))]
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SupplierForm {
    #[validate(length(min = 2, max = 100, message = "El nombre debe tener entre 2 y 100 caracteres"))]
    pub name: String,
    #[validate(regex(path = *RNC_RE, message = "RNC inválido (9 dígitos)"))]
    pub rnc: String,
    #[validate(regex(path = *PHONE_RE, message = "Teléfono inválido (809-000-0000)"))]
    pub phone: String,
    #[validate(email(message = "Correo electrónico inválido"))]
    #[serde(default)]
    pub email: Option<String>,
    #[validate(length(max = 100))]
    #[serde(default)]
    pub contact_name: Option<String>,
}
