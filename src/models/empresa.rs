// src/models/empresa.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::cliente::validar_cuit;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CondicionIvaEmpresa {
    #[serde(rename = "RI")]
    ResponsableInscripto,
    Monotributo,
    Exento,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Empresa {
    pub id: i64,
    pub razon_social: String,
    pub cuit: String,
    pub condicion_iva: CondicionIvaEmpresa,
    pub domicilio: String,
    pub localidad: String,
    pub provincia: String,
    pub codigo_postal: String,
    pub email: Option<String>,
    pub telefono: Option<String>,
    pub inicio_actividades: NaiveDate,
    pub logo: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EmpresaCreate {
    #[validate(length(min = 1, max = 200, message = "La razón social es obligatoria"))]
    pub razon_social: String,
    #[validate(custom(function = "validar_cuit"))]
    pub cuit: String,
    pub condicion_iva: CondicionIvaEmpresa,
    #[validate(length(min = 1, max = 200, message = "El domicilio es obligatorio"))]
    pub domicilio: String,
    #[validate(length(min = 1, max = 100, message = "La localidad es obligatoria"))]
    pub localidad: String,
    #[validate(length(min = 1, max = 100, message = "La provincia es obligatoria"))]
    pub provincia: String,
    #[validate(length(min = 1, max = 10, message = "El código postal es obligatorio"))]
    pub codigo_postal: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "Email inválido"))]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telefono: Option<String>,
    pub inicio_actividades: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct EmpresaUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 200, message = "La razón social es obligatoria"))]
    pub razon_social: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validar_cuit"))]
    pub cuit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condicion_iva: Option<CondicionIvaEmpresa>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domicilio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub localidad: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provincia: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codigo_postal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "Email inválido"))]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telefono: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inicio_actividades: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

impl Empresa {
    pub fn aplicar(&mut self, cambios: EmpresaUpdate, ahora: DateTime<Utc>) {
        if let Some(v) = cambios.razon_social { self.razon_social = v; }
        if let Some(v) = cambios.cuit { self.cuit = v; }
        if let Some(v) = cambios.condicion_iva { self.condicion_iva = v; }
        if let Some(v) = cambios.domicilio { self.domicilio = v; }
        if let Some(v) = cambios.localidad { self.localidad = v; }
        if let Some(v) = cambios.provincia { self.provincia = v; }
        if let Some(v) = cambios.codigo_postal { self.codigo_postal = v; }
        if cambios.email.is_some() { self.email = cambios.email; }
        if cambios.telefono.is_some() { self.telefono = cambios.telefono; }
        if let Some(v) = cambios.inicio_actividades { self.inicio_actividades = v; }
        if cambios.logo.is_some() { self.logo = cambios.logo; }
        self.updated_at = ahora;
    }
}
