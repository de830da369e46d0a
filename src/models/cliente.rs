// src/models/cliente.rs

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

// --- ENUMS ---

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TipoDocumento {
    #[serde(rename = "CUIT")]
    Cuit,
    #[serde(rename = "CUIL")]
    Cuil,
    #[serde(rename = "DNI")]
    Dni,
    #[serde(rename = "LE")]
    Le,
    #[serde(rename = "LC")]
    Lc,
    Pasaporte,
    #[serde(rename = "CI")]
    Ci,
}

impl TipoDocumento {
    pub fn as_str(self) -> &'static str {
        match self {
            TipoDocumento::Cuit => "CUIT",
            TipoDocumento::Cuil => "CUIL",
            TipoDocumento::Dni => "DNI",
            TipoDocumento::Le => "LE",
            TipoDocumento::Lc => "LC",
            TipoDocumento::Pasaporte => "Pasaporte",
            TipoDocumento::Ci => "CI",
        }
    }

    /// Código numérico usado pela ARCA.
    pub fn codigo_arca(self) -> i32 {
        match self {
            TipoDocumento::Cuit => 80,
            TipoDocumento::Cuil => 86,
            TipoDocumento::Dni => 96,
            TipoDocumento::Le => 89,
            TipoDocumento::Lc => 90,
            TipoDocumento::Ci => 91,
            TipoDocumento::Pasaporte => 94,
        }
    }

    pub fn desde_codigo_arca(codigo: i32) -> Option<Self> {
        match codigo {
            80 => Some(TipoDocumento::Cuit),
            86 => Some(TipoDocumento::Cuil),
            96 => Some(TipoDocumento::Dni),
            89 => Some(TipoDocumento::Le),
            90 => Some(TipoDocumento::Lc),
            91 => Some(TipoDocumento::Ci),
            94 => Some(TipoDocumento::Pasaporte),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CondicionIva {
    #[serde(rename = "RI")]
    ResponsableInscripto,
    Monotributo,
    #[serde(rename = "CF")]
    ConsumidorFinal,
    Exento,
}

impl CondicionIva {
    /// Aceita tanto a sigla quanto o nome por extenso enviado na emissão.
    pub fn desde_texto(texto: &str) -> Self {
        match texto.trim() {
            "RI" | "Responsable Inscripto" => CondicionIva::ResponsableInscripto,
            "Monotributo" => CondicionIva::Monotributo,
            "Exento" => CondicionIva::Exento,
            _ => CondicionIva::ConsumidorFinal,
        }
    }
}

// --- CLIENTE ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cliente {
    pub id: i64,
    pub empresa_id: i64,
    pub razon_social: String,
    pub tipo_documento: TipoDocumento,
    pub numero_documento: String,
    pub condicion_iva: CondicionIva,
    pub domicilio: Option<String>,
    pub localidad: Option<String>,
    pub provincia: Option<String>,
    pub codigo_postal: Option<String>,
    pub email: Option<String>,
    pub telefono: Option<String>,
    pub notas: Option<String>,
    pub activo: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validar_documento_cliente"))]
pub struct ClienteCreate {
    #[validate(length(min = 1, max = 200, message = "La razón social es obligatoria"))]
    pub razon_social: String,
    pub tipo_documento: TipoDocumento,
    #[validate(length(min = 1, max = 20, message = "El número de documento es obligatorio"))]
    pub numero_documento: String,
    pub condicion_iva: CondicionIva,
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
    pub notas: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ClienteUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 200, message = "La razón social es obligatoria"))]
    pub razon_social: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tipo_documento: Option<TipoDocumento>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 20, message = "El número de documento es obligatorio"))]
    pub numero_documento: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condicion_iva: Option<CondicionIva>,
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
    pub notas: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activo: Option<bool>,
}

/// Filtros da listagem de clientes (query string).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClienteListParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activo: Option<bool>,
}

impl Cliente {
    pub fn aplicar(&mut self, cambios: ClienteUpdate, ahora: DateTime<Utc>) {
        if let Some(v) = cambios.razon_social { self.razon_social = v; }
        if let Some(v) = cambios.tipo_documento { self.tipo_documento = v; }
        if let Some(v) = cambios.numero_documento { self.numero_documento = v; }
        if let Some(v) = cambios.condicion_iva { self.condicion_iva = v; }
        if cambios.domicilio.is_some() { self.domicilio = cambios.domicilio; }
        if cambios.localidad.is_some() { self.localidad = cambios.localidad; }
        if cambios.provincia.is_some() { self.provincia = cambios.provincia; }
        if cambios.codigo_postal.is_some() { self.codigo_postal = cambios.codigo_postal; }
        if cambios.email.is_some() { self.email = cambios.email; }
        if cambios.telefono.is_some() { self.telefono = cambios.telefono; }
        if cambios.notas.is_some() { self.notas = cambios.notas; }
        if let Some(v) = cambios.activo { self.activo = v; }
        self.updated_at = ahora;
    }
}

// =============================================================================
//  VALIDAÇÕES DE DOCUMENTO
// =============================================================================

/// CUIT: exatamente 11 dígitos, sem hífens.
pub fn validar_cuit(cuit: &str) -> Result<(), ValidationError> {
    if cuit.len() == 11 && cuit.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new("cuit").with_message(Cow::from("CUIT inválido")))
    }
}

/// CUIT e CUIL exigem 11 dígitos; os demais documentos só precisam ser numéricos ou alfanuméricos.
pub fn validar_documento(tipo: TipoDocumento, numero: &str) -> Result<(), ValidationError> {
    match tipo {
        TipoDocumento::Cuit | TipoDocumento::Cuil => validar_cuit(numero),
        _ => Ok(()),
    }
}

fn validar_documento_cliente(cliente: &ClienteCreate) -> Result<(), ValidationError> {
    validar_documento(cliente.tipo_documento, &cliente.numero_documento)
}
