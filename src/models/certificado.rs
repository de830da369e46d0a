// src/models/certificado.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::cliente::validar_cuit;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Ambiente {
    #[default]
    Homologacion,
    Produccion,
}

impl Ambiente {
    pub fn as_str(self) -> &'static str {
        match self {
            Ambiente::Homologacion => "homologacion",
            Ambiente::Produccion => "produccion",
        }
    }

    pub fn desde_texto(texto: &str) -> Option<Self> {
        match texto {
            "homologacion" => Some(Ambiente::Homologacion),
            "produccion" => Some(Ambiente::Produccion),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EstadoCertificado {
    Valido,
    PorVencer,
    Vencido,
}

impl EstadoCertificado {
    pub fn para_dias(dias_restantes: i64) -> Self {
        if dias_restantes <= 0 {
            EstadoCertificado::Vencido
        } else if dias_restantes <= 30 {
            EstadoCertificado::PorVencer
        } else {
            EstadoCertificado::Valido
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TipoAlerta {
    Info,
    Warning,
    Danger,
}

impl TipoAlerta {
    pub fn para_dias(dias_restantes: i64) -> Self {
        if dias_restantes <= 7 {
            TipoAlerta::Danger
        } else if dias_restantes <= 30 {
            TipoAlerta::Warning
        } else {
            TipoAlerta::Info
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Certificado {
    pub id: i64,
    pub nombre: String,
    pub cuit: String,
    pub fecha_emision: NaiveDate,
    pub fecha_vencimiento: NaiveDate,
    pub ambiente: Ambiente,
    pub archivo_crt: String,
    pub archivo_key: String,
    pub activo: bool,
    pub empresa_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub dias_restantes: i64,
    pub estado: EstadoCertificado,
}

impl Certificado {
    /// Recalcula os campos derivados em relação à data informada.
    pub fn recalcular(&mut self, hoy: NaiveDate) {
        self.dias_restantes = (self.fecha_vencimiento - hoy).num_days();
        self.estado = EstadoCertificado::para_dias(self.dias_restantes);
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GenerarCsrRequest {
    #[validate(custom(function = "validar_cuit"))]
    pub cuit: String,
    #[validate(length(min = 1, max = 200, message = "El nombre de la empresa es obligatorio"))]
    pub nombre_empresa: String,
    #[serde(default)]
    pub ambiente: Ambiente,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerarCsrResponse {
    pub csr: String,
    pub key_filename: String,
    pub mensaje: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EstadoServidores {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aplicacion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_datos: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autenticacion: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VerificacionResponse {
    pub exito: bool,
    pub mensaje: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estado_servidores: Option<EstadoServidores>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CertificadoAlerta {
    pub id: i64,
    pub cuit: String,
    pub nombre: String,
    pub dias_restantes: i64,
    pub fecha_vencimiento: NaiveDate,
    pub ambiente: Ambiente,
    pub tipo_alerta: TipoAlerta,
}

impl From<&Certificado> for CertificadoAlerta {
    fn from(c: &Certificado) -> Self {
        Self {
            id: c.id,
            cuit: c.cuit.clone(),
            nombre: c.nombre.clone(),
            dias_restantes: c.dias_restantes,
            fecha_vencimiento: c.fecha_vencimiento,
            ambiente: c.ambiente,
            tipo_alerta: TipoAlerta::para_dias(c.dias_restantes),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClavesQuery {
    pub cuit: String,
    #[serde(default)]
    pub ambiente: Ambiente,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estado_por_dias_restantes() {
        assert_eq!(EstadoCertificado::para_dias(-3), EstadoCertificado::Vencido);
        assert_eq!(EstadoCertificado::para_dias(0), EstadoCertificado::Vencido);
        assert_eq!(EstadoCertificado::para_dias(1), EstadoCertificado::PorVencer);
        assert_eq!(EstadoCertificado::para_dias(30), EstadoCertificado::PorVencer);
        assert_eq!(EstadoCertificado::para_dias(31), EstadoCertificado::Valido);
    }

    #[test]
    fn alerta_por_dias_restantes() {
        assert_eq!(TipoAlerta::para_dias(7), TipoAlerta::Danger);
        assert_eq!(TipoAlerta::para_dias(8), TipoAlerta::Warning);
        assert_eq!(TipoAlerta::para_dias(30), TipoAlerta::Warning);
        assert_eq!(TipoAlerta::para_dias(31), TipoAlerta::Info);
    }

    #[test]
    fn estado_serializa_em_snake_case() {
        let json = serde_json::to_string(&EstadoCertificado::PorVencer).unwrap();
        assert_eq!(json, "\"por_vencer\"");
    }
}
