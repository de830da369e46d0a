// src/models/punto_venta.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PuntoVenta {
    pub id: i64,
    pub numero: i32,
    pub nombre: Option<String>,
    pub activo: bool,
    pub empresa_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PuntoVentaCreate {
    #[validate(range(min = 1, max = 99999, message = "El número debe estar entre 1 y 99999"))]
    pub numero: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 100, message = "El nombre no puede superar los 100 caracteres"))]
    pub nombre: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct PuntoVentaUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, max = 99999, message = "El número debe estar entre 1 y 99999"))]
    pub numero: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activo: Option<bool>,
}

/// Ponto de venda como a ARCA o informa (`FEParamGetPtosVenta`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PuntoVentaArca {
    pub numero: i32,
    pub emision_tipo: String,
    pub bloqueado: String,
    #[serde(default)]
    pub fecha_baja: Option<String>,
}

impl PuntoVentaArca {
    /// Habilitado: não bloqueado ("S") e sem data de baixa.
    pub fn habilitado(&self) -> bool {
        self.bloqueado != "S" && self.fecha_baja.as_deref().is_none_or(str::is_empty)
    }
}

/// Resultado da sincronização com a ARCA.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct SyncResultado {
    pub total_arca: usize,
    pub nuevos: usize,
    pub existentes: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn habilitado_ignora_bloqueados_e_baixados() {
        let pv = |bloqueado: &str, baja: Option<&str>| PuntoVentaArca {
            numero: 1,
            emision_tipo: "CAE".into(),
            bloqueado: bloqueado.into(),
            fecha_baja: baja.map(String::from),
        };
        assert!(pv("N", None).habilitado());
        assert!(pv("N", Some("")).habilitado());
        assert!(!pv("S", None).habilitado());
        assert!(!pv("N", Some("20240101")).habilitado());
    }
}
