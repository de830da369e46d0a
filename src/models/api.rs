// src/models/api.rs

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Resposta paginada padrão (`page` começa em 1).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
    pub pages: u32,
}

impl<T> Paginated<T> {
    /// Recorta a página pedida de uma lista já filtrada e ordenada.
    pub fn from_vec(all: Vec<T>, page: u32, per_page: u32) -> Self {
        let total = all.len() as u64;
        let page = page.max(1);
        let per_page = per_page.max(1);
        let pages = total.div_ceil(u64::from(per_page)) as u32;

        let skip = ((page - 1) as usize).saturating_mul(per_page as usize);
        let items = all.into_iter().skip(skip).take(per_page as usize).collect();

        Self { items, total, page, per_page, pages }
    }
}

/// Corpo de erro devolvido pela API: `{"detail": ...}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub detail: ErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ErrorDetail {
    Mensaje(String),
    Emision { mensaje: String, errores: Vec<String> },
    Otro(Value),
}

impl ErrorDetail {
    /// Texto legível para o usuário.
    pub fn to_message(&self) -> String {
        match self {
            ErrorDetail::Mensaje(m) => m.clone(),
            ErrorDetail::Emision { mensaje, errores } if errores.is_empty() => mensaje.clone(),
            ErrorDetail::Emision { mensaje, errores } => {
                format!("{}: {}", mensaje, errores.join(", "))
            }
            ErrorDetail::Otro(v) => v.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagina_recorta_e_conta_paginas() {
        let p = Paginated::from_vec((1..=45).collect::<Vec<i32>>(), 2, 20);
        assert_eq!(p.items.first(), Some(&21));
        assert_eq!(p.items.len(), 20);
        assert_eq!(p.total, 45);
        assert_eq!(p.pages, 3);

        let vazia = Paginated::<i32>::from_vec(vec![], 1, 30);
        assert_eq!(vazia.pages, 0);
        assert!(vazia.items.is_empty());
    }

    #[test]
    fn detalhe_de_emissao_vira_texto() {
        let body: ApiErrorBody = serde_json::from_str(
            r#"{"detail":{"mensaje":"Error de validación","errores":["Debe incluir al menos un ítem"]}}"#,
        )
        .unwrap();
        assert_eq!(
            body.detail.to_message(),
            "Error de validación: Debe incluir al menos un ítem"
        );

        let simples: ApiErrorBody = serde_json::from_str(r#"{"detail":"CUIT inválido"}"#).unwrap();
        assert_eq!(simples.detail.to_message(), "CUIT inválido");
    }
}
