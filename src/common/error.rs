// src/common/error.rs

use axum::{
    extract::{
        multipart::MultipartError,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Todos os erros da API viram `{"detail": ...}`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("{0}")]
    Unprocessable(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("No autenticado")]
    NotAuthenticated,

    #[error("Email o contraseña incorrectos")]
    InvalidCredentials,

    #[error("No se pudo validar las credenciales")]
    InvalidToken,

    #[error("Usuario inactivo")]
    InactiveUser,

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    // Falha na emissão de comprovante: detalhe estruturado
    #[error("{mensaje}")]
    Emision { mensaje: String, errores: Vec<String> },

    #[error("JSON inválido: {0}")]
    JsonRejection(#[from] JsonRejection),

    #[error("Parámetros inválidos: {0}")]
    QueryRejection(#[from] QueryRejection),

    #[error("Formulario inválido: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Error al generar PDF: {0}")]
    Pdf(String),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    pub fn not_found(what: &str) -> Self {
        AppError::NotFound(format!("{} no encontrado", what))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::Unprocessable(_)
            | AppError::JsonRejection(_)
            | AppError::QueryRejection(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::BadRequest(_) | AppError::Emision { .. } | AppError::Multipart(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotAuthenticated | AppError::InvalidCredentials | AppError::InvalidToken => {
                StatusCode::UNAUTHORIZED
            }
            AppError::InactiveUser | AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Pdf(_)
            | AppError::InternalServerError(_)
            | AppError::BcryptError(_)
            | AppError::JwtError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Primeira mensagem encontrada nos erros do `validator` (campos ou `__all__`).
fn primeira_mensagem(errors: &validator::ValidationErrors) -> String {
    let mut campos: Vec<_> = errors.field_errors().into_iter().collect();
    campos.sort_by(|a, b| a.0.cmp(&b.0));

    for (campo, lista) in &campos {
        if let Some(e) = lista.first() {
            return match &e.message {
                Some(m) => m.to_string(),
                None => format!("Valor inválido en '{}'", campo),
            };
        }
    }

    // Erros aninhados (itens do comprovante)
    for (_, kind) in errors.errors() {
        match kind {
            validator::ValidationErrorsKind::Struct(inner) => return primeira_mensagem(inner),
            validator::ValidationErrorsKind::List(map) => {
                if let Some(inner) = map.values().next() {
                    return primeira_mensagem(inner);
                }
            }
            validator::ValidationErrorsKind::Field(_) => {}
        }
    }

    "Datos inválidos".to_string()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let detail = match &self {
            AppError::ValidationError(errors) => {
                let msg = primeira_mensagem(errors);
                tracing::warn!("Validação rejeitada: {}", msg);
                json!(msg)
            }
            AppError::Emision { mensaje, errores } => {
                tracing::warn!("Emissão rejeitada: {} {:?}", mensaje, errores);
                json!({ "mensaje": mensaje, "errores": errores })
            }
            AppError::JsonRejection(r) => json!(r.body_text()),
            AppError::QueryRejection(r) => json!(r.body_text()),
            AppError::InternalServerError(_) | AppError::BcryptError(_) | AppError::JwtError(_) => {
                // O `tracing` loga a mensagem detalhada; o cliente recebe só o genérico.
                tracing::error!("Erro Interno do Servidor: {:?}", self);
                json!("Error interno del servidor")
            }
            other => json!(other.to_string()),
        };

        let body = Json(json!({ "detail": detail }));
        if status == StatusCode::UNAUTHORIZED {
            return (status, [(header::WWW_AUTHENTICATE, "Bearer")], body).into_response();
        }
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn corpo(err: AppError) -> (StatusCode, Value) {
        let resp = err.into_response();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn emissao_tem_detalhe_estruturado() {
        let (status, body) = corpo(AppError::Emision {
            mensaje: "Error de validación".into(),
            errores: vec!["Debe incluir al menos un ítem".into()],
        })
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"]["errores"][0], "Debe incluir al menos un ítem");
    }

    #[tokio::test]
    async fn nao_encontrado_vira_404() {
        let (status, body) = corpo(AppError::not_found("Cliente")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Cliente no encontrado");
    }

    #[tokio::test]
    async fn erro_interno_nao_vaza_detalhes() {
        let (status, body) = corpo(AppError::InternalServerError(anyhow::anyhow!("segredo"))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["detail"], "Error interno del servidor");
    }
}
