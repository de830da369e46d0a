// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Usuario {
    pub id: i64,
    pub email: String,
    pub nombre: String,
    pub empresa_id: Option<i64>,
    pub activo: bool,
    pub es_admin: bool,
    pub created_at: DateTime<Utc>,
    pub ultimo_login: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginCredentials {
    #[validate(email(message = "Email inválido"))]
    pub email: String,
    #[validate(length(min = 1, message = "La contraseña es obligatoria"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub user: Usuario,
}

/// Dados do primeiro administrador (`/auth/setup`).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SetupData {
    #[validate(email(message = "Email inválido"))]
    pub email: String,
    #[validate(length(min = 6, message = "La contraseña debe tener al menos 6 caracteres"))]
    pub password: String,
    #[validate(length(min = 1, max = 100, message = "El nombre es obligatorio"))]
    pub nombre: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empresa_id: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // email do usuário
    pub uid: i64,
    pub exp: usize,
    pub iat: usize,
}
