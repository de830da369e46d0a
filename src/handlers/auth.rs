// src/handlers/auth.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::{error::AppError, extract::AppJson},
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::auth::{LoginCredentials, LoginResponse, SetupData, Usuario},
};

// POST /api/auth/login
pub async fn login(
    State(app_state): State<AppState>,
    AppJson(payload): AppJson<LoginCredentials>,
) -> Result<Json<LoginResponse>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let response = app_state
        .auth_service
        .login(&payload.email, &payload.password)
        .await?;

    Ok(Json(response))
}

// GET /api/auth/me
pub async fn me(AuthenticatedUser(usuario): AuthenticatedUser) -> Json<Usuario> {
    Json(usuario)
}

// POST /api/auth/setup
// A existência de usuários é checada antes do payload: 400 mesmo com corpo inválido.
pub async fn setup(
    State(app_state): State<AppState>,
    AppJson(payload): AppJson<SetupData>,
) -> Result<impl IntoResponse, AppError> {
    if app_state.usuario_repo.count().await > 0 {
        return Err(AppError::BadRequest(
            "Ya existe al menos un usuario en el sistema. Use /api/auth/login para iniciar sesión.".to_string(),
        ));
    }
    payload.validate().map_err(AppError::ValidationError)?;

    let usuario = app_state.auth_service.setup(&payload).await?;
    Ok((StatusCode::CREATED, Json(usuario)))
}
