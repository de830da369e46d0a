// src/handlers/empresas.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use validator::Validate;

use crate::{
    common::{error::AppError, extract::AppJson},
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::empresa::{Empresa, EmpresaCreate, EmpresaUpdate},
};

fn no_encontrada() -> AppError {
    AppError::NotFound("Empresa no encontrada".to_string())
}

// GET /api/empresas
pub async fn list_empresas(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<Empresa>>, AppError> {
    user.requiere_admin()?;
    Ok(Json(app_state.empresa_repo.list().await))
}

// POST /api/empresas
pub async fn create_empresa(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    AppJson(payload): AppJson<EmpresaCreate>,
) -> Result<impl IntoResponse, AppError> {
    user.requiere_admin()?;
    payload.validate().map_err(AppError::ValidationError)?;

    if app_state.empresa_repo.find_by_cuit(&payload.cuit).await.is_some() {
        return Err(AppError::BadRequest(format!(
            "Ya existe una empresa con el CUIT {}",
            payload.cuit
        )));
    }

    let empresa = app_state.empresa_repo.create(payload, Utc::now()).await;
    tracing::info!("🏢 Empresa {} criada ({})", empresa.id, empresa.cuit);
    Ok((StatusCode::CREATED, Json(empresa)))
}

// GET /api/empresas/{id}
pub async fn get_empresa(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<Json<Empresa>, AppError> {
    let empresa = app_state.empresa_repo.find_by_id(id).await.ok_or_else(no_encontrada)?;
    user.verificar_acceso(empresa.id, "ver esta empresa")?;
    Ok(Json(empresa))
}

// PUT /api/empresas/{id}
pub async fn update_empresa(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
    AppJson(payload): AppJson<EmpresaUpdate>,
) -> Result<Json<Empresa>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let empresa = app_state.empresa_repo.find_by_id(id).await.ok_or_else(no_encontrada)?;
    user.verificar_acceso(empresa.id, "actualizar esta empresa")?;

    if let Some(cuit) = payload.cuit.as_deref().filter(|c| *c != empresa.cuit) {
        if app_state.empresa_repo.find_by_cuit(cuit).await.is_some() {
            return Err(AppError::BadRequest(format!("Ya existe una empresa con el CUIT {}", cuit)));
        }
    }

    let empresa = app_state
        .empresa_repo
        .update(id, payload, Utc::now())
        .await
        .ok_or_else(no_encontrada)?;
    Ok(Json(empresa))
}

// DELETE /api/empresas/{id}
pub async fn delete_empresa(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    user.requiere_admin()?;
    if !app_state.empresa_repo.delete(id).await {
        return Err(no_encontrada());
    }
    tracing::info!("🗑️ Empresa {} removida", id);
    Ok(StatusCode::NO_CONTENT)
}
