// src/handlers/puntos_venta.rs

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
    models::punto_venta::{PuntoVenta, PuntoVentaCreate, PuntoVentaUpdate},
};

fn no_encontrado() -> AppError {
    AppError::NotFound("Punto de venta no encontrado".to_string())
}

fn duplicado(numero: i32) -> AppError {
    AppError::BadRequest(format!("Ya existe un punto de venta con el número {}", numero))
}

// GET /api/puntos-venta
pub async fn list_puntos_venta(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<PuntoVenta>>, AppError> {
    let alcance = user.alcance()?;
    Ok(Json(app_state.punto_venta_repo.list(alcance).await))
}

// POST /api/puntos-venta
pub async fn create_punto_venta(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    AppJson(payload): AppJson<PuntoVentaCreate>,
) -> Result<impl IntoResponse, AppError> {
    let empresa_id = user.empresa_id()?;
    payload.validate().map_err(AppError::ValidationError)?;

    if app_state
        .punto_venta_repo
        .find_by_numero(empresa_id, payload.numero)
        .await
        .is_some()
    {
        return Err(duplicado(payload.numero));
    }

    let punto_venta = app_state.punto_venta_repo.create(empresa_id, payload, Utc::now()).await;
    Ok((StatusCode::CREATED, Json(punto_venta)))
}

// PUT /api/puntos-venta/{id}
pub async fn update_punto_venta(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
    AppJson(payload): AppJson<PuntoVentaUpdate>,
) -> Result<Json<PuntoVenta>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let actual = app_state.punto_venta_repo.find_by_id(id).await.ok_or_else(no_encontrado)?;
    user.verificar_acceso(actual.empresa_id, "actualizar este punto de venta")?;

    if let Some(numero) = payload.numero.filter(|n| *n != actual.numero) {
        if app_state
            .punto_venta_repo
            .find_by_numero(actual.empresa_id, numero)
            .await
            .is_some()
        {
            return Err(duplicado(numero));
        }
    }

    let punto_venta = app_state
        .punto_venta_repo
        .update(id, payload)
        .await
        .ok_or_else(no_encontrado)?;
    Ok(Json(punto_venta))
}

// DELETE /api/puntos-venta/{id}
// Exclusão lógica: o ponto de venda fica inativo.
pub async fn delete_punto_venta(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let actual = app_state.punto_venta_repo.find_by_id(id).await.ok_or_else(no_encontrado)?;
    user.verificar_acceso(actual.empresa_id, "eliminar este punto de venta")?;

    app_state.punto_venta_repo.desactivar(id).await;
    Ok(StatusCode::NO_CONTENT)
}
