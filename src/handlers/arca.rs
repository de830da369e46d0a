// src/handlers/arca.rs

use axum::{extract::State, Json};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::{
        arca::{ArcaStatus, ArcaTestResponse},
        punto_venta::PuntoVentaArca,
    },
};

// GET /api/arca/status
pub async fn status(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<ArcaStatus>, AppError> {
    let empresa_id = user.empresa_id()?;
    Ok(Json(app_state.arca_service.status(empresa_id).await))
}

// POST /api/arca/test
pub async fn test_conexion(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<ArcaTestResponse>, AppError> {
    let empresa_id = user.empresa_id()?;
    Ok(Json(app_state.arca_service.test_conexion(empresa_id).await?))
}

// GET /api/arca/puntos-venta
pub async fn puntos_venta(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<PuntoVentaArca>>, AppError> {
    let empresa_id = user.empresa_id()?;
    Ok(Json(app_state.arca_service.puntos_venta(empresa_id).await?))
}
