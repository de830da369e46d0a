// src/handlers/comprobantes.rs

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use validator::Validate;

use crate::{
    common::{
        error::AppError,
        extract::{AppJson, AppQuery},
    },
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::{
        api::Paginated,
        comprobante::{
            ComprobanteDetalle, ComprobanteListItem, EmitirComprobanteRequest, EmitirComprobanteResponse,
            ListarComprobantesParams, ProximoNumeroQuery, ProximoNumeroResponse,
        },
    },
};

const VER_COMPROBANTES: &str = "ver los comprobantes de esta empresa";

// GET /api/comprobantes?empresa_id=...
pub async fn listar_comprobantes(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    AppQuery(params): AppQuery<ListarComprobantesParams>,
) -> Result<Json<Paginated<ComprobanteListItem>>, AppError> {
    let empresa_id = params
        .empresa_id
        .ok_or_else(|| AppError::Unprocessable("El parámetro empresa_id es obligatorio".to_string()))?;
    if params.page == Some(0) {
        return Err(AppError::Unprocessable("La página debe ser mayor o igual a 1".to_string()));
    }
    if params.per_page.is_some_and(|p| !(1..=100).contains(&p)) {
        return Err(AppError::Unprocessable("per_page debe estar entre 1 y 100".to_string()));
    }
    user.verificar_acceso(empresa_id, VER_COMPROBANTES)?;

    Ok(Json(app_state.facturacion_service.listar(empresa_id, &params).await))
}

// GET /api/comprobantes/{id}
pub async fn obtener_comprobante(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<Json<ComprobanteDetalle>, AppError> {
    let detalle = app_state.facturacion_service.obtener(id).await?;
    user.verificar_acceso(detalle.comprobante.empresa_id, "ver este comprobante")?;
    Ok(Json(detalle))
}

// POST /api/comprobantes/emitir
pub async fn emitir_comprobante(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    AppJson(payload): AppJson<EmitirComprobanteRequest>,
) -> Result<Json<EmitirComprobanteResponse>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    user.verificar_acceso(payload.empresa_id, "emitir comprobantes para esta empresa")?;

    let response = app_state
        .facturacion_service
        .emitir(payload, Utc::now().date_naive())
        .await?;
    Ok(Json(response))
}

// GET /api/comprobantes/proximo-numero/{punto_venta}/{tipo}?empresa_id=...
pub async fn proximo_numero(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path((punto_venta, tipo)): Path<(i32, i32)>,
    AppQuery(query): AppQuery<ProximoNumeroQuery>,
) -> Result<Json<ProximoNumeroResponse>, AppError> {
    user.verificar_acceso(query.empresa_id, VER_COMPROBANTES)?;

    let response = app_state
        .facturacion_service
        .proximo_numero(query.empresa_id, punto_venta, tipo)
        .await?;
    Ok(Json(response))
}
