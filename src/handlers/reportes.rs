// src/handlers/reportes.rs

use axum::{extract::State, Json};

use crate::{
    common::{error::AppError, extract::AppQuery},
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::reporte::{IvaQuery, PeriodoQuery, RankingCliente, RankingQuery, ReporteIva, ReporteVentas},
};

const VER_REPORTES: &str = "ver los reportes de esta empresa";

// GET /api/reportes/ventas?empresa_id&desde&hasta
pub async fn reporte_ventas(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    AppQuery(query): AppQuery<PeriodoQuery>,
) -> Result<Json<ReporteVentas>, AppError> {
    user.verificar_acceso(query.empresa_id, VER_REPORTES)?;
    let reporte = app_state
        .reportes_service
        .ventas(query.empresa_id, query.desde, query.hasta)
        .await?;
    Ok(Json(reporte))
}

// GET /api/reportes/iva-ventas?empresa_id&periodo_mes&periodo_anio
pub async fn reporte_iva_ventas(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    AppQuery(query): AppQuery<IvaQuery>,
) -> Result<Json<ReporteIva>, AppError> {
    user.verificar_acceso(query.empresa_id, VER_REPORTES)?;
    let reporte = app_state
        .reportes_service
        .iva_ventas(query.empresa_id, query.periodo_mes, query.periodo_anio)
        .await?;
    Ok(Json(reporte))
}

// GET /api/reportes/clientes?empresa_id&desde&hasta&limite
pub async fn ranking_clientes(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    AppQuery(query): AppQuery<RankingQuery>,
) -> Result<Json<Vec<RankingCliente>>, AppError> {
    user.verificar_acceso(query.empresa_id, VER_REPORTES)?;
    let ranking = app_state
        .reportes_service
        .ranking_clientes(query.empresa_id, query.desde, query.hasta, query.limite)
        .await?;
    Ok(Json(ranking))
}
