// src/handlers/pdf.rs

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    services::pdf_service::PdfGenerado,
};

async fn gerar(app_state: &AppState, user: &AuthenticatedUser, id: i64) -> Result<PdfGenerado, AppError> {
    let empresa_id = app_state.pdf_service.empresa_del_comprobante(id).await?;
    user.verificar_acceso(empresa_id, "ver este comprobante")?;
    app_state.pdf_service.generar(id).await
}

// GET /api/pdf/comprobante/{id}
pub async fn descargar_pdf(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    let pdf = gerar(&app_state, &user, id).await?;

    // Configura os Headers para o navegador baixar o PDF
    let disposition = format!("attachment; filename=\"{}\"", pdf.filename);
    let headers = [
        (header::CONTENT_TYPE, "application/pdf"),
        (header::CONTENT_DISPOSITION, disposition.as_str()),
    ];
    Ok((headers, pdf.contenido).into_response())
}

// GET /api/pdf/comprobante/{id}/preview
pub async fn preview_pdf(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    let pdf = gerar(&app_state, &user, id).await?;
    let headers = [
        (header::CONTENT_TYPE, "application/pdf"),
        (header::CONTENT_DISPOSITION, "inline"),
    ];
    Ok((headers, pdf.contenido).into_response())
}
