// src/handlers/certificados.rs

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
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
    models::certificado::{
        Ambiente, Certificado, CertificadoAlerta, ClavesQuery, GenerarCsrRequest, GenerarCsrResponse,
        VerificacionResponse,
    },
    services::certificados_service::SubidaCertificado,
};

async fn buscar_certificado(app_state: &AppState, id: i64) -> Result<Certificado, AppError> {
    app_state
        .certificado_repo
        .find_by_id(id, Utc::now().date_naive())
        .await
        .ok_or_else(|| AppError::not_found("Certificado"))
}

// GET /api/certificados
pub async fn list_certificados(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<Certificado>>, AppError> {
    let alcance = user.alcance()?;
    let certificados = app_state
        .certificado_repo
        .list(alcance, Utc::now().date_naive())
        .await;
    Ok(Json(certificados))
}

// GET /api/certificados/{id}
pub async fn get_certificado(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<Json<Certificado>, AppError> {
    let certificado = buscar_certificado(&app_state, id).await?;
    user.verificar_acceso(certificado.empresa_id, "ver este certificado")?;
    Ok(Json(certificado))
}

// DELETE /api/certificados/{id}
pub async fn delete_certificado(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let certificado = buscar_certificado(&app_state, id).await?;
    user.verificar_acceso(certificado.empresa_id, "eliminar este certificado")?;

    app_state.certificado_repo.delete(id).await;
    tracing::info!("🗑️ Certificado {} removido", id);
    Ok(StatusCode::NO_CONTENT)
}

// POST /api/certificados/generar-csr
pub async fn generar_csr(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    AppJson(payload): AppJson<GenerarCsrRequest>,
) -> Result<Json<GenerarCsrResponse>, AppError> {
    user.empresa_id()?;
    payload.validate().map_err(AppError::ValidationError)?;

    let response = app_state
        .certificados_service
        .generar_csr(&payload, Utc::now())
        .await?;
    Ok(Json(response))
}

// POST /api/certificados/subir-certificado (multipart)
// Campos: file, cuit, nombre, ambiente e key_filename.
pub async fn subir_certificado(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Certificado>), AppError> {
    let empresa_id = user.empresa_id()?;

    let mut contenido = None;
    let mut cuit = None;
    let mut nombre = None;
    let mut ambiente = None;
    let mut key_filename = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => contenido = Some(field.bytes().await?.to_vec()),
            "cuit" => cuit = Some(field.text().await?),
            "nombre" => nombre = Some(field.text().await?),
            "ambiente" => ambiente = Some(field.text().await?),
            "key_filename" => key_filename = Some(field.text().await?),
            _ => {}
        }
    }

    let falta = |campo: &str| AppError::Unprocessable(format!("Falta el campo '{}'", campo));
    let ambiente = ambiente.ok_or_else(|| falta("ambiente"))?;
    let subida = SubidaCertificado {
        contenido: contenido.ok_or_else(|| falta("file"))?,
        cuit: cuit.ok_or_else(|| falta("cuit"))?,
        nombre: nombre.ok_or_else(|| falta("nombre"))?,
        ambiente: Ambiente::desde_texto(&ambiente)
            .ok_or_else(|| AppError::Unprocessable(format!("Ambiente inválido: {}", ambiente)))?,
        key_filename: key_filename.ok_or_else(|| falta("key_filename"))?,
    };

    let certificado = app_state
        .certificados_service
        .subir_certificado(empresa_id, subida, Utc::now())
        .await?;
    Ok((StatusCode::CREATED, Json(certificado)))
}

// POST /api/certificados/verificar-conexion/{id}
pub async fn verificar_conexion(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<Json<VerificacionResponse>, AppError> {
    let certificado = buscar_certificado(&app_state, id).await?;
    user.verificar_acceso(certificado.empresa_id, "ver este certificado")?;

    Ok(Json(app_state.certificados_service.verificar_conexion(&certificado).await))
}

// GET /api/certificados/alertas-vencimiento
pub async fn alertas_vencimiento(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<CertificadoAlerta>>, AppError> {
    let alcance = user.alcance()?;
    let alertas = app_state
        .certificados_service
        .alertas(alcance, Utc::now().date_naive())
        .await;
    Ok(Json(alertas))
}

// GET /api/certificados/keys?cuit=...&ambiente=...
pub async fn listar_claves(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    AppQuery(query): AppQuery<ClavesQuery>,
) -> Result<Json<Vec<String>>, AppError> {
    let empresa_id = user.empresa_id()?;
    if !user.0.es_admin {
        let propia = app_state
            .empresa_repo
            .find_by_id(empresa_id)
            .await
            .is_some_and(|e| e.cuit == query.cuit);
        if !propia {
            return Err(AppError::Forbidden(
                "No tienes permiso para ver las claves de este CUIT".to_string(),
            ));
        }
    }

    let claves = app_state
        .certificados_service
        .listar_claves(&query.cuit, query.ambiente)
        .await;
    Ok(Json(claves))
}
