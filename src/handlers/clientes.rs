// src/handlers/clientes.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
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
        cliente::{validar_documento, Cliente, ClienteCreate, ClienteListParams, ClienteUpdate},
    },
};

const PER_PAGE_POR_DEFECTO: u32 = 30;

async fn buscar_cliente(app_state: &AppState, id: i64) -> Result<Cliente, AppError> {
    app_state
        .cliente_repo
        .find_by_id(id)
        .await
        .ok_or_else(|| AppError::not_found("Cliente"))
}

// GET /api/clientes
pub async fn list_clientes(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    AppQuery(params): AppQuery<ClienteListParams>,
) -> Result<Json<Paginated<Cliente>>, AppError> {
    let page = params.page.unwrap_or(1);
    let per_page = params.per_page.unwrap_or(PER_PAGE_POR_DEFECTO);
    if page < 1 {
        return Err(AppError::Unprocessable("La página debe ser mayor o igual a 1".to_string()));
    }
    if !(1..=100).contains(&per_page) {
        return Err(AppError::Unprocessable("per_page debe estar entre 1 y 100".to_string()));
    }

    let alcance = user.alcance()?;
    let clientes = app_state.cliente_repo.list(alcance, &params).await;
    Ok(Json(Paginated::from_vec(clientes, page, per_page)))
}

// POST /api/clientes
pub async fn create_cliente(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    AppJson(payload): AppJson<ClienteCreate>,
) -> Result<impl IntoResponse, AppError> {
    let empresa_id = user.empresa_id()?;
    payload.validate().map_err(AppError::ValidationError)?;

    let cliente = app_state.cliente_repo.create(empresa_id, payload, Utc::now()).await;
    Ok((StatusCode::CREATED, Json(cliente)))
}

// GET /api/clientes/{id}
pub async fn get_cliente(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<Json<Cliente>, AppError> {
    let cliente = buscar_cliente(&app_state, id).await?;
    user.verificar_acceso(cliente.empresa_id, "ver este cliente")?;
    Ok(Json(cliente))
}

// PUT /api/clientes/{id}
pub async fn update_cliente(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
    AppJson(payload): AppJson<ClienteUpdate>,
) -> Result<Json<Cliente>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let actual = buscar_cliente(&app_state, id).await?;
    user.verificar_acceso(actual.empresa_id, "actualizar este cliente")?;

    // O documento resultante (parcial + atual) precisa continuar válido
    let tipo = payload.tipo_documento.unwrap_or(actual.tipo_documento);
    let numero = payload.numero_documento.as_deref().unwrap_or(&actual.numero_documento);
    validar_documento(tipo, numero).map_err(|e| {
        AppError::Unprocessable(
            e.message
                .map(|m| m.to_string())
                .unwrap_or_else(|| "Documento inválido".to_string()),
        )
    })?;

    let cliente = app_state
        .cliente_repo
        .update(id, payload, Utc::now())
        .await
        .ok_or_else(|| AppError::not_found("Cliente"))?;
    Ok(Json(cliente))
}

// DELETE /api/clientes/{id}
// Exclusão lógica: o cliente fica inativo.
pub async fn delete_cliente(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let cliente = buscar_cliente(&app_state, id).await?;
    user.verificar_acceso(cliente.empresa_id, "eliminar este cliente")?;

    app_state.cliente_repo.desactivar(id, Utc::now()).await;
    Ok(StatusCode::NO_CONTENT)
}
