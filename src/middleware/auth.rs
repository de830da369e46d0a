// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};

use crate::{common::error::AppError, config::AppState, models::auth::Usuario};

// O middleware em si
pub async fn auth_guard(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .typed_get::<Authorization<Bearer>>()
        .map(|auth| auth.token().to_owned())
        .ok_or(AppError::NotAuthenticated)?;

    let usuario = app_state.auth_service.validate_token(&token).await?;

    // Insere o usuário nos "extensions" da requisição
    request.extensions_mut().insert(AuthenticatedUser(usuario));
    Ok(next.run(request).await)
}

// Extrator para obter o usuário autenticado diretamente nos handlers
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Usuario);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(AppError::NotAuthenticated)
    }
}

impl AuthenticatedUser {
    /// Empresa à qual o usuário está vinculado.
    pub fn empresa_id(&self) -> Result<i64, AppError> {
        self.0
            .empresa_id
            .ok_or_else(|| AppError::Forbidden("Usuario no tiene empresa asignada".to_string()))
    }

    /// `None` para administradores (veem tudo), senão a empresa do usuário.
    pub fn alcance(&self) -> Result<Option<i64>, AppError> {
        if self.0.es_admin {
            Ok(None)
        } else {
            self.empresa_id().map(Some)
        }
    }

    /// Ex.: `verificar_acceso(3, "ver este cliente")`.
    pub fn verificar_acceso(&self, empresa_id: i64, accion: &str) -> Result<(), AppError> {
        if self.0.es_admin || self.0.empresa_id == Some(empresa_id) {
            Ok(())
        } else {
            Err(AppError::Forbidden(format!("No tienes permiso para {}", accion)))
        }
    }

    pub fn requiere_admin(&self) -> Result<(), AppError> {
        if self.0.es_admin {
            Ok(())
        } else {
            Err(AppError::Forbidden("No tienes permisos de administrador".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn usuario(es_admin: bool, empresa_id: Option<i64>) -> AuthenticatedUser {
        AuthenticatedUser(Usuario {
            id: 1,
            email: "u@factuflow.com".into(),
            nombre: "U".into(),
            empresa_id,
            activo: true,
            es_admin,
            created_at: Utc::now(),
            ultimo_login: None,
        })
    }

    #[test]
    fn admin_enxerga_todas_as_empresas() {
        let admin = usuario(true, Some(1));
        assert_eq!(admin.alcance().unwrap(), None);
        assert!(admin.verificar_acceso(99, "ver este cliente").is_ok());
    }

    #[test]
    fn usuario_comum_fica_restrito_a_sua_empresa() {
        let u = usuario(false, Some(2));
        assert_eq!(u.alcance().unwrap(), Some(2));
        assert!(u.verificar_acceso(2, "ver este cliente").is_ok());
        let err = u.verificar_acceso(1, "eliminar este cliente").unwrap_err();
        assert_eq!(err.to_string(), "No tienes permiso para eliminar este cliente");
        assert!(matches!(u.requiere_admin(), Err(AppError::Forbidden(_))));
    }

    #[test]
    fn sem_empresa_e_proibido() {
        let u = usuario(false, None);
        assert!(matches!(u.alcance(), Err(AppError::Forbidden(_))));
    }
}
