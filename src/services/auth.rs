// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::{
    common::error::AppError,
    db::{usuario_repo::NuevoUsuario, UsuarioRepository},
    models::auth::{Claims, LoginResponse, SetupData, Usuario},
};

#[derive(Clone)]
pub struct AuthService {
    usuario_repo: UsuarioRepository,
    jwt_secret: String,
    expiracion_minutos: i64,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(usuario_repo: UsuarioRepository, jwt_secret: String, expiracion_minutos: i64, bcrypt_cost: u32) -> Self {
        Self {
            usuario_repo,
            jwt_secret,
            expiracion_minutos,
            bcrypt_cost,
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, AppError> {
        let registro = self
            .usuario_repo
            .find_by_email(email)
            .await
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = registro.hashed_password.clone();

        // Executa a verificação em um thread separado
        let is_password_valid = tokio::task::spawn_blocking(move || verify(&password_clone, &password_hash_clone))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            tracing::warn!("Tentativa de login inválida para {}", email);
            return Err(AppError::InvalidCredentials);
        }

        if !registro.usuario.activo {
            return Err(AppError::InactiveUser);
        }

        let usuario = self
            .usuario_repo
            .registrar_login(registro.usuario.id, Utc::now())
            .await
            .ok_or(AppError::InvalidCredentials)?;

        let access_token = self.create_token(&usuario)?;
        tracing::info!("🔑 Login de {}", usuario.email);

        Ok(LoginResponse {
            access_token,
            token_type: "bearer".to_string(),
            user: usuario,
        })
    }

    /// Cria o primeiro administrador; falha se já houver qualquer usuário.
    pub async fn setup(&self, data: &SetupData) -> Result<Usuario, AppError> {
        let hashed_password = self.hash_password(&data.password).await?;

        let usuario = self
            .usuario_repo
            .create_si_vacio(
                NuevoUsuario {
                    email: &data.email,
                    hashed_password: &hashed_password,
                    nombre: &data.nombre,
                    empresa_id: data.empresa_id,
                    es_admin: true,
                },
                Utc::now(),
            )
            .await
            .ok_or_else(|| {
                AppError::BadRequest(
                    "Ya existe al menos un usuario en el sistema. Use /api/auth/login para iniciar sesión."
                        .to_string(),
                )
            })?;

        tracing::info!("👤 Administrador inicial criado: {}", usuario.email);
        Ok(usuario)
    }

    pub async fn validate_token(&self, token: &str) -> Result<Usuario, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        let usuario = self
            .usuario_repo
            .find_by_id(token_data.claims.uid)
            .await
            .ok_or(AppError::InvalidToken)?;

        if !usuario.activo {
            return Err(AppError::InactiveUser);
        }
        Ok(usuario)
    }

    pub async fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let password_clone = password.to_owned();
        let cost = self.bcrypt_cost;
        let hashed = tokio::task::spawn_blocking(move || hash(&password_clone, cost))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;
        Ok(hashed)
    }

    fn create_token(&self, usuario: &Usuario) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + Duration::minutes(self.expiracion_minutos);

        let claims = Claims {
            sub: usuario.email.clone(),
            uid: usuario.id,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}
