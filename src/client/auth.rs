// src/client/auth.rs

use serde_json::json;

use crate::{
    client::{ApiClient, ClientError},
    models::auth::{LoginCredentials, LoginResponse, SetupData, Usuario},
};

#[derive(Clone)]
pub struct AuthApi {
    api: ApiClient,
}

impl AuthApi {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Em caso de sucesso o token passa a ser enviado em todas as requisições.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<LoginResponse, ClientError> {
        let response: LoginResponse = self.api.post("/api/auth/login", credentials).await?;
        self.api.set_token(Some(response.access_token.clone()));
        Ok(response)
    }

    pub async fn me(&self) -> Result<Usuario, ClientError> {
        self.api.get("/api/auth/me").await
    }

    pub async fn setup(&self, data: &SetupData) -> Result<Usuario, ClientError> {
        self.api.post("/api/auth/setup", data).await
    }

    /// Sonda o endpoint de setup com um corpo inválido: 400 significa que já há usuários.
    pub async fn check_setup_required(&self) -> Result<bool, ClientError> {
        let sonda = json!({ "email": "test@test.com", "password": "test", "nombre": "test" });
        match self.api.post::<Usuario, _>("/api/auth/setup", &sonda).await {
            Ok(_) => Ok(true),
            Err(ClientError::Api { status: 400, .. }) => Ok(false),
            Err(ClientError::Api { status: 422, .. }) => Ok(true),
            Err(ClientError::Api { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    pub fn logout(&self) {
        self.api.set_token(None);
    }
}
