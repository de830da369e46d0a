// src/stores/auth.rs

use serde::{Deserialize, Serialize};

use crate::{
    client::{ApiClient, ClientError},
    models::auth::{LoginCredentials, LoginResponse, SetupData, Usuario},
};

/// O que a aplicação persiste entre execuções (equivalente ao armazenamento local do navegador).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SessionSnapshot {
    pub token: Option<String>,
    pub user: Option<Usuario>,
}

pub struct AuthStore {
    client: ApiClient,
    pub user: Option<Usuario>,
    pub token: Option<String>,
    pub is_authenticated: bool,
    pub loading: bool,
}

impl AuthStore {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            user: None,
            token: None,
            is_authenticated: false,
            loading: false,
        }
    }

    /// Restaura a sessão só quando token e usuário estão presentes.
    pub fn init(&mut self, snapshot: SessionSnapshot) {
        if let (Some(token), Some(user)) = (snapshot.token, snapshot.user) {
            self.client.set_token(Some(token.clone()));
            self.token = Some(token);
            self.user = Some(user);
            self.is_authenticated = true;
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            token: self.token.clone(),
            user: self.user.clone(),
        }
    }

    pub async fn login(&mut self, credentials: &LoginCredentials) -> Result<LoginResponse, ClientError> {
        self.loading = true;
        let result = self.client.auth().login(credentials).await;
        self.loading = false;

        let response = result?;
        tracing::info!("Sessão iniciada para {}", response.user.email);
        self.token = Some(response.access_token.clone());
        self.user = Some(response.user.clone());
        self.is_authenticated = true;
        Ok(response)
    }

    pub fn logout(&mut self) {
        self.client.auth().logout();
        self.token = None;
        self.user = None;
        self.is_authenticated = false;
    }

    /// Revalida o token com `/auth/me`; qualquer falha encerra a sessão.
    pub async fn check_auth(&mut self) -> bool {
        if self.token.is_none() {
            return false;
        }

        match self.client.auth().me().await {
            Ok(user) => {
                self.user = Some(user);
                self.is_authenticated = true;
                true
            }
            Err(e) => {
                tracing::warn!("Sessão inválida: {}", e);
                self.logout();
                false
            }
        }
    }

    pub async fn setup(&mut self, data: &SetupData) -> Result<Usuario, ClientError> {
        self.loading = true;
        let result = self.client.auth().setup(data).await;
        self.loading = false;
        result
    }
}
