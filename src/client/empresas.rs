// src/client/empresas.rs

use crate::{
    client::{ApiClient, ClientError},
    models::empresa::{Empresa, EmpresaCreate, EmpresaUpdate},
};

#[derive(Clone)]
pub struct EmpresasApi {
    api: ApiClient,
}

impl EmpresasApi {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<Empresa>, ClientError> {
        self.api.get("/api/empresas").await
    }

    pub async fn get(&self, id: i64) -> Result<Empresa, ClientError> {
        self.api.get(&format!("/api/empresas/{}", id)).await
    }

    pub async fn create(&self, data: &EmpresaCreate) -> Result<Empresa, ClientError> {
        self.api.post("/api/empresas", data).await
    }

    pub async fn update(&self, id: i64, data: &EmpresaUpdate) -> Result<Empresa, ClientError> {
        self.api.put(&format!("/api/empresas/{}", id), data).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ClientError> {
        self.api.delete(&format!("/api/empresas/{}", id)).await
    }
}
