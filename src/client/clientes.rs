// src/client/clientes.rs

use crate::{
    client::{ApiClient, ClientError},
    models::{
        api::Paginated,
        cliente::{Cliente, ClienteCreate, ClienteListParams, ClienteUpdate},
    },
};

#[derive(Clone)]
pub struct ClientesApi {
    api: ApiClient,
}

impl ClientesApi {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self, params: &ClienteListParams) -> Result<Paginated<Cliente>, ClientError> {
        self.api.get_query("/api/clientes", params).await
    }

    pub async fn get(&self, id: i64) -> Result<Cliente, ClientError> {
        self.api.get(&format!("/api/clientes/{}", id)).await
    }

    pub async fn create(&self, data: &ClienteCreate) -> Result<Cliente, ClientError> {
        self.api.post("/api/clientes", data).await
    }

    pub async fn update(&self, id: i64, data: &ClienteUpdate) -> Result<Cliente, ClientError> {
        self.api.put(&format!("/api/clientes/{}", id), data).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ClientError> {
        self.api.delete(&format!("/api/clientes/{}", id)).await
    }
}
