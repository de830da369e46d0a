// src/client/arca.rs

use crate::{
    client::{ApiClient, ClientError},
    models::{
        arca::{ArcaStatus, ArcaTestResponse},
        punto_venta::PuntoVentaArca,
    },
};

#[derive(Clone)]
pub struct ArcaApi {
    api: ApiClient,
}

impl ArcaApi {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn status(&self) -> Result<ArcaStatus, ClientError> {
        self.api.get("/api/arca/status").await
    }

    pub async fn test_connection(&self) -> Result<ArcaTestResponse, ClientError> {
        self.api.post_empty("/api/arca/test").await
    }

    pub async fn puntos_venta(&self) -> Result<Vec<PuntoVentaArca>, ClientError> {
        self.api.get("/api/arca/puntos-venta").await
    }
}
