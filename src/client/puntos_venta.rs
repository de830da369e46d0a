// src/client/puntos_venta.rs

use crate::{
    client::{ApiClient, ClientError},
    models::punto_venta::{PuntoVenta, PuntoVentaCreate, PuntoVentaUpdate},
};

#[derive(Clone)]
pub struct PuntosVentaApi {
    api: ApiClient,
}

impl PuntosVentaApi {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<PuntoVenta>, ClientError> {
        self.api.get("/api/puntos-venta").await
    }

    pub async fn create(&self, data: &PuntoVentaCreate) -> Result<PuntoVenta, ClientError> {
        self.api.post("/api/puntos-venta", data).await
    }

    pub async fn update(&self, id: i64, data: &PuntoVentaUpdate) -> Result<PuntoVenta, ClientError> {
        self.api.put(&format!("/api/puntos-venta/{}", id), data).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ClientError> {
        self.api.delete(&format!("/api/puntos-venta/{}", id)).await
    }
}
