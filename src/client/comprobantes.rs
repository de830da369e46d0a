// src/client/comprobantes.rs

use crate::{
    client::{ApiClient, ClientError},
    models::{
        api::Paginated,
        comprobante::{
            ComprobanteDetalle, ComprobanteListItem, EmitirComprobanteRequest, EmitirComprobanteResponse,
            ListarComprobantesParams, ProximoNumeroQuery, ProximoNumeroResponse,
        },
    },
};

#[derive(Clone)]
pub struct ComprobantesApi {
    api: ApiClient,
}

impl ComprobantesApi {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn listar(&self, params: &ListarComprobantesParams) -> Result<Paginated<ComprobanteListItem>, ClientError> {
        self.api.get_query("/api/comprobantes", params).await
    }

    pub async fn obtener(&self, id: i64) -> Result<ComprobanteDetalle, ClientError> {
        self.api.get(&format!("/api/comprobantes/{}", id)).await
    }

    pub async fn emitir(&self, request: &EmitirComprobanteRequest) -> Result<EmitirComprobanteResponse, ClientError> {
        self.api.post("/api/comprobantes/emitir", request).await
    }

    /// `punto_venta` é o número do ponto de venda.
    pub async fn proximo_numero(
        &self,
        punto_venta: i32,
        tipo_comprobante: i32,
        empresa_id: i64,
    ) -> Result<ProximoNumeroResponse, ClientError> {
        self.api
            .get_query(
                &format!("/api/comprobantes/proximo-numero/{}/{}", punto_venta, tipo_comprobante),
                &ProximoNumeroQuery { empresa_id },
            )
            .await
    }
}
