// src/client/pdf.rs

use crate::client::{ApiClient, ClientError};

pub fn default_filename(comprobante_id: i64) -> String {
    format!("Comprobante_{}.pdf", comprobante_id)
}

#[derive(Clone)]
pub struct PdfApi {
    api: ApiClient,
}

impl PdfApi {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn descargar(&self, comprobante_id: i64) -> Result<Vec<u8>, ClientError> {
        self.api
            .get_bytes(&format!("/api/pdf/comprobante/{}", comprobante_id))
            .await
    }

    pub async fn preview(&self, comprobante_id: i64) -> Result<Vec<u8>, ClientError> {
        self.api
            .get_bytes(&format!("/api/pdf/comprobante/{}/preview", comprobante_id))
            .await
    }
}
