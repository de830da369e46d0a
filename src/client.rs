// src/client.rs
// Cliente REST tipado da API FactuFlow.

pub mod arca;
pub mod auth;
pub mod certificados;
pub mod clientes;
pub mod comprobantes;
pub mod empresas;
pub mod error;
pub mod pdf;
pub mod puntos_venta;
pub mod reportes;

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use reqwest::{Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};

use crate::{config::ClientConfig, models::api::ApiErrorBody};

pub use error::ClientError;

/// Transporte compartilhado por todos os serviços; clones dividem o mesmo token.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Arc<ArcSwapOption<String>>,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: Arc::new(ArcSwapOption::empty()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn set_token(&self, token: Option<String>) {
        self.token.store(token.map(Arc::new));
    }

    pub fn token(&self) -> Option<String> {
        self.token.load_full().map(|t| t.as_ref().clone())
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, format!("{}{}", self.base_url, path));
        match self.token.load_full() {
            Some(token) => builder.bearer_auth(token.as_str()),
            None => builder,
        }
    }

    /// Envia e converte qualquer status fora de 2xx em `ClientError::Api`.
    async fn send(&self, builder: RequestBuilder) -> Result<Response, ClientError> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ApiErrorBody>(&body)
            .map(|b| b.detail.to_message())
            .unwrap_or_else(|_| {
                status
                    .canonical_reason()
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("Error {}", status.as_u16()))
            });

        tracing::debug!("API respondeu {}: {}", status, detail);
        Err(ClientError::Api {
            status: status.as_u16(),
            detail,
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self.send(self.request(Method::GET, path)).await?;
        Self::decode(response).await
    }

    pub(crate) async fn get_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let response = self.send(self.request(Method::GET, path).query(query)).await?;
        Self::decode(response).await
    }

    pub(crate) async fn get_bytes(&self, path: &str) -> Result<Vec<u8>, ClientError> {
        let response = self.send(self.request(Method::GET, path)).await?;
        Ok(response.bytes().await?.to_vec())
    }

    pub(crate) async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self.send(self.request(Method::POST, path).json(body)).await?;
        Self::decode(response).await
    }

    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self.send(self.request(Method::POST, path)).await?;
        Self::decode(response).await
    }

    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T, ClientError> {
        let response = self.send(self.request(Method::POST, path).multipart(form)).await?;
        Self::decode(response).await
    }

    pub(crate) async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self.send(self.request(Method::PUT, path).json(body)).await?;
        Self::decode(response).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), ClientError> {
        self.send(self.request(Method::DELETE, path)).await?;
        Ok(())
    }

    // Serviços por recurso

    pub fn auth(&self) -> auth::AuthApi {
        auth::AuthApi::new(self.clone())
    }

    pub fn clientes(&self) -> clientes::ClientesApi {
        clientes::ClientesApi::new(self.clone())
    }

    pub fn empresas(&self) -> empresas::EmpresasApi {
        empresas::EmpresasApi::new(self.clone())
    }

    pub fn puntos_venta(&self) -> puntos_venta::PuntosVentaApi {
        puntos_venta::PuntosVentaApi::new(self.clone())
    }

    pub fn certificados(&self) -> certificados::CertificadosApi {
        certificados::CertificadosApi::new(self.clone())
    }

    pub fn comprobantes(&self) -> comprobantes::ComprobantesApi {
        comprobantes::ComprobantesApi::new(self.clone())
    }

    pub fn reportes(&self) -> reportes::ReportesApi {
        reportes::ReportesApi::new(self.clone())
    }

    pub fn arca(&self) -> arca::ArcaApi {
        arca::ArcaApi::new(self.clone())
    }

    pub fn pdf(&self) -> pdf::PdfApi {
        pdf::PdfApi::new(self.clone())
    }
}
