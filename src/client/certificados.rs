// src/client/certificados.rs

use reqwest::multipart::{Form, Part};
use serde::Serialize;

use crate::{
    client::{ApiClient, ClientError},
    models::certificado::{
        Ambiente, Certificado, CertificadoAlerta, GenerarCsrRequest, GenerarCsrResponse, VerificacionResponse,
    },
};

const BASE: &str = "/api/certificados";

/// Formulário do upload do .crt baixado do portal da ARCA.
#[derive(Debug, Clone)]
pub struct SubirCertificado {
    pub contenido: Vec<u8>,
    pub filename: String,
    pub cuit: String,
    pub nombre: String,
    pub ambiente: Ambiente,
    pub key_filename: String,
}

#[derive(Serialize)]
struct ClavesParams<'a> {
    cuit: &'a str,
    ambiente: Ambiente,
}

/// Nome sugerido para salvar o CSR.
pub fn csr_filename(cuit: &str) -> String {
    format!("{}_solicitud.csr", cuit)
}

#[derive(Clone)]
pub struct CertificadosApi {
    api: ApiClient,
}

impl CertificadosApi {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<Certificado>, ClientError> {
        self.api.get(BASE).await
    }

    pub async fn get(&self, id: i64) -> Result<Certificado, ClientError> {
        self.api.get(&format!("{}/{}", BASE, id)).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ClientError> {
        self.api.delete(&format!("{}/{}", BASE, id)).await
    }

    pub async fn generar_csr(&self, request: &GenerarCsrRequest) -> Result<GenerarCsrResponse, ClientError> {
        self.api.post(&format!("{}/generar-csr", BASE), request).await
    }

    pub async fn subir_certificado(&self, subida: SubirCertificado) -> Result<Certificado, ClientError> {
        let form = Form::new()
            .part("file", Part::bytes(subida.contenido).file_name(subida.filename))
            .text("cuit", subida.cuit)
            .text("nombre", subida.nombre)
            .text("ambiente", subida.ambiente.as_str())
            .text("key_filename", subida.key_filename);
        self.api.post_multipart(&format!("{}/subir-certificado", BASE), form).await
    }

    pub async fn verificar_conexion(&self, id: i64) -> Result<VerificacionResponse, ClientError> {
        self.api.post_empty(&format!("{}/verificar-conexion/{}", BASE, id)).await
    }

    pub async fn alertas_vencimiento(&self) -> Result<Vec<CertificadoAlerta>, ClientError> {
        self.api.get(&format!("{}/alertas-vencimiento", BASE)).await
    }

    pub async fn listar_claves(&self, cuit: &str, ambiente: Ambiente) -> Result<Vec<String>, ClientError> {
        self.api
            .get_query(&format!("{}/keys", BASE), &ClavesParams { cuit, ambiente })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nome_do_csr() {
        assert_eq!(csr_filename("20123456789"), "20123456789_solicitud.csr");
    }
}
