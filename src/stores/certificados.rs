// src/stores/certificados.rs

use crate::{
    client::{ApiClient, ClientError},
    models::certificado::{Certificado, CertificadoAlerta},
    stores::mensaje_error,
};

pub struct CertificadosStore {
    client: ApiClient,
    pub certificados: Vec<Certificado>,
    pub alertas: Vec<CertificadoAlerta>,
    pub loading: bool,
    pub error: Option<String>,
}

impl CertificadosStore {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            certificados: Vec::new(),
            alertas: Vec::new(),
            loading: false,
            error: None,
        }
    }

    pub async fn fetch(&mut self) -> Result<(), ClientError> {
        self.loading = true;
        self.error = None;
        let result = self.client.certificados().list().await;
        self.loading = false;
        match result {
            Ok(lista) => {
                self.certificados = lista;
                Ok(())
            }
            Err(e) => {
                self.error = Some(mensaje_error(&e, "Error al cargar los certificados"));
                Err(e)
            }
        }
    }

    pub async fn fetch_alertas(&mut self) -> Result<(), ClientError> {
        let result = self.client.certificados().alertas_vencimiento().await;
        match result {
            Ok(alertas) => {
                self.alertas = alertas;
                Ok(())
            }
            Err(e) => {
                self.error = Some(mensaje_error(&e, "Error al cargar las alertas de vencimiento"));
                Err(e)
            }
        }
    }

    pub async fn delete(&mut self, id: i64) -> Result<(), ClientError> {
        self.loading = true;
        self.error = None;
        let result = self.client.certificados().delete(id).await;
        self.loading = false;
        match result {
            Ok(()) => {
                self.certificados.retain(|c| c.id != id);
                self.alertas.retain(|a| a.id != id);
                Ok(())
            }
            Err(e) => {
                self.error = Some(mensaje_error(&e, "Error al eliminar el certificado"));
                Err(e)
            }
        }
    }
}
