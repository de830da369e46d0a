// src/stores/empresa.rs

use crate::{
    client::{ApiClient, ClientError},
    models::empresa::{Empresa, EmpresaCreate, EmpresaUpdate},
    stores::mensaje_error,
};

pub struct EmpresaStore {
    client: ApiClient,
    pub empresa: Option<Empresa>,
    pub loading: bool,
    pub error: Option<String>,
}

impl EmpresaStore {
    pub fn new(client: ApiClient) -> Self {
        Self { client, empresa: None, loading: false, error: None }
    }

    fn registrar(&mut self, result: Result<Empresa, ClientError>, fallback: &str) -> Result<Empresa, ClientError> {
        match &result {
            Ok(empresa) => self.empresa = Some(empresa.clone()),
            Err(e) => self.error = Some(mensaje_error(e, fallback)),
        }
        self.loading = false;
        result
    }

    pub async fn fetch(&mut self, id: i64) -> Result<Empresa, ClientError> {
        self.loading = true;
        self.error = None;
        let result = self.client.empresas().get(id).await;
        self.registrar(result, "Error al cargar la empresa")
    }

    pub async fn create(&mut self, data: &EmpresaCreate) -> Result<Empresa, ClientError> {
        self.loading = true;
        self.error = None;
        let result = self.client.empresas().create(data).await;
        self.registrar(result, "Error al crear la empresa")
    }

    pub async fn update(&mut self, id: i64, data: &EmpresaUpdate) -> Result<Empresa, ClientError> {
        self.loading = true;
        self.error = None;
        let result = self.client.empresas().update(id, data).await;
        self.registrar(result, "Error al actualizar la empresa")
    }
}
