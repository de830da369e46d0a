// src/stores/clientes.rs

use crate::{
    client::{ApiClient, ClientError},
    models::{
        api::Paginated,
        cliente::{Cliente, ClienteCreate, ClienteListParams, ClienteUpdate},
    },
    stores::mensaje_error,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginacion {
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
    pub pages: u32,
}

impl Paginacion {
    pub fn con_tamano(per_page: u32) -> Self {
        Self { page: 1, per_page, total: 0, pages: 0 }
    }

    pub(crate) fn actualizar<T>(&mut self, respuesta: &Paginated<T>) {
        self.page = respuesta.page;
        self.per_page = respuesta.per_page;
        self.total = respuesta.total;
        self.pages = respuesta.pages;
    }
}

pub struct ClientesStore {
    client: ApiClient,
    pub clientes: Vec<Cliente>,
    pub cliente_actual: Option<Cliente>,
    pub pagination: Paginacion,
    pub loading: bool,
    pub error: Option<String>,
}

impl ClientesStore {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            clientes: Vec::new(),
            cliente_actual: None,
            pagination: Paginacion::con_tamano(30),
            loading: false,
            error: None,
        }
    }

    fn comenzar(&mut self) {
        self.loading = true;
        self.error = None;
    }

    fn terminar<T>(&mut self, result: Result<T, ClientError>, fallback: &str) -> Result<T, ClientError> {
        self.loading = false;
        if let Err(e) = &result {
            self.error = Some(mensaje_error(e, fallback));
        }
        result
    }

    /// Página e tamanho não informados vêm da paginação atual.
    pub async fn fetch_clientes(&mut self, mut params: ClienteListParams) -> Result<Paginated<Cliente>, ClientError> {
        self.comenzar();
        params.page.get_or_insert(self.pagination.page);
        params.per_page.get_or_insert(self.pagination.per_page);

        let result = self.client.clientes().list(&params).await;
        if let Ok(pagina) = &result {
            self.clientes = pagina.items.clone();
            self.pagination.actualizar(pagina);
        }
        self.terminar(result, "Error al cargar los clientes")
    }

    pub async fn fetch_cliente(&mut self, id: i64) -> Result<Cliente, ClientError> {
        self.comenzar();
        let result = self.client.clientes().get(id).await;
        if let Ok(cliente) = &result {
            self.cliente_actual = Some(cliente.clone());
        }
        self.terminar(result, "Error al cargar el cliente")
    }

    pub async fn create_cliente(&mut self, data: &ClienteCreate) -> Result<Cliente, ClientError> {
        self.comenzar();
        let result = self.client.clientes().create(data).await;
        if let Ok(cliente) = &result {
            self.clientes.insert(0, cliente.clone());
        }
        self.terminar(result, "Error al crear el cliente")
    }

    pub async fn update_cliente(&mut self, id: i64, data: &ClienteUpdate) -> Result<Cliente, ClientError> {
        self.comenzar();
        let result = self.client.clientes().update(id, data).await;
        if let Ok(cliente) = &result {
            if let Some(slot) = self.clientes.iter_mut().find(|c| c.id == id) {
                *slot = cliente.clone();
            }
            if self.cliente_actual.as_ref().is_some_and(|c| c.id == id) {
                self.cliente_actual = Some(cliente.clone());
            }
        }
        self.terminar(result, "Error al actualizar el cliente")
    }

    pub async fn delete_cliente(&mut self, id: i64) -> Result<(), ClientError> {
        self.comenzar();
        let result = self.client.clientes().delete(id).await;
        if result.is_ok() {
            self.clientes.retain(|c| c.id != id);
        }
        self.terminar(result, "Error al eliminar el cliente")
    }
}
