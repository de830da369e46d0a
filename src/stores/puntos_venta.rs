// src/stores/puntos_venta.rs

use std::collections::HashSet;

use crate::{
    client::{ApiClient, ClientError},
    models::punto_venta::{PuntoVenta, PuntoVentaCreate, PuntoVentaUpdate, SyncResultado},
    stores::mensaje_error,
};

pub struct PuntosVentaStore {
    client: ApiClient,
    /// Sempre ordenados por número.
    pub puntos_venta: Vec<PuntoVenta>,
    pub loading: bool,
    pub syncing: bool,
    pub error: Option<String>,
}

impl PuntosVentaStore {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            puntos_venta: Vec::new(),
            loading: false,
            syncing: false,
            error: None,
        }
    }

    fn ordenar(&mut self) {
        self.puntos_venta.sort_by_key(|pv| pv.numero);
    }

    fn fallo<T>(&mut self, e: ClientError, fallback: &str) -> Result<T, ClientError> {
        self.error = Some(mensaje_error(&e, fallback));
        Err(e)
    }

    pub async fn fetch(&mut self) -> Result<(), ClientError> {
        self.loading = true;
        self.error = None;
        let result = self.client.puntos_venta().list().await;
        self.loading = false;
        match result {
            Ok(lista) => {
                self.puntos_venta = lista;
                self.ordenar();
                Ok(())
            }
            Err(e) => self.fallo(e, "Error al cargar los puntos de venta"),
        }
    }

    pub async fn create(&mut self, data: &PuntoVentaCreate) -> Result<PuntoVenta, ClientError> {
        self.loading = true;
        self.error = None;
        let result = self.client.puntos_venta().create(data).await;
        self.loading = false;
        match result {
            Ok(nuevo) => {
                self.puntos_venta.push(nuevo.clone());
                self.ordenar();
                Ok(nuevo)
            }
            Err(e) => self.fallo(e, "Error al crear el punto de venta"),
        }
    }

    pub async fn update(&mut self, id: i64, data: &PuntoVentaUpdate) -> Result<PuntoVenta, ClientError> {
        self.loading = true;
        self.error = None;
        let result = self.client.puntos_venta().update(id, data).await;
        self.loading = false;
        match result {
            Ok(actualizado) => {
                if let Some(slot) = self.puntos_venta.iter_mut().find(|pv| pv.id == id) {
                    *slot = actualizado.clone();
                }
                self.ordenar();
                Ok(actualizado)
            }
            Err(e) => self.fallo(e, "Error al actualizar el punto de venta"),
        }
    }

    pub async fn delete(&mut self, id: i64) -> Result<(), ClientError> {
        self.loading = true;
        self.error = None;
        let result = self.client.puntos_venta().delete(id).await;
        self.loading = false;
        match result {
            Ok(()) => {
                self.puntos_venta.retain(|pv| pv.id != id);
                Ok(())
            }
            Err(e) => self.fallo(e, "Error al eliminar el punto de venta"),
        }
    }

    /// Cria localmente os pontos habilitados na ARCA que ainda não existem.
    pub async fn sync_from_arca(&mut self) -> Result<SyncResultado, ClientError> {
        self.syncing = true;
        self.error = None;
        let result = self.sincronizar().await;
        self.syncing = false;
        match result {
            Ok(r) => {
                tracing::info!(
                    "Sincronização ARCA: {} habilitados, {} novos",
                    r.total_arca,
                    r.nuevos
                );
                Ok(r)
            }
            Err(e) => self.fallo(e, "Error al sincronizar puntos de venta"),
        }
    }

    async fn sincronizar(&mut self) -> Result<SyncResultado, ClientError> {
        let arca_api = self.client.arca();
        let puntos_api = self.client.puntos_venta();
        let (arca, locales) = tokio::try_join!(arca_api.puntos_venta(), puntos_api.list())?;

        let habilitados: Vec<_> = arca.into_iter().filter(|pv| pv.habilitado()).collect();
        let existentes: HashSet<i32> = locales.iter().map(|pv| pv.numero).collect();

        let mut merged = locales;
        let mut nuevos = 0;
        for pv in habilitados.iter().filter(|pv| !existentes.contains(&pv.numero)) {
            let creado = puntos_api
                .create(&PuntoVentaCreate { numero: pv.numero, nombre: None })
                .await?;
            merged.push(creado);
            nuevos += 1;
        }

        self.puntos_venta = merged;
        self.ordenar();

        Ok(SyncResultado {
            total_arca: habilitados.len(),
            nuevos,
            existentes: habilitados.len() - nuevos,
        })
    }
}
