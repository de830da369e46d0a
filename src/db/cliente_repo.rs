// src/db/cliente_repo.rs

use chrono::{DateTime, Utc};

use crate::{
    db::database::{Database, Tabla},
    models::cliente::{Cliente, ClienteCreate, ClienteListParams, ClienteUpdate},
};

#[derive(Clone)]
pub struct ClienteRepository {
    db: Database,
}

impl ClienteRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Lista filtrada (empresa, busca, ativo), mais recentes primeiro. A paginação fica com o handler.
    pub async fn list(&self, empresa_id: Option<i64>, filtros: &ClienteListParams) -> Vec<Cliente> {
        let busca = filtros
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let tablas = self.db.leer().await;
        let mut clientes: Vec<Cliente> = tablas
            .clientes
            .iter()
            .filter(|c| empresa_id.is_none_or(|e| c.empresa_id == e))
            .filter(|c| filtros.activo.is_none_or(|a| c.activo == a))
            .filter(|c| match &busca {
                Some(b) => {
                    c.razon_social.to_lowercase().contains(b)
                        || c.numero_documento.to_lowercase().contains(b)
                }
                None => true,
            })
            .cloned()
            .collect();

        clientes.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        clientes
    }

    pub async fn find_by_id(&self, id: i64) -> Option<Cliente> {
        self.db.leer().await.clientes.iter().find(|c| c.id == id).cloned()
    }

    pub async fn create(&self, empresa_id: i64, datos: ClienteCreate, ahora: DateTime<Utc>) -> Cliente {
        let mut tablas = self.db.escribir().await;
        let cliente = Cliente {
            id: tablas.siguiente_id(Tabla::Clientes),
            empresa_id,
            razon_social: datos.razon_social,
            tipo_documento: datos.tipo_documento,
            numero_documento: datos.numero_documento,
            condicion_iva: datos.condicion_iva,
            domicilio: datos.domicilio,
            localidad: datos.localidad,
            provincia: datos.provincia,
            codigo_postal: datos.codigo_postal,
            email: datos.email,
            telefono: datos.telefono,
            notas: datos.notas,
            activo: true,
            created_at: ahora,
            updated_at: ahora,
        };
        tablas.clientes.push(cliente.clone());
        cliente
    }

    pub async fn update(&self, id: i64, cambios: ClienteUpdate, ahora: DateTime<Utc>) -> Option<Cliente> {
        let mut tablas = self.db.escribir().await;
        let cliente = tablas.clientes.iter_mut().find(|c| c.id == id)?;
        cliente.aplicar(cambios, ahora);
        Some(cliente.clone())
    }

    // Soft delete: marca como inativo
    pub async fn desactivar(&self, id: i64, ahora: DateTime<Utc>) -> bool {
        let mut tablas = self.db.escribir().await;
        match tablas.clientes.iter_mut().find(|c| c.id == id) {
            Some(cliente) => {
                cliente.activo = false;
                cliente.updated_at = ahora;
                true
            }
            None => false,
        }
    }
}
