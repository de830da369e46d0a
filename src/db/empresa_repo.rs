// src/db/empresa_repo.rs

use chrono::{DateTime, Utc};

use crate::{
    db::database::{Database, Tabla},
    models::empresa::{Empresa, EmpresaCreate, EmpresaUpdate},
};

#[derive(Clone)]
pub struct EmpresaRepository {
    db: Database,
}

impl EmpresaRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> Vec<Empresa> {
        self.db.leer().await.empresas.clone()
    }

    pub async fn find_by_id(&self, id: i64) -> Option<Empresa> {
        self.db.leer().await.empresas.iter().find(|e| e.id == id).cloned()
    }

    pub async fn find_by_cuit(&self, cuit: &str) -> Option<Empresa> {
        self.db.leer().await.empresas.iter().find(|e| e.cuit == cuit).cloned()
    }

    pub async fn create(&self, datos: EmpresaCreate, ahora: DateTime<Utc>) -> Empresa {
        let mut tablas = self.db.escribir().await;
        let empresa = Empresa {
            id: tablas.siguiente_id(Tabla::Empresas),
            razon_social: datos.razon_social,
            cuit: datos.cuit,
            condicion_iva: datos.condicion_iva,
            domicilio: datos.domicilio,
            localidad: datos.localidad,
            provincia: datos.provincia,
            codigo_postal: datos.codigo_postal,
            email: datos.email,
            telefono: datos.telefono,
            inicio_actividades: datos.inicio_actividades,
            logo: datos.logo,
            created_at: ahora,
            updated_at: ahora,
        };
        tablas.empresas.push(empresa.clone());
        empresa
    }

    pub async fn update(&self, id: i64, cambios: EmpresaUpdate, ahora: DateTime<Utc>) -> Option<Empresa> {
        let mut tablas = self.db.escribir().await;
        let empresa = tablas.empresas.iter_mut().find(|e| e.id == id)?;
        empresa.aplicar(cambios, ahora);
        Some(empresa.clone())
    }

    pub async fn delete(&self, id: i64) -> bool {
        let mut tablas = self.db.escribir().await;
        let antes = tablas.empresas.len();
        tablas.empresas.retain(|e| e.id != id);
        tablas.empresas.len() != antes
    }
}
