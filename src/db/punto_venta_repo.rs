// src/db/punto_venta_repo.rs

use chrono::{DateTime, Utc};

use crate::{
    db::database::{Database, Tabla},
    models::punto_venta::{PuntoVenta, PuntoVentaCreate, PuntoVentaUpdate},
};

#[derive(Clone)]
pub struct PuntoVentaRepository {
    db: Database,
}

impl PuntoVentaRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Ordenados por número.
    pub async fn list(&self, empresa_id: Option<i64>) -> Vec<PuntoVenta> {
        let tablas = self.db.leer().await;
        let mut puntos: Vec<PuntoVenta> = tablas
            .puntos_venta
            .iter()
            .filter(|p| empresa_id.is_none_or(|e| p.empresa_id == e))
            .cloned()
            .collect();
        puntos.sort_by_key(|p| p.numero);
        puntos
    }

    pub async fn find_by_id(&self, id: i64) -> Option<PuntoVenta> {
        self.db.leer().await.puntos_venta.iter().find(|p| p.id == id).cloned()
    }

    pub async fn find_by_numero(&self, empresa_id: i64, numero: i32) -> Option<PuntoVenta> {
        self.db
            .leer()
            .await
            .puntos_venta
            .iter()
            .find(|p| p.empresa_id == empresa_id && p.numero == numero)
            .cloned()
    }

    pub async fn create(&self, empresa_id: i64, datos: PuntoVentaCreate, ahora: DateTime<Utc>) -> PuntoVenta {
        let mut tablas = self.db.escribir().await;
        let punto = PuntoVenta {
            id: tablas.siguiente_id(Tabla::PuntosVenta),
            numero: datos.numero,
            nombre: datos.nombre,
            activo: true,
            empresa_id,
            created_at: ahora,
        };
        tablas.puntos_venta.push(punto.clone());
        punto
    }

    pub async fn update(&self, id: i64, cambios: PuntoVentaUpdate) -> Option<PuntoVenta> {
        let mut tablas = self.db.escribir().await;
        let punto = tablas.puntos_venta.iter_mut().find(|p| p.id == id)?;
        if let Some(numero) = cambios.numero {
            punto.numero = numero;
        }
        if cambios.nombre.is_some() {
            punto.nombre = cambios.nombre;
        }
        if let Some(activo) = cambios.activo {
            punto.activo = activo;
        }
        Some(punto.clone())
    }

    // Soft delete
    pub async fn desactivar(&self, id: i64) -> bool {
        let mut tablas = self.db.escribir().await;
        match tablas.puntos_venta.iter_mut().find(|p| p.id == id) {
            Some(punto) => {
                punto.activo = false;
                true
            }
            None => false,
        }
    }
}
