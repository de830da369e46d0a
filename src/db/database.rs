// src/db/database.rs

use std::{collections::HashMap, sync::Arc};

use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::models::{
    auth::Usuario,
    certificado::{Ambiente, Certificado},
    cliente::Cliente,
    comprobante::{Comprobante, ItemComprobante},
    empresa::Empresa,
    punto_venta::PuntoVenta,
};

/// Usuário com o hash da senha (nunca sai do servidor).
#[derive(Debug, Clone)]
pub struct UsuarioRegistro {
    pub usuario: Usuario,
    pub hashed_password: String,
}

/// Chave privada gerada junto com o CSR.
#[derive(Debug, Clone)]
pub struct ClavePrivada {
    pub filename: String,
    pub cuit: String,
    pub ambiente: Ambiente,
    pub pem: String,
}

#[derive(Debug, Clone)]
pub struct ComprobanteRegistro {
    pub comprobante: Comprobante,
    pub items: Vec<ItemComprobante>,
}

#[derive(Debug, Default)]
pub struct Tablas {
    pub usuarios: Vec<UsuarioRegistro>,
    pub empresas: Vec<Empresa>,
    pub clientes: Vec<Cliente>,
    pub puntos_venta: Vec<PuntoVenta>,
    pub certificados: Vec<Certificado>,
    pub claves: Vec<ClavePrivada>,
    pub comprobantes: Vec<ComprobanteRegistro>,
    secuencias: HashMap<Tabla, i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tabla {
    Usuarios,
    Empresas,
    Clientes,
    PuntosVenta,
    Certificados,
    Comprobantes,
    Items,
}

impl Tablas {
    /// Uma sequência por tabela, começando em 1.
    pub fn siguiente_id(&mut self, tabla: Tabla) -> i64 {
        let secuencia = self.secuencias.entry(tabla).or_insert(0);
        *secuencia += 1;
        *secuencia
    }
}

#[derive(Clone, Default)]
pub struct Database {
    tablas: Arc<RwLock<Tablas>>,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn leer(&self) -> RwLockReadGuard<'_, Tablas> {
        self.tablas.read().await
    }

    pub async fn escribir(&self) -> RwLockWriteGuard<'_, Tablas> {
        self.tablas.write().await
    }
}
