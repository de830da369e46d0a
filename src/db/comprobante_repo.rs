// src/db/comprobante_repo.rs

use chrono::NaiveDate;

use crate::{
    db::database::{ComprobanteRegistro, Database, Tabla},
    models::comprobante::{Comprobante, EstadoComprobante, ItemComprobante},
};

#[derive(Clone)]
pub struct ComprobanteRepository {
    db: Database,
}

impl ComprobanteRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: i64) -> Option<ComprobanteRegistro> {
        self.db
            .leer()
            .await
            .comprobantes
            .iter()
            .find(|c| c.comprobante.id == id)
            .cloned()
    }

    /// Todos os comprovantes da empresa, mais recentes primeiro (data, depois número).
    pub async fn list_by_empresa(&self, empresa_id: i64) -> Vec<ComprobanteRegistro> {
        let tablas = self.db.leer().await;
        let mut lista: Vec<ComprobanteRegistro> = tablas
            .comprobantes
            .iter()
            .filter(|c| c.comprobante.empresa_id == empresa_id)
            .cloned()
            .collect();
        lista.sort_by(|a, b| {
            b.comprobante
                .fecha_emision
                .cmp(&a.comprobante.fecha_emision)
                .then(b.comprobante.numero.cmp(&a.comprobante.numero))
        });
        lista
    }

    /// Autorizados de um período, em ordem cronológica (base dos relatórios).
    pub async fn list_autorizados(&self, empresa_id: i64, desde: NaiveDate, hasta: NaiveDate) -> Vec<ComprobanteRegistro> {
        let tablas = self.db.leer().await;
        let mut lista: Vec<ComprobanteRegistro> = tablas
            .comprobantes
            .iter()
            .filter(|c| {
                let comp = &c.comprobante;
                comp.empresa_id == empresa_id
                    && comp.estado == EstadoComprobante::Autorizado
                    && comp.fecha_emision >= desde
                    && comp.fecha_emision <= hasta
            })
            .cloned()
            .collect();
        lista.sort_by(|a, b| {
            a.comprobante
                .fecha_emision
                .cmp(&b.comprobante.fecha_emision)
                .then(a.comprobante.numero.cmp(&b.comprobante.numero))
        });
        lista
    }

    /// Último número autorizado para (empresa, ponto de venda, tipo); 0 se não houver.
    pub async fn ultimo_numero(&self, empresa_id: i64, punto_venta_id: i64, tipo_comprobante: i32) -> i64 {
        self.db
            .leer()
            .await
            .comprobantes
            .iter()
            .map(|c| &c.comprobante)
            .filter(|c| {
                c.empresa_id == empresa_id
                    && c.punto_venta_id == punto_venta_id
                    && c.tipo_comprobante == tipo_comprobante
                    && c.estado == EstadoComprobante::Autorizado
            })
            .map(|c| c.numero)
            .max()
            .unwrap_or(0)
    }

    /// Grava o comprovante com seus itens, atribuindo os IDs.
    pub async fn create(&self, mut comprobante: Comprobante, items: Vec<ItemComprobante>) -> ComprobanteRegistro {
        let mut tablas = self.db.escribir().await;
        comprobante.id = tablas.siguiente_id(Tabla::Comprobantes);

        let mut guardados = Vec::with_capacity(items.len());
        for mut item in items {
            item.id = Some(tablas.siguiente_id(Tabla::Items));
            item.comprobante_id = Some(comprobante.id);
            guardados.push(item);
        }

        let registro = ComprobanteRegistro { comprobante, items: guardados };
        tablas.comprobantes.push(registro.clone());
        registro
    }
}
