// src/db/certificado_repo.rs

use chrono::{DateTime, NaiveDate, Utc};

use crate::{
    db::database::{ClavePrivada, Database, Tabla},
    models::certificado::{Ambiente, Certificado, EstadoCertificado},
};

#[derive(Clone)]
pub struct CertificadoRepository {
    db: Database,
}

pub struct NuevoCertificado {
    pub nombre: String,
    pub cuit: String,
    pub fecha_emision: NaiveDate,
    pub fecha_vencimiento: NaiveDate,
    pub ambiente: Ambiente,
    pub archivo_crt: String,
    pub archivo_key: String,
    pub empresa_id: i64,
}

impl CertificadoRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    // Os campos derivados (dias_restantes, estado) são sempre recalculados na leitura.

    pub async fn list(&self, empresa_id: Option<i64>, hoy: NaiveDate) -> Vec<Certificado> {
        let tablas = self.db.leer().await;
        let mut certificados: Vec<Certificado> = tablas
            .certificados
            .iter()
            .filter(|c| empresa_id.is_none_or(|e| c.empresa_id == e))
            .cloned()
            .map(|mut c| {
                c.recalcular(hoy);
                c
            })
            .collect();
        certificados.sort_by_key(|c| c.fecha_vencimiento);
        certificados
    }

    pub async fn find_by_id(&self, id: i64, hoy: NaiveDate) -> Option<Certificado> {
        let mut certificado = self.db.leer().await.certificados.iter().find(|c| c.id == id).cloned()?;
        certificado.recalcular(hoy);
        Some(certificado)
    }

    /// Certificado ativo mais novo da empresa para o ambiente.
    pub async fn find_activo(&self, empresa_id: i64, ambiente: Ambiente, hoy: NaiveDate) -> Option<Certificado> {
        let mut certificado = self
            .db
            .leer()
            .await
            .certificados
            .iter()
            .filter(|c| c.empresa_id == empresa_id && c.ambiente == ambiente && c.activo)
            .max_by_key(|c| c.fecha_vencimiento)
            .cloned()?;
        certificado.recalcular(hoy);
        Some(certificado)
    }

    /// Um novo certificado desativa os anteriores do mesmo CUIT e ambiente.
    pub async fn create(&self, nuevo: NuevoCertificado, ahora: DateTime<Utc>) -> Certificado {
        let mut tablas = self.db.escribir().await;
        for anterior in tablas
            .certificados
            .iter_mut()
            .filter(|c| c.cuit == nuevo.cuit && c.ambiente == nuevo.ambiente)
        {
            anterior.activo = false;
            anterior.updated_at = ahora;
        }

        let mut certificado = Certificado {
            id: tablas.siguiente_id(Tabla::Certificados),
            nombre: nuevo.nombre,
            cuit: nuevo.cuit,
            fecha_emision: nuevo.fecha_emision,
            fecha_vencimiento: nuevo.fecha_vencimiento,
            ambiente: nuevo.ambiente,
            archivo_crt: nuevo.archivo_crt,
            archivo_key: nuevo.archivo_key,
            activo: true,
            empresa_id: nuevo.empresa_id,
            created_at: ahora,
            updated_at: ahora,
            dias_restantes: 0,
            estado: EstadoCertificado::Valido,
        };
        certificado.recalcular(ahora.date_naive());
        tablas.certificados.push(certificado.clone());
        certificado
    }

    pub async fn delete(&self, id: i64) -> bool {
        let mut tablas = self.db.escribir().await;
        let antes = tablas.certificados.len();
        tablas.certificados.retain(|c| c.id != id);
        tablas.certificados.len() != antes
    }

    // --- Chaves privadas ---

    pub async fn guardar_clave(&self, clave: ClavePrivada) {
        self.db.escribir().await.claves.push(clave);
    }

    pub async fn find_clave(&self, filename: &str) -> Option<ClavePrivada> {
        self.db.leer().await.claves.iter().find(|k| k.filename == filename).cloned()
    }

    pub async fn list_claves(&self, cuit: &str, ambiente: Ambiente) -> Vec<String> {
        let tablas = self.db.leer().await;
        let mut nombres: Vec<String> = tablas
            .claves
            .iter()
            .filter(|k| k.cuit == cuit && k.ambiente == ambiente)
            .map(|k| k.filename.clone())
            .collect();
        // Mais recente primeiro (o nome termina com o timestamp)
        nombres.sort_by(|a, b| b.cmp(a));
        nombres
    }
}
