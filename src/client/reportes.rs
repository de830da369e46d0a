// src/client/reportes.rs

use chrono::NaiveDate;

use crate::{
    client::{ApiClient, ClientError},
    models::reporte::{IvaQuery, PeriodoQuery, RankingCliente, RankingQuery, ReporteIva, ReporteVentas},
};

#[derive(Clone)]
pub struct ReportesApi {
    api: ApiClient,
}

impl ReportesApi {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn ventas(&self, empresa_id: i64, desde: NaiveDate, hasta: NaiveDate) -> Result<ReporteVentas, ClientError> {
        self.api
            .get_query("/api/reportes/ventas", &PeriodoQuery { empresa_id, desde, hasta })
            .await
    }

    pub async fn iva_ventas(&self, empresa_id: i64, mes: u32, anio: i32) -> Result<ReporteIva, ClientError> {
        let query = IvaQuery {
            empresa_id,
            periodo_mes: mes,
            periodo_anio: anio,
        };
        self.api.get_query("/api/reportes/iva-ventas", &query).await
    }

    pub async fn ranking_clientes(
        &self,
        empresa_id: i64,
        desde: NaiveDate,
        hasta: NaiveDate,
        limite: usize,
    ) -> Result<Vec<RankingCliente>, ClientError> {
        let query = RankingQuery {
            empresa_id,
            desde,
            hasta,
            limite,
        };
        self.api.get_query("/api/reportes/clientes", &query).await
    }
}
