// src/models/reporte.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// --- PARÂMETROS ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodoQuery {
    pub empresa_id: i64,
    pub desde: NaiveDate,
    pub hasta: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IvaQuery {
    pub empresa_id: i64,
    pub periodo_mes: u32,
    pub periodo_anio: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingQuery {
    pub empresa_id: i64,
    pub desde: NaiveDate,
    pub hasta: NaiveDate,
    #[serde(default = "limite_por_defecto")]
    pub limite: usize,
}

pub fn limite_por_defecto() -> usize {
    10
}

// --- VENDAS ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComprobanteReporte {
    pub id: i64,
    pub fecha_emision: String,
    pub tipo_comprobante: i32,
    pub tipo_nombre: String,
    pub letra: String,
    pub punto_venta: i32,
    pub numero: i64,
    pub numero_completo: String,
    pub cliente_nombre: String,
    pub subtotal: Decimal,
    pub iva_total: Decimal,
    pub total: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PeriodoFechas {
    pub desde: String,
    pub hasta: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResumenVentas {
    pub total_facturas: Decimal,
    pub total_notas_credito: Decimal,
    pub total_notas_debito: Decimal,
    pub total_neto: Decimal,
    pub cantidad_comprobantes: usize,
    pub periodo: PeriodoFechas,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReporteVentas {
    pub comprobantes: Vec<ComprobanteReporte>,
    pub resumen: ResumenVentas,
}

// --- SUBDIÁRIO DE IVA ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComprobanteIva {
    pub fecha_emision: String,
    pub tipo_letra: String,
    pub tipo_nombre: String,
    pub punto_venta: i32,
    pub numero: i64,
    pub numero_completo: String,
    pub cuit_receptor: String,
    pub razon_social_receptor: String,
    pub gravado_21: Decimal,
    pub iva_21: Decimal,
    pub gravado_10_5: Decimal,
    pub iva_10_5: Decimal,
    pub gravado_27: Decimal,
    pub iva_27: Decimal,
    pub no_gravado: Decimal,
    pub exento: Decimal,
    pub total: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PeriodoMensual {
    pub mes: u32,
    pub anio: i32,
    pub nombre: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResumenIva {
    pub gravado_21: Decimal,
    pub iva_21: Decimal,
    pub gravado_10_5: Decimal,
    pub iva_10_5: Decimal,
    pub gravado_27: Decimal,
    pub iva_27: Decimal,
    pub no_gravado: Decimal,
    pub exento: Decimal,
    pub total_neto: Decimal,
    pub total_iva: Decimal,
    pub periodo: PeriodoMensual,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReporteIva {
    pub comprobantes: Vec<ComprobanteIva>,
    pub resumen: ResumenIva,
}

// --- RANKING DE CLIENTES ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RankingCliente {
    pub cliente_id: i64,
    pub razon_social: String,
    pub numero_documento: String,
    pub total_facturado: Decimal,
    pub cantidad_comprobantes: usize,
}
