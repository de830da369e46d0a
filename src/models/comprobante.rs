// src/models/comprobante.rs

use std::borrow::Cow;

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

// =============================================================================
//  TIPOS DE COMPROBANTE
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clase {
    Factura,
    NotaDebito,
    NotaCredito,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Letra {
    A,
    B,
    C,
}

impl Letra {
    pub fn as_str(self) -> &'static str {
        match self {
            Letra::A => "A",
            Letra::B => "B",
            Letra::C => "C",
        }
    }
}

/// Códigos ARCA: 1/2/3 (A), 6/7/8 (B), 11/12/13 (C).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TipoComprobante {
    pub codigo: i32,
    pub clase: Clase,
    pub letra: Letra,
}

impl TipoComprobante {
    pub const FACTURA_A: i32 = 1;
    pub const NOTA_DEBITO_A: i32 = 2;
    pub const NOTA_CREDITO_A: i32 = 3;
    pub const FACTURA_B: i32 = 6;
    pub const NOTA_DEBITO_B: i32 = 7;
    pub const NOTA_CREDITO_B: i32 = 8;
    pub const FACTURA_C: i32 = 11;
    pub const NOTA_DEBITO_C: i32 = 12;
    pub const NOTA_CREDITO_C: i32 = 13;

    pub fn desde_codigo(codigo: i32) -> Option<Self> {
        let (clase, letra) = match codigo {
            1 => (Clase::Factura, Letra::A),
            2 => (Clase::NotaDebito, Letra::A),
            3 => (Clase::NotaCredito, Letra::A),
            6 => (Clase::Factura, Letra::B),
            7 => (Clase::NotaDebito, Letra::B),
            8 => (Clase::NotaCredito, Letra::B),
            11 => (Clase::Factura, Letra::C),
            12 => (Clase::NotaDebito, Letra::C),
            13 => (Clase::NotaCredito, Letra::C),
            _ => return None,
        };
        Some(Self { codigo, clase, letra })
    }

    /// "Factura", "Nota de Débito" ou "Nota de Crédito".
    pub fn nombre_clase(self) -> &'static str {
        match self.clase {
            Clase::Factura => "Factura",
            Clase::NotaDebito => "Nota de Débito",
            Clase::NotaCredito => "Nota de Crédito",
        }
    }

    /// Ex.: "Factura A".
    pub fn nombre(self) -> String {
        format!("{} {}", self.nombre_clase(), self.letra.as_str())
    }

    /// Sinal usado nos relatórios: notas de crédito subtraem.
    pub fn signo(self) -> Decimal {
        match self.clase {
            Clase::NotaCredito => Decimal::NEGATIVE_ONE,
            _ => Decimal::ONE,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum EstadoComprobante {
    Borrador,
    Pendiente,
    #[default]
    Autorizado,
    Rechazado,
    Anulado,
}

impl EstadoComprobante {
    pub fn nombre(self) -> &'static str {
        match self {
            EstadoComprobante::Borrador => "Borrador",
            EstadoComprobante::Pendiente => "Pendiente",
            EstadoComprobante::Autorizado => "Autorizado",
            EstadoComprobante::Rechazado => "Rechazado",
            EstadoComprobante::Anulado => "Anulado",
        }
    }
}

/// 1 = Productos, 2 = Servicios, 3 = Productos y Servicios.
pub fn nombre_concepto(concepto: i32) -> Option<&'static str> {
    match concepto {
        1 => Some("Productos"),
        2 => Some("Servicios"),
        3 => Some("Productos y Servicios"),
        _ => None,
    }
}

// =============================================================================
//  ITENS E TOTAIS
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct ItemComprobante {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codigo: Option<String>,
    #[validate(length(min = 1, max = 500, message = "La descripción es obligatoria"))]
    pub descripcion: String,
    #[validate(custom(function = "validar_cantidad"))]
    pub cantidad: Decimal,
    #[serde(default = "unidad_por_defecto")]
    pub unidad: String,
    #[validate(custom(function = "validar_precio"))]
    pub precio_unitario: Decimal,
    #[serde(default)]
    #[validate(custom(function = "validar_descuento"))]
    pub descuento_porcentaje: Decimal,
    #[validate(custom(function = "validar_alicuota"))]
    pub iva_porcentaje: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtotal: Option<Decimal>,
    #[serde(default)]
    pub orden: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comprobante_id: Option<i64>,
}

fn unidad_por_defecto() -> String {
    "unidades".to_string()
}

impl ItemComprobante {
    pub fn nuevo(descripcion: &str, cantidad: Decimal, precio_unitario: Decimal, iva_porcentaje: Decimal) -> Self {
        Self {
            id: None,
            codigo: None,
            descripcion: descripcion.to_string(),
            cantidad,
            unidad: unidad_por_defecto(),
            precio_unitario,
            descuento_porcentaje: Decimal::ZERO,
            iva_porcentaje,
            subtotal: None,
            orden: 0,
            comprobante_id: None,
        }
    }

    /// cantidad × precio, menos o desconto percentual (sem arredondar).
    pub fn importe_neto(&self) -> Decimal {
        let bruto = self.cantidad * self.precio_unitario;
        if self.descuento_porcentaje > Decimal::ZERO {
            bruto - bruto * self.descuento_porcentaje / Decimal::ONE_HUNDRED
        } else {
            bruto
        }
    }
}

fn validar_cantidad(v: &Decimal) -> Result<(), ValidationError> {
    if *v > Decimal::ZERO {
        Ok(())
    } else {
        Err(ValidationError::new("cantidad").with_message(Cow::from("La cantidad debe ser mayor a cero")))
    }
}

fn validar_precio(v: &Decimal) -> Result<(), ValidationError> {
    if *v >= Decimal::ZERO {
        Ok(())
    } else {
        Err(ValidationError::new("precio").with_message(Cow::from("El precio unitario no puede ser negativo")))
    }
}

fn validar_descuento(v: &Decimal) -> Result<(), ValidationError> {
    if *v >= Decimal::ZERO && *v <= Decimal::ONE_HUNDRED {
        Ok(())
    } else {
        Err(ValidationError::new("descuento").with_message(Cow::from("El descuento debe estar entre 0 y 100")))
    }
}

fn validar_alicuota(v: &Decimal) -> Result<(), ValidationError> {
    if Alicuota::desde_porcentaje(*v).is_some() {
        Ok(())
    } else {
        Err(ValidationError::new("alicuota").with_message(Cow::from("Alícuota de IVA inválida")))
    }
}

/// Alíquotas de IVA aceitas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alicuota {
    Exento,
    Reducida,
    General,
    Aumentada,
}

impl Alicuota {
    pub fn desde_porcentaje(p: Decimal) -> Option<Self> {
        if p.is_zero() {
            Some(Alicuota::Exento)
        } else if p == Decimal::new(105, 1) {
            Some(Alicuota::Reducida)
        } else if p == Decimal::new(21, 0) {
            Some(Alicuota::General)
        } else if p == Decimal::new(27, 0) {
            Some(Alicuota::Aumentada)
        } else {
            None
        }
    }

    pub fn porcentaje(self) -> Decimal {
        match self {
            Alicuota::Exento => Decimal::ZERO,
            Alicuota::Reducida => Decimal::new(105, 1),
            Alicuota::General => Decimal::new(21, 0),
            Alicuota::Aumentada => Decimal::new(27, 0),
        }
    }

    /// Código de alíquota da ARCA (Id do AlicIva).
    pub fn codigo_arca(self) -> i32 {
        match self {
            Alicuota::Exento => 3,
            Alicuota::Reducida => 4,
            Alicuota::General => 5,
            Alicuota::Aumentada => 6,
        }
    }
}

/// Arredonda para centavos (meio para longe do zero).
pub fn redondear(v: Decimal) -> Decimal {
    v.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Totales {
    pub subtotal: Decimal,
    pub iva_21: Decimal,
    pub iva_10_5: Decimal,
    pub iva_27: Decimal,
    pub total: Decimal,
}

/// Soma os itens e separa o IVA por alíquota; tudo arredondado a 2 casas no final.
pub fn calcular_totales(items: &[ItemComprobante]) -> Totales {
    let mut subtotal = Decimal::ZERO;
    let mut iva_21 = Decimal::ZERO;
    let mut iva_10_5 = Decimal::ZERO;
    let mut iva_27 = Decimal::ZERO;

    for item in items {
        let neto = item.importe_neto();
        subtotal += neto;

        match Alicuota::desde_porcentaje(item.iva_porcentaje) {
            Some(a @ Alicuota::General) => iva_21 += neto * a.porcentaje() / Decimal::ONE_HUNDRED,
            Some(a @ Alicuota::Reducida) => iva_10_5 += neto * a.porcentaje() / Decimal::ONE_HUNDRED,
            Some(a @ Alicuota::Aumentada) => iva_27 += neto * a.porcentaje() / Decimal::ONE_HUNDRED,
            _ => {}
        }
    }

    let total = subtotal + iva_21 + iva_10_5 + iva_27;

    Totales {
        subtotal: redondear(subtotal),
        iva_21: redondear(iva_21),
        iva_10_5: redondear(iva_10_5),
        iva_27: redondear(iva_27),
        total: redondear(total),
    }
}

// =============================================================================
//  EMISSÃO
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EmitirComprobanteRequest {
    pub empresa_id: i64,
    pub punto_venta_id: i64,
    #[validate(range(min = 1, max = 999, message = "Tipo de comprobante inválido"))]
    pub tipo_comprobante: i32,
    #[serde(default = "concepto_por_defecto")]
    #[validate(range(min = 1, max = 3, message = "Concepto inválido"))]
    pub concepto: i32,

    // Receptor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cliente_id: Option<i64>,
    #[validate(range(min = 1, message = "Tipo de documento inválido"))]
    pub tipo_documento: i32,
    #[validate(length(min = 1, max = 20, message = "El número de documento es obligatorio"))]
    pub numero_documento: String,
    #[validate(length(min = 1, max = 200, message = "La razón social es obligatoria"))]
    pub razon_social: String,
    #[validate(length(max = 50))]
    pub condicion_iva: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domicilio: Option<String>,

    #[validate(nested)]
    pub items: Vec<ItemComprobante>,

    // Serviços (concepto 2 ou 3)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha_servicio_desde: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha_servicio_hasta: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha_vto_pago: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 500, message = "Las observaciones no pueden superar los 500 caracteres"))]
    pub observaciones: Option<String>,
    #[serde(default = "moneda_por_defecto")]
    pub moneda: String,
    #[serde(default = "cotizacion_por_defecto")]
    pub cotizacion: Decimal,
}

fn concepto_por_defecto() -> i32 {
    1
}

fn moneda_por_defecto() -> String {
    "PES".to_string()
}

fn cotizacion_por_defecto() -> Decimal {
    Decimal::ONE
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmitirComprobanteResponse {
    pub exito: bool,
    #[serde(default)]
    pub comprobante_id: Option<i64>,
    pub tipo_comprobante: i32,
    pub punto_venta: i32,
    pub numero: i64,
    pub fecha: NaiveDate,
    #[serde(default)]
    pub cae: Option<String>,
    #[serde(default)]
    pub cae_vencimiento: Option<NaiveDate>,
    pub total: Decimal,
    pub mensaje: String,
    #[serde(default)]
    pub errores: Vec<String>,
}

// =============================================================================
//  COMPROVANTE ARMAZENADO
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Comprobante {
    pub id: i64,
    pub tipo_comprobante: i32,
    pub numero: i64,
    pub fecha_emision: NaiveDate,
    pub fecha_vencimiento: Option<NaiveDate>,
    pub subtotal: Decimal,
    pub descuento: Decimal,
    pub iva_21: Decimal,
    pub iva_10_5: Decimal,
    pub iva_27: Decimal,
    pub otros_impuestos: Decimal,
    pub total: Decimal,
    pub cae: Option<String>,
    pub cae_vencimiento: Option<NaiveDate>,
    pub estado: EstadoComprobante,
    pub moneda: String,
    pub cotizacion: Decimal,
    pub observaciones: Option<String>,
    pub empresa_id: i64,
    pub punto_venta_id: i64,
    pub cliente_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComprobanteDetalle {
    #[serde(flatten)]
    pub comprobante: Comprobante,
    #[serde(default)]
    pub items: Vec<ItemComprobante>,
    #[serde(default)]
    pub cliente_nombre: Option<String>,
    #[serde(default)]
    pub cliente_cuit: Option<String>,
    #[serde(default)]
    pub punto_venta_numero: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComprobanteListItem {
    pub id: i64,
    pub tipo_comprobante: i32,
    pub numero: i64,
    pub fecha_emision: NaiveDate,
    pub total: Decimal,
    pub estado: EstadoComprobante,
    #[serde(default)]
    pub cae: Option<String>,
    pub cliente_nombre: String,
    pub cliente_documento: String,
    pub punto_venta_numero: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ListarComprobantesParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empresa_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desde: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hasta: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tipo: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cliente_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buscar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProximoNumeroQuery {
    pub empresa_id: i64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProximoNumeroResponse {
    pub punto_venta: i32,
    pub tipo_comprobante: i32,
    pub proximo_numero: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(v: i64, scale: u32) -> Decimal {
        Decimal::new(v, scale)
    }

    #[test]
    fn um_item_com_iva_21() {
        let items = vec![ItemComprobante::nuevo("Servicio", d(1, 0), d(1000, 0), d(21, 0))];
        let t = calcular_totales(&items);
        assert_eq!(t.subtotal, d(100000, 2));
        assert_eq!(t.iva_21, d(21000, 2));
        assert_eq!(t.total, d(121000, 2));
    }

    #[test]
    fn aliquotas_misturadas_e_desconto() {
        let mut com_desconto = ItemComprobante::nuevo("A", d(2, 0), d(100, 0), d(105, 1));
        com_desconto.descuento_porcentaje = d(10, 0);
        let items = vec![
            com_desconto,
            ItemComprobante::nuevo("B", d(1, 0), d(50, 0), d(27, 0)),
            ItemComprobante::nuevo("C", d(3, 0), d(10, 0), Decimal::ZERO),
        ];
        let t = calcular_totales(&items);
        // 180 + 50 + 30
        assert_eq!(t.subtotal, d(260, 0));
        assert_eq!(t.iva_10_5, d(1890, 2));
        assert_eq!(t.iva_27, d(1350, 2));
        assert_eq!(t.iva_21, Decimal::ZERO);
        assert_eq!(t.total, d(29240, 2));
    }

    #[test]
    fn tipos_e_letras() {
        let fa = TipoComprobante::desde_codigo(1).unwrap();
        assert_eq!(fa.nombre(), "Factura A");
        let ncb = TipoComprobante::desde_codigo(8).unwrap();
        assert_eq!(ncb.nombre(), "Nota de Crédito B");
        assert_eq!(ncb.signo(), Decimal::NEGATIVE_ONE);
        assert_eq!(TipoComprobante::desde_codigo(12).unwrap().letra, Letra::C);
        assert!(TipoComprobante::desde_codigo(4).is_none());
    }

    #[test]
    fn item_invalido_e_rejeitado() {
        let item = ItemComprobante::nuevo("X", Decimal::ZERO, d(10, 0), d(21, 0));
        assert!(item.validate().is_err());
        let item = ItemComprobante::nuevo("X", d(1, 0), d(10, 0), d(15, 0));
        assert!(item.validate().is_err());
    }
}
