// src/format.rs
// Formatação no padrão es-AR (`.` para milhares, `,` para decimais).

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::comprobante::{EstadoComprobante, TipoComprobante};

pub use crate::models::comprobante::nombre_concepto;

/// "20123456789" -> "20-12345678-9". Outros tamanhos voltam como vieram.
pub fn formatear_cuit(cuit: &str) -> String {
    if cuit.chars().count() != 11 {
        return cuit.to_string();
    }
    let chars: Vec<char> = cuit.chars().collect();
    let prefijo: String = chars[..2].iter().collect();
    let cuerpo: String = chars[2..10].iter().collect();
    format!("{}-{}-{}", prefijo, cuerpo, chars[10])
}

/// Agrupa a parte inteira de três em três dígitos com `.`.
fn agrupar(entero: &str) -> String {
    let digitos: Vec<char> = entero.chars().collect();
    let mut out = String::with_capacity(digitos.len() + digitos.len() / 3);
    for (i, c) in digitos.iter().enumerate() {
        if i > 0 && (digitos.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(*c);
    }
    out
}

fn separar(valor: Decimal) -> (bool, String, String) {
    let texto = valor.abs().to_string();
    let (entero, decimales) = texto.split_once('.').unwrap_or((texto.as_str(), ""));
    (valor.is_sign_negative() && !valor.is_zero(), entero.to_string(), decimales.to_string())
}

/// 1210 -> "$ 1.210,00".
pub fn formatear_moneda(valor: Decimal) -> String {
    let redondeado = valor.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let (negativo, entero, decimales) = separar(redondeado);
    let signo = if negativo { "-" } else { "" };
    format!("{}$ {},{:0<2}", signo, agrupar(&entero), decimales)
}

/// Até três casas decimais, sem zeros à direita: 1234.5 -> "1.234,5".
pub fn formatear_numero(valor: Decimal) -> String {
    let redondeado = valor
        .round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let (negativo, entero, decimales) = separar(redondeado);
    let signo = if negativo { "-" } else { "" };
    if decimales.is_empty() {
        format!("{}{}", signo, agrupar(&entero))
    } else {
        format!("{}{},{}", signo, agrupar(&entero), decimales)
    }
}

pub fn formatear_fecha(fecha: NaiveDate) -> String {
    fecha.format("%d/%m/%Y").to_string()
}

/// Aceita "2024-03-05" ou um ISO com hora; texto que não é data volta igual.
pub fn formatear_fecha_iso(fecha: &str) -> String {
    let dia = fecha.split('T').next().unwrap_or(fecha);
    match NaiveDate::parse_from_str(dia, "%Y-%m-%d") {
        Ok(d) => formatear_fecha(d),
        Err(_) => fecha.to_string(),
    }
}

// --- comprovantes ---

pub fn numero_completo(punto_venta: i32, numero: i64) -> String {
    format!("{:04}-{:08}", punto_venta, numero)
}

pub fn nombre_tipo_comprobante(codigo: i32) -> Option<String> {
    TipoComprobante::desde_codigo(codigo).map(TipoComprobante::nombre)
}

pub fn letra_comprobante(codigo: i32) -> Option<&'static str> {
    TipoComprobante::desde_codigo(codigo).map(|t| t.letra.as_str())
}

pub fn nombre_estado(estado: EstadoComprobante) -> &'static str {
    estado.nombre()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn cuit_com_hifens() {
        assert_eq!(formatear_cuit("20123456789"), "20-12345678-9");
        assert_eq!(formatear_cuit("2012345678"), "2012345678");
        assert_eq!(formatear_cuit(""), "");
    }

    #[test]
    fn moeda_argentina() {
        assert_eq!(formatear_moneda(d("1210")), "$ 1.210,00");
        assert_eq!(formatear_moneda(d("1234567.891")), "$ 1.234.567,89");
        assert_eq!(formatear_moneda(d("0.005")), "$ 0,01");
        assert_eq!(formatear_moneda(d("-500.5")), "-$ 500,50");
        assert_eq!(formatear_moneda(Decimal::ZERO), "$ 0,00");
    }

    #[test]
    fn numeros_com_milhares() {
        assert_eq!(formatear_numero(d("1234.5")), "1.234,5");
        assert_eq!(formatear_numero(d("1000000")), "1.000.000");
        assert_eq!(formatear_numero(d("2.12345")), "2,123");
        assert_eq!(formatear_numero(d("100.000")), "100");
    }

    #[test]
    fn datas_ignoram_hora() {
        assert_eq!(formatear_fecha_iso("2024-03-05"), "05/03/2024");
        assert_eq!(formatear_fecha_iso("2024-03-05T23:59:00Z"), "05/03/2024");
        assert_eq!(formatear_fecha_iso("sin fecha"), "sin fecha");
    }

    #[test]
    fn total_de_uma_fatura_formatado() {
        use crate::models::comprobante::{calcular_totales, ItemComprobante};

        let item = ItemComprobante::nuevo("Servicio", Decimal::ONE, d("1000"), d("21"));
        let totales = calcular_totales(&[item]);
        assert_eq!(formatear_moneda(totales.subtotal), "$ 1.000,00");
        assert_eq!(formatear_moneda(totales.iva_21), "$ 210,00");
        assert_eq!(formatear_moneda(totales.total), "$ 1.210,00");
    }

    #[test]
    fn auxiliares_de_comprovante() {
        assert_eq!(numero_completo(1, 42), "0001-00000042");
        assert_eq!(nombre_tipo_comprobante(8).as_deref(), Some("Nota de Crédito B"));
        assert_eq!(nombre_tipo_comprobante(4), None);
        assert_eq!(letra_comprobante(11), Some("C"));
        assert_eq!(nombre_concepto(2), Some("Servicios"));
        assert_eq!(nombre_estado(EstadoComprobante::Rechazado), "Rechazado");
    }
}
