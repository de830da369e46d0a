// src/services/reportes_service.rs

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    db::{database::ComprobanteRegistro, ClienteRepository, ComprobanteRepository, PuntoVentaRepository},
    format::{formatear_fecha, letra_comprobante, numero_completo},
    models::{
        cliente::Cliente,
        comprobante::{redondear, Clase, TipoComprobante},
        reporte::{
            ComprobanteIva, ComprobanteReporte, PeriodoFechas, PeriodoMensual, RankingCliente, ReporteIva,
            ReporteVentas, ResumenIva, ResumenVentas,
        },
    },
};

#[derive(Clone)]
pub struct ReportesService {
    comprobante_repo: ComprobanteRepository,
    cliente_repo: ClienteRepository,
    punto_venta_repo: PuntoVentaRepository,
}

/// Comprovante com os dados relacionados já resolvidos.
#[derive(Debug, Clone)]
pub struct FilaReporte {
    pub registro: ComprobanteRegistro,
    pub punto_venta: i32,
    pub cliente_id: i64,
    pub cliente_nombre: String,
    pub cliente_documento: String,
}

impl ReportesService {
    pub fn new(
        comprobante_repo: ComprobanteRepository,
        cliente_repo: ClienteRepository,
        punto_venta_repo: PuntoVentaRepository,
    ) -> Self {
        Self {
            comprobante_repo,
            cliente_repo,
            punto_venta_repo,
        }
    }

    pub async fn ventas(&self, empresa_id: i64, desde: NaiveDate, hasta: NaiveDate) -> Result<ReporteVentas, AppError> {
        validar_periodo(desde, hasta)?;
        let filas = self.filas(empresa_id, desde, hasta).await;
        Ok(generar_reporte_ventas(&filas, desde, hasta))
    }

    pub async fn iva_ventas(&self, empresa_id: i64, mes: u32, anio: i32) -> Result<ReporteIva, AppError> {
        let (desde, hasta) = rango_mensual(mes, anio)?;
        let filas = self.filas(empresa_id, desde, hasta).await;
        Ok(generar_reporte_iva(&filas, mes, anio))
    }

    pub async fn ranking_clientes(&self, empresa_id: i64, desde: NaiveDate, hasta: NaiveDate, limite: usize) -> Result<Vec<RankingCliente>, AppError> {
        validar_periodo(desde, hasta)?;
        if !(1..=100).contains(&limite) {
            return Err(AppError::Unprocessable("El límite debe estar entre 1 y 100".to_string()));
        }
        let filas = self.filas(empresa_id, desde, hasta).await;
        Ok(ranking_clientes(&filas, limite))
    }

    async fn filas(&self, empresa_id: i64, desde: NaiveDate, hasta: NaiveDate) -> Vec<FilaReporte> {
        let registros = self.comprobante_repo.list_autorizados(empresa_id, desde, hasta).await;
        let clientes: HashMap<i64, Cliente> = self
            .cliente_repo
            .list(Some(empresa_id), &Default::default())
            .await
            .into_iter()
            .map(|c| (c.id, c))
            .collect();
        let puntos: HashMap<i64, i32> = self
            .punto_venta_repo
            .list(Some(empresa_id))
            .await
            .into_iter()
            .map(|p| (p.id, p.numero))
            .collect();

        registros
            .into_iter()
            .map(|registro| {
                let cliente = clientes.get(&registro.comprobante.cliente_id);
                FilaReporte {
                    punto_venta: puntos.get(&registro.comprobante.punto_venta_id).copied().unwrap_or_default(),
                    cliente_id: registro.comprobante.cliente_id,
                    cliente_nombre: cliente.map(|c| c.razon_social.clone()).unwrap_or_default(),
                    cliente_documento: cliente.map(|c| c.numero_documento.clone()).unwrap_or_default(),
                    registro,
                }
            })
            .collect()
    }
}

// =============================================================================
//  CÁLCULOS
// =============================================================================

fn validar_periodo(desde: NaiveDate, hasta: NaiveDate) -> Result<(), AppError> {
    if desde > hasta {
        return Err(AppError::BadRequest(
            "La fecha 'desde' no puede ser mayor que la fecha 'hasta'".to_string(),
        ));
    }
    Ok(())
}

/// Primeiro e último dia do mês.
pub fn rango_mensual(mes: u32, anio: i32) -> Result<(NaiveDate, NaiveDate), AppError> {
    if !(1..=12).contains(&mes) {
        return Err(AppError::Unprocessable("El mes debe estar entre 1 y 12".to_string()));
    }
    if !(2000..=2100).contains(&anio) {
        return Err(AppError::Unprocessable("El año debe estar entre 2000 y 2100".to_string()));
    }
    let invalido = || AppError::Unprocessable("Período inválido".to_string());
    let desde = NaiveDate::from_ymd_opt(anio, mes, 1).ok_or_else(invalido)?;
    let siguiente = if mes == 12 {
        NaiveDate::from_ymd_opt(anio + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(anio, mes + 1, 1)
    };
    let hasta = siguiente.and_then(|d| d.pred_opt()).ok_or_else(invalido)?;
    Ok((desde, hasta))
}

pub fn nombre_mes(mes: u32) -> &'static str {
    match mes {
        1 => "Enero",
        2 => "Febrero",
        3 => "Marzo",
        4 => "Abril",
        5 => "Mayo",
        6 => "Junio",
        7 => "Julio",
        8 => "Agosto",
        9 => "Septiembre",
        10 => "Octubre",
        11 => "Noviembre",
        12 => "Diciembre",
        _ => "",
    }
}

/// Nome curto usado nos relatórios ("Nota Crédito B").
fn nombre_corto(tipo: i32) -> String {
    match TipoComprobante::desde_codigo(tipo) {
        Some(t) => {
            let clase = match t.clase {
                Clase::Factura => "Factura",
                Clase::NotaDebito => "Nota Débito",
                Clase::NotaCredito => "Nota Crédito",
            };
            format!("{} {}", clase, t.letra.as_str())
        }
        None => "Comprobante".to_string(),
    }
}

fn letra(tipo: i32) -> String {
    letra_comprobante(tipo).unwrap_or_default().to_string()
}

pub fn generar_reporte_ventas(filas: &[FilaReporte], desde: NaiveDate, hasta: NaiveDate) -> ReporteVentas {
    let mut total_facturas = Decimal::ZERO;
    let mut total_nc = Decimal::ZERO;
    let mut total_nd = Decimal::ZERO;
    let mut comprobantes = Vec::with_capacity(filas.len());

    for fila in filas {
        let comp = &fila.registro.comprobante;
        comprobantes.push(ComprobanteReporte {
            id: comp.id,
            fecha_emision: formatear_fecha(comp.fecha_emision),
            tipo_comprobante: comp.tipo_comprobante,
            tipo_nombre: nombre_corto(comp.tipo_comprobante),
            letra: letra(comp.tipo_comprobante),
            punto_venta: fila.punto_venta,
            numero: comp.numero,
            numero_completo: numero_completo(fila.punto_venta, comp.numero),
            cliente_nombre: fila.cliente_nombre.clone(),
            subtotal: comp.subtotal,
            iva_total: comp.iva_21 + comp.iva_10_5 + comp.iva_27,
            total: comp.total,
        });

        match TipoComprobante::desde_codigo(comp.tipo_comprobante).map(|t| t.clase) {
            Some(Clase::Factura) => total_facturas += comp.total,
            Some(Clase::NotaCredito) => total_nc += comp.total,
            Some(Clase::NotaDebito) => total_nd += comp.total,
            None => {}
        }
    }

    ReporteVentas {
        comprobantes,
        resumen: ResumenVentas {
            total_facturas,
            total_notas_credito: total_nc,
            total_notas_debito: total_nd,
            total_neto: total_facturas + total_nd - total_nc,
            cantidad_comprobantes: filas.len(),
            periodo: PeriodoFechas {
                desde: formatear_fecha(desde),
                hasta: formatear_fecha(hasta),
            },
        },
    }
}

/// Subdiário de IVA vendas: o gravado é reconstruído a partir do IVA de cada alíquota.
pub fn generar_reporte_iva(filas: &[FilaReporte], mes: u32, anio: i32) -> ReporteIva {
    let gravado = |iva: Decimal, tasa: Decimal| {
        if iva > Decimal::ZERO {
            redondear(iva * Decimal::ONE_HUNDRED / tasa)
        } else {
            Decimal::ZERO
        }
    };

    let mut comprobantes = Vec::with_capacity(filas.len());
    let mut resumen = ResumenIva {
        gravado_21: Decimal::ZERO,
        iva_21: Decimal::ZERO,
        gravado_10_5: Decimal::ZERO,
        iva_10_5: Decimal::ZERO,
        gravado_27: Decimal::ZERO,
        iva_27: Decimal::ZERO,
        no_gravado: Decimal::ZERO,
        exento: Decimal::ZERO,
        total_neto: Decimal::ZERO,
        total_iva: Decimal::ZERO,
        periodo: PeriodoMensual {
            mes,
            anio,
            nombre: nombre_mes(mes).to_string(),
        },
    };

    for fila in filas {
        let comp = &fila.registro.comprobante;
        let gravado_21 = gravado(comp.iva_21, Decimal::new(21, 0));
        let gravado_10_5 = gravado(comp.iva_10_5, Decimal::new(105, 1));
        let gravado_27 = gravado(comp.iva_27, Decimal::new(27, 0));

        // Sem IVA (tipo C ou itens isentos): o neto inteiro é isento
        let iva_total = comp.iva_21 + comp.iva_10_5 + comp.iva_27;
        let exento = if iva_total.is_zero() { comp.subtotal } else { Decimal::ZERO };

        comprobantes.push(ComprobanteIva {
            fecha_emision: formatear_fecha(comp.fecha_emision),
            tipo_letra: letra(comp.tipo_comprobante),
            tipo_nombre: nombre_corto(comp.tipo_comprobante).chars().take(2).collect(),
            punto_venta: fila.punto_venta,
            numero: comp.numero,
            numero_completo: numero_completo(fila.punto_venta, comp.numero),
            cuit_receptor: fila.cliente_documento.clone(),
            razon_social_receptor: fila.cliente_nombre.clone(),
            gravado_21,
            iva_21: comp.iva_21,
            gravado_10_5,
            iva_10_5: comp.iva_10_5,
            gravado_27,
            iva_27: comp.iva_27,
            no_gravado: Decimal::ZERO,
            exento,
            total: comp.total,
        });

        resumen.gravado_21 += gravado_21;
        resumen.iva_21 += comp.iva_21;
        resumen.gravado_10_5 += gravado_10_5;
        resumen.iva_10_5 += comp.iva_10_5;
        resumen.gravado_27 += gravado_27;
        resumen.iva_27 += comp.iva_27;
        resumen.exento += exento;
    }

    resumen.total_neto =
        resumen.gravado_21 + resumen.gravado_10_5 + resumen.gravado_27 + resumen.no_gravado + resumen.exento;
    resumen.total_iva = resumen.iva_21 + resumen.iva_10_5 + resumen.iva_27;

    ReporteIva { comprobantes, resumen }
}

/// Totais com sinal por cliente (notas de crédito subtraem), do maior para o menor.
pub fn ranking_clientes(filas: &[FilaReporte], limite: usize) -> Vec<RankingCliente> {
    let mut por_cliente: Vec<RankingCliente> = Vec::new();

    for fila in filas {
        let comp = &fila.registro.comprobante;
        let signo = TipoComprobante::desde_codigo(comp.tipo_comprobante)
            .map(|t| t.signo())
            .unwrap_or(Decimal::ZERO);

        let entrada = match por_cliente.iter_mut().position(|r| r.cliente_id == fila.cliente_id) {
            Some(i) => &mut por_cliente[i],
            None => {
                por_cliente.push(RankingCliente {
                    cliente_id: fila.cliente_id,
                    razon_social: fila.cliente_nombre.clone(),
                    numero_documento: fila.cliente_documento.clone(),
                    total_facturado: Decimal::ZERO,
                    cantidad_comprobantes: 0,
                });
                let ultimo = por_cliente.len() - 1;
                &mut por_cliente[ultimo]
            }
        };
        entrada.total_facturado += comp.total * signo;
        entrada.cantidad_comprobantes += 1;
    }

    por_cliente.sort_by(|a, b| b.total_facturado.cmp(&a.total_facturado));
    por_cliente.truncate(limite);
    por_cliente
}
