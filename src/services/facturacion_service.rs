// src/services/facturacion_service.rs

use std::{collections::HashMap, sync::Arc};

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tokio::sync::Mutex;

use crate::{
    common::error::AppError,
    db::{
        database::ComprobanteRegistro, ClienteRepository, ComprobanteRepository, EmpresaRepository,
        PuntoVentaRepository,
    },
    models::{
        api::Paginated,
        cliente::{Cliente, ClienteCreate, CondicionIva, TipoDocumento},
        comprobante::{
            calcular_totales, redondear, Comprobante, ComprobanteDetalle, ComprobanteListItem,
            EmitirComprobanteRequest, EmitirComprobanteResponse, EstadoComprobante, Letra,
            ListarComprobantesParams, ProximoNumeroResponse, TipoComprobante,
        },
        empresa::Empresa,
        punto_venta::PuntoVenta,
    },
    services::arca_service::{Autorizador, ResultadoCae, SolicitudCae},
};

const PER_PAGE_POR_DEFECTO: u32 = 20;
const CUIT_TIPO_DOCUMENTO: i32 = 80;

/// (empresa_id, punto_venta_id, tipo_comprobante)
type SerieNumeracion = (i64, i64, i32);

#[derive(Clone)]
pub struct FacturacionService {
    empresa_repo: EmpresaRepository,
    punto_venta_repo: PuntoVentaRepository,
    cliente_repo: ClienteRepository,
    comprobante_repo: ComprobanteRepository,
    autorizador: Arc<dyn Autorizador>,
    /// Um cadeado por série: numerar, autorizar e gravar acontecem sob ele.
    series: Arc<Mutex<HashMap<SerieNumeracion, Arc<Mutex<()>>>>>,
}

/// Entidades já conferidas pela validação.
struct Contexto {
    empresa: Empresa,
    punto_venta: PuntoVenta,
    cliente: Option<Cliente>,
}

impl FacturacionService {
    pub fn new(
        empresa_repo: EmpresaRepository,
        punto_venta_repo: PuntoVentaRepository,
        cliente_repo: ClienteRepository,
        comprobante_repo: ComprobanteRepository,
        autorizador: Arc<dyn Autorizador>,
    ) -> Self {
        Self {
            empresa_repo,
            punto_venta_repo,
            cliente_repo,
            comprobante_repo,
            autorizador,
            series: Arc::default(),
        }
    }

    async fn cadeado_da_serie(&self, serie: SerieNumeracion) -> Arc<Mutex<()>> {
        self.series.lock().await.entry(serie).or_default().clone()
    }

    // =========================================================================
    //  EMISSÃO
    // =========================================================================

    /// Valida, numera, calcula, autoriza e grava. Falhas viram `AppError::Emision`.
    pub async fn emitir(&self, request: EmitirComprobanteRequest, hoy: NaiveDate) -> Result<EmitirComprobanteResponse, AppError> {
        // 1. Validar dados
        let contexto = self.validar(&request).await.map_err(|errores| AppError::Emision {
            mensaje: "Error de validación".to_string(),
            errores,
        })?;

        // 2. Próximo número (a série fica travada até a gravação)
        let cadeado = self
            .cadeado_da_serie((request.empresa_id, contexto.punto_venta.id, request.tipo_comprobante))
            .await;
        let _turno = cadeado.lock().await;
        let numero = self
            .comprobante_repo
            .ultimo_numero(request.empresa_id, contexto.punto_venta.id, request.tipo_comprobante)
            .await
            + 1;

        // 3. Totais
        let totales = calcular_totales(&request.items);

        // 4. Solicitar CAE
        let solicitud = SolicitudCae {
            cuit_emisor: contexto.empresa.cuit.clone(),
            punto_venta: contexto.punto_venta.numero,
            tipo_comprobante: request.tipo_comprobante,
            numero,
            concepto: request.concepto,
            tipo_documento: request.tipo_documento,
            numero_documento: request.numero_documento.clone(),
            fecha: hoy,
            totales,
            fecha_servicio_desde: request.fecha_servicio_desde,
            fecha_servicio_hasta: request.fecha_servicio_hasta,
            fecha_vto_pago: request.fecha_vto_pago,
            moneda: request.moneda.clone(),
            cotizacion: request.cotizacion,
        };

        let resultado = self.autorizador.solicitar_cae(&solicitud).await.map_err(|e| {
            tracing::error!("Erro ao solicitar CAE: {}", e);
            AppError::Emision {
                mensaje: "Error al solicitar CAE a ARCA".to_string(),
                errores: vec![e.to_string()],
            }
        })?;

        // 5. Gravar (autorizado ou rechazado)
        let cliente = match contexto.cliente {
            Some(c) => c,
            None => self.crear_cliente_rapido(&request).await,
        };

        let (estado, cae, cae_vencimiento, errores) = match resultado {
            ResultadoCae::Aprobado { cae, vencimiento, observaciones } => {
                if !observaciones.is_empty() {
                    tracing::warn!("CAE {} com observações: {:?}", cae, observaciones);
                }
                (EstadoComprobante::Autorizado, Some(cae), Some(vencimiento), Vec::new())
            }
            ResultadoCae::Rechazado { errores } => (EstadoComprobante::Rechazado, None, None, errores),
        };

        let mut items = request.items.clone();
        for (idx, item) in items.iter_mut().enumerate() {
            item.subtotal = Some(redondear(item.importe_neto()));
            if item.orden == 0 {
                item.orden = idx as u32;
            }
        }

        let registro = self
            .comprobante_repo
            .create(
                Comprobante {
                    id: 0,
                    tipo_comprobante: request.tipo_comprobante,
                    numero,
                    fecha_emision: hoy,
                    fecha_vencimiento: request.fecha_vto_pago,
                    subtotal: totales.subtotal,
                    descuento: Decimal::ZERO,
                    iva_21: totales.iva_21,
                    iva_10_5: totales.iva_10_5,
                    iva_27: totales.iva_27,
                    otros_impuestos: Decimal::ZERO,
                    total: totales.total,
                    cae: cae.clone(),
                    cae_vencimiento,
                    estado,
                    moneda: request.moneda.clone(),
                    cotizacion: request.cotizacion,
                    observaciones: request.observaciones.clone(),
                    empresa_id: request.empresa_id,
                    punto_venta_id: contexto.punto_venta.id,
                    cliente_id: cliente.id,
                },
                items,
            )
            .await;

        if estado == EstadoComprobante::Rechazado {
            return Err(AppError::Emision {
                mensaje: "Error al solicitar CAE a ARCA".to_string(),
                errores,
            });
        }

        tracing::info!(
            "🧾 Comprovante {} {:04}-{:08} emitido (CAE {})",
            request.tipo_comprobante,
            contexto.punto_venta.numero,
            numero,
            cae.as_deref().unwrap_or("-")
        );

        Ok(EmitirComprobanteResponse {
            exito: true,
            comprobante_id: Some(registro.comprobante.id),
            tipo_comprobante: request.tipo_comprobante,
            punto_venta: contexto.punto_venta.numero,
            numero,
            fecha: hoy,
            cae,
            cae_vencimiento,
            total: totales.total,
            mensaje: "Comprobante emitido exitosamente".to_string(),
            errores: Vec::new(),
        })
    }

    /// Regras de negócio e da ARCA. Retorna todas as violações encontradas.
    async fn validar(&self, request: &EmitirComprobanteRequest) -> Result<Contexto, Vec<String>> {
        let mut errores = Vec::new();

        match TipoComprobante::desde_codigo(request.tipo_comprobante) {
            Some(tipo) if tipo.letra == Letra::A && request.tipo_documento != CUIT_TIPO_DOCUMENTO => {
                errores.push(
                    "Para comprobantes tipo A, el receptor debe tener CUIT (tipo documento 80)".to_string(),
                );
            }
            Some(_) => {}
            None => errores.push(format!("Tipo de comprobante no soportado: {}", request.tipo_comprobante)),
        }

        // Serviços exigem datas
        if matches!(request.concepto, 2 | 3) {
            if request.fecha_servicio_desde.is_none() {
                errores.push("Para servicios debe indicar fecha desde".to_string());
            }
            if request.fecha_servicio_hasta.is_none() {
                errores.push("Para servicios debe indicar fecha hasta".to_string());
            }
            if request.fecha_vto_pago.is_none() {
                errores.push("Para servicios debe indicar fecha de vencimiento de pago".to_string());
            }
        }
        if let (Some(desde), Some(hasta)) = (request.fecha_servicio_desde, request.fecha_servicio_hasta) {
            if hasta < desde {
                errores.push("La fecha hasta no puede ser menor a la fecha desde".to_string());
            }
        }

        let empresa = self.empresa_repo.find_by_id(request.empresa_id).await;
        if empresa.is_none() {
            errores.push("Empresa no encontrada".to_string());
        }

        let punto_venta = self
            .punto_venta_repo
            .find_by_id(request.punto_venta_id)
            .await
            .filter(|p| p.empresa_id == request.empresa_id && p.activo);
        if punto_venta.is_none() {
            errores.push("Punto de venta no encontrado".to_string());
        }

        let cliente = match request.cliente_id {
            Some(id) => {
                let cliente = self
                    .cliente_repo
                    .find_by_id(id)
                    .await
                    .filter(|c| c.empresa_id == request.empresa_id);
                if cliente.is_none() {
                    errores.push("Cliente no encontrado".to_string());
                }
                cliente
            }
            None => None,
        };

        if request.items.is_empty() {
            errores.push("Debe incluir al menos un ítem".to_string());
        }

        match (empresa, punto_venta) {
            (Some(empresa), Some(punto_venta)) if errores.is_empty() => Ok(Contexto {
                empresa,
                punto_venta,
                cliente,
            }),
            _ => Err(errores),
        }
    }

    async fn crear_cliente_rapido(&self, request: &EmitirComprobanteRequest) -> Cliente {
        let tipo_documento = TipoDocumento::desde_codigo_arca(request.tipo_documento).unwrap_or(TipoDocumento::Dni);
        self.cliente_repo
            .create(
                request.empresa_id,
                ClienteCreate {
                    razon_social: request.razon_social.clone(),
                    tipo_documento,
                    numero_documento: request.numero_documento.clone(),
                    condicion_iva: CondicionIva::desde_texto(&request.condicion_iva),
                    domicilio: request.domicilio.clone(),
                    localidad: None,
                    provincia: None,
                    codigo_postal: None,
                    email: None,
                    telefono: None,
                    notas: None,
                },
                Utc::now(),
            )
            .await
    }

    // =========================================================================
    //  CONSULTAS
    // =========================================================================

    /// `punto_venta` é o número do ponto de venda, não o ID.
    pub async fn proximo_numero(&self, empresa_id: i64, punto_venta: i32, tipo_comprobante: i32) -> Result<ProximoNumeroResponse, AppError> {
        let pv = self
            .punto_venta_repo
            .find_by_numero(empresa_id, punto_venta)
            .await
            .ok_or_else(|| AppError::NotFound("Punto de venta no encontrado".to_string()))?;

        let ultimo = self
            .comprobante_repo
            .ultimo_numero(empresa_id, pv.id, tipo_comprobante)
            .await;

        Ok(ProximoNumeroResponse {
            punto_venta,
            tipo_comprobante,
            proximo_numero: ultimo + 1,
        })
    }

    pub async fn listar(&self, empresa_id: i64, params: &ListarComprobantesParams) -> Paginated<ComprobanteListItem> {
        let registros = self.comprobante_repo.list_by_empresa(empresa_id).await;
        let clientes = self.clientes_por_id(empresa_id).await;
        let puntos = self.puntos_por_id(empresa_id).await;

        let buscar = params
            .buscar
            .as_deref()
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .map(str::to_lowercase);

        let items: Vec<ComprobanteListItem> = registros
            .into_iter()
            .map(|r| r.comprobante)
            .filter(|c| params.desde.is_none_or(|d| c.fecha_emision >= d))
            .filter(|c| params.hasta.is_none_or(|h| c.fecha_emision <= h))
            .filter(|c| params.tipo.is_none_or(|t| c.tipo_comprobante == t))
            .filter(|c| params.cliente_id.is_none_or(|id| c.cliente_id == id))
            .map(|c| {
                let cliente = clientes.get(&c.cliente_id);
                ComprobanteListItem {
                    id: c.id,
                    tipo_comprobante: c.tipo_comprobante,
                    numero: c.numero,
                    fecha_emision: c.fecha_emision,
                    total: c.total,
                    estado: c.estado,
                    cae: c.cae,
                    cliente_nombre: cliente.map(|c| c.razon_social.clone()).unwrap_or_default(),
                    cliente_documento: cliente.map(|c| c.numero_documento.clone()).unwrap_or_default(),
                    punto_venta_numero: puntos.get(&c.punto_venta_id).map(|p| p.numero).unwrap_or_default(),
                }
            })
            .filter(|item| match &buscar {
                Some(b) => {
                    item.cliente_nombre.to_lowercase().contains(b)
                        || item.cliente_documento.contains(b.as_str())
                        || item.numero.to_string() == *b
                }
                None => true,
            })
            .collect();

        let page = params.page.unwrap_or(1);
        let per_page = params.per_page.unwrap_or(PER_PAGE_POR_DEFECTO).clamp(1, 100);
        Paginated::from_vec(items, page, per_page)
    }

    pub async fn obtener(&self, id: i64) -> Result<ComprobanteDetalle, AppError> {
        let registro = self
            .comprobante_repo
            .find_by_id(id)
            .await
            .ok_or_else(|| AppError::NotFound("Comprobante no encontrado".to_string()))?;
        Ok(self.detalle(registro).await)
    }

    pub async fn detalle(&self, registro: ComprobanteRegistro) -> ComprobanteDetalle {
        let cliente = self.cliente_repo.find_by_id(registro.comprobante.cliente_id).await;
        let punto_venta = self.punto_venta_repo.find_by_id(registro.comprobante.punto_venta_id).await;

        let mut items = registro.items;
        items.sort_by_key(|i| i.orden);

        ComprobanteDetalle {
            comprobante: registro.comprobante,
            items,
            cliente_nombre: cliente.as_ref().map(|c| c.razon_social.clone()),
            cliente_cuit: cliente.map(|c| c.numero_documento),
            punto_venta_numero: punto_venta.map(|p| p.numero),
        }
    }

    async fn clientes_por_id(&self, empresa_id: i64) -> HashMap<i64, Cliente> {
        self.cliente_repo
            .list(Some(empresa_id), &Default::default())
            .await
            .into_iter()
            .map(|c| (c.id, c))
            .collect()
    }

    async fn puntos_por_id(&self, empresa_id: i64) -> HashMap<i64, PuntoVenta> {
        self.punto_venta_repo
            .list(Some(empresa_id))
            .await
            .into_iter()
            .map(|p| (p.id, p))
            .collect()
    }
}
