// src/services/arca_service.rs

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Datelike, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    db::CertificadoRepository,
    models::{
        arca::{ArcaStatus, ArcaTestResponse},
        certificado::{Ambiente, Certificado, EstadoCertificado, EstadoServidores},
        comprobante::Totales,
        punto_venta::PuntoVentaArca,
    },
};

// =============================================================================
//  AUTORIZADOR (WSFEv1)
// =============================================================================

/// Dados enviados à ARCA para solicitar o CAE de um comprovante.
#[derive(Debug, Clone)]
pub struct SolicitudCae {
    pub cuit_emisor: String,
    pub punto_venta: i32,
    pub tipo_comprobante: i32,
    pub numero: i64,
    pub concepto: i32,
    pub tipo_documento: i32,
    pub numero_documento: String,
    pub fecha: NaiveDate,
    pub totales: Totales,
    pub fecha_servicio_desde: Option<NaiveDate>,
    pub fecha_servicio_hasta: Option<NaiveDate>,
    pub fecha_vto_pago: Option<NaiveDate>,
    pub moneda: String,
    pub cotizacion: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResultadoCae {
    Aprobado {
        cae: String,
        vencimiento: NaiveDate,
        observaciones: Vec<String>,
    },
    Rechazado {
        errores: Vec<String>,
    },
}

/// Ponto de integração com os webservices da ARCA.
#[async_trait]
pub trait Autorizador: Send + Sync {
    async fn solicitar_cae(&self, solicitud: &SolicitudCae) -> Result<ResultadoCae, AppError>;

    async fn puntos_venta(&self, cuit: &str) -> Result<Vec<PuntoVentaArca>, AppError>;

    /// Equivalente ao `FEDummy`: estado dos servidores.
    async fn estado_servidores(&self) -> Result<EstadoServidores, AppError>;
}

/// Simulador do ambiente de homologação: aprova tudo que tiver importe positivo.
pub struct AutorizadorHomologacion {
    puntos_venta: Vec<PuntoVentaArca>,
}

impl AutorizadorHomologacion {
    pub fn new(puntos_venta: Vec<PuntoVentaArca>) -> Self {
        Self { puntos_venta }
    }
}

impl Default for AutorizadorHomologacion {
    fn default() -> Self {
        Self::new(vec![
            PuntoVentaArca {
                numero: 1,
                emision_tipo: "CAE - Factura Electrónica".to_string(),
                bloqueado: "N".to_string(),
                fecha_baja: None,
            },
            PuntoVentaArca {
                numero: 2,
                emision_tipo: "CAE - Factura Electrónica".to_string(),
                bloqueado: "N".to_string(),
                fecha_baja: None,
            },
            PuntoVentaArca {
                numero: 3,
                emision_tipo: "CAE - Factura Electrónica".to_string(),
                bloqueado: "S".to_string(),
                fecha_baja: None,
            },
        ])
    }
}

/// CAE de 14 dígitos: "7" + AAAAMMDD + número (5 dígitos).
pub fn cae_simulado(fecha: NaiveDate, numero: i64) -> String {
    format!(
        "7{:04}{:02}{:02}{:05}",
        fecha.year(),
        fecha.month(),
        fecha.day(),
        numero.rem_euclid(100_000)
    )
}

#[async_trait]
impl Autorizador for AutorizadorHomologacion {
    async fn solicitar_cae(&self, solicitud: &SolicitudCae) -> Result<ResultadoCae, AppError> {
        if solicitud.totales.total <= Decimal::ZERO {
            return Ok(ResultadoCae::Rechazado {
                errores: vec!["10016: El importe total debe ser mayor a cero".to_string()],
            });
        }

        Ok(ResultadoCae::Aprobado {
            cae: cae_simulado(solicitud.fecha, solicitud.numero),
            vencimiento: solicitud.fecha + Duration::days(10),
            observaciones: Vec::new(),
        })
    }

    async fn puntos_venta(&self, _cuit: &str) -> Result<Vec<PuntoVentaArca>, AppError> {
        Ok(self.puntos_venta.clone())
    }

    async fn estado_servidores(&self) -> Result<EstadoServidores, AppError> {
        Ok(EstadoServidores {
            aplicacion: Some("OK".to_string()),
            base_datos: Some("OK".to_string()),
            autenticacion: Some("OK".to_string()),
        })
    }
}

// =============================================================================
//  SERVIÇO
// =============================================================================

#[derive(Clone)]
pub struct ArcaService {
    certificado_repo: CertificadoRepository,
    autorizador: Arc<dyn Autorizador>,
    ambiente: Ambiente,
}

impl ArcaService {
    pub fn new(certificado_repo: CertificadoRepository, autorizador: Arc<dyn Autorizador>, ambiente: Ambiente) -> Self {
        Self {
            certificado_repo,
            autorizador,
            ambiente,
        }
    }

    pub async fn status(&self, empresa_id: i64) -> ArcaStatus {
        let hoy = Utc::now().date_naive();
        let certificado = self.certificado_repo.find_activo(empresa_id, self.ambiente, hoy).await;

        ArcaStatus {
            ambiente: self.ambiente,
            configurado: certificado
                .as_ref()
                .is_some_and(|c| c.estado != EstadoCertificado::Vencido),
            certificado_id: certificado.as_ref().map(|c| c.id),
            dias_restantes: certificado.as_ref().map(|c| c.dias_restantes),
            estado_certificado: certificado.as_ref().map(|c| c.estado),
        }
    }

    pub async fn test_conexion(&self, empresa_id: i64) -> Result<ArcaTestResponse, AppError> {
        self.certificado_activo(empresa_id).await?;
        let servidor = self.autorizador.estado_servidores().await?;

        Ok(ArcaTestResponse {
            status: "ok".to_string(),
            message: "Conexión exitosa con ARCA".to_string(),
            ambiente: self.ambiente,
            servidor,
        })
    }

    pub async fn puntos_venta(&self, empresa_id: i64) -> Result<Vec<PuntoVentaArca>, AppError> {
        let certificado = self.certificado_activo(empresa_id).await?;
        self.autorizador.puntos_venta(&certificado.cuit).await
    }

    async fn certificado_activo(&self, empresa_id: i64) -> Result<Certificado, AppError> {
        let hoy = Utc::now().date_naive();
        self.certificado_repo
            .find_activo(empresa_id, self.ambiente, hoy)
            .await
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "No se encontró un certificado activo para el ambiente {}",
                    self.ambiente.as_str()
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cae_tem_14_digitos() {
        let fecha = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let cae = cae_simulado(fecha, 42);
        assert_eq!(cae, "72024030500042");
        assert_eq!(cae.len(), 14);
    }

    #[tokio::test]
    async fn homologacao_rejeita_importe_zero() {
        let fecha = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let solicitud = SolicitudCae {
            cuit_emisor: "20123456789".into(),
            punto_venta: 1,
            tipo_comprobante: 6,
            numero: 1,
            concepto: 1,
            tipo_documento: 96,
            numero_documento: "12345678".into(),
            fecha,
            totales: Totales::default(),
            fecha_servicio_desde: None,
            fecha_servicio_hasta: None,
            fecha_vto_pago: None,
            moneda: "PES".into(),
            cotizacion: Decimal::ONE,
        };
        let resultado = AutorizadorHomologacion::default().solicitar_cae(&solicitud).await.unwrap();
        assert!(matches!(resultado, ResultadoCae::Rechazado { .. }));
    }
}
