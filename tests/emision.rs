// tests/emision.rs
// Emissões simultâneas na mesma série, direto no serviço.

mod common;

use std::{collections::HashSet, sync::Arc, time::Duration};

use async_trait::async_trait;
use chrono::Utc;
use factuflow::{
    common::error::AppError,
    config::AppState,
    models::{certificado::EstadoServidores, punto_venta::PuntoVentaArca},
    services::arca_service::{Autorizador, AutorizadorHomologacion, ResultadoCae, SolicitudCae},
};

/// Homologação com latência, para que as emissões se sobreponham.
struct AutorizadorLento(AutorizadorHomologacion);

#[async_trait]
impl Autorizador for AutorizadorLento {
    async fn solicitar_cae(&self, solicitud: &SolicitudCae) -> Result<ResultadoCae, AppError> {
        tokio::time::sleep(Duration::from_millis(5)).await;
        self.0.solicitar_cae(solicitud).await
    }

    async fn puntos_venta(&self, cuit: &str) -> Result<Vec<PuntoVentaArca>, AppError> {
        self.0.puntos_venta(cuit).await
    }

    async fn estado_servidores(&self) -> Result<EstadoServidores, AppError> {
        self.0.estado_servidores().await
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn emisiones_concurrentes_numeran_sin_huecos_ni_duplicados() {
    let autorizador: Arc<dyn Autorizador> = Arc::new(AutorizadorLento(AutorizadorHomologacion::default()));
    let state = AppState::with_autorizador(common::settings(true), autorizador).await.unwrap();
    let hoy = Utc::now().date_naive();

    let tareas: Vec<_> = (0..40)
        .map(|i| {
            let state = state.clone();
            tokio::spawn(async move {
                state
                    .facturacion_service
                    .emitir(common::factura_b(1, 1, 100 + i), hoy)
                    .await
                    .unwrap()
            })
        })
        .collect();

    let mut numeros = Vec::new();
    let mut caes = HashSet::new();
    for tarea in tareas {
        let respuesta = tarea.await.unwrap();
        numeros.push(respuesta.numero);
        caes.insert(respuesta.cae.unwrap());
    }
    numeros.sort_unstable();

    assert_eq!(numeros, (1..=40).collect::<Vec<i64>>());
    assert_eq!(caes.len(), 40);

    let mut guardados: Vec<i64> = state
        .comprobante_repo
        .list_by_empresa(1)
        .await
        .into_iter()
        .map(|r| r.comprobante.numero)
        .collect();
    guardados.sort_unstable();
    assert_eq!(guardados, numeros);

    let proximo = state.facturacion_service.proximo_numero(1, 1, 6).await.unwrap();
    assert_eq!(proximo.proximo_numero, 41);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn series_distintas_numeran_por_separado() {
    let state = AppState::new(common::settings(true)).await.unwrap();
    let hoy = Utc::now().date_naive();

    let mut factura_a = common::factura_b(1, 1, 100);
    factura_a.tipo_comprobante = 1;
    factura_a.tipo_documento = 80;
    factura_a.numero_documento = "30712345671".to_string();

    let (b, a) = tokio::join!(
        state.facturacion_service.emitir(common::factura_b(1, 1, 100), hoy),
        state.facturacion_service.emitir(factura_a, hoy),
    );

    assert_eq!(b.unwrap().numero, 1);
    assert_eq!(a.unwrap().numero, 1);
}
