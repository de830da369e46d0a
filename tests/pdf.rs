// tests/pdf.rs
// Rotas de PDF e `PdfApi`.

mod common;

use std::path::PathBuf;

use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use chrono::Utc;
use factuflow::{
    client::ClientError,
    config::{AppState, Settings},
    routes::build_router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn montar(settings: Settings) -> (Router, AppState) {
    let state = AppState::new(settings).await.unwrap();
    (build_router(state.clone()), state)
}

async fn token(app: &Router, email: &str, password: &str) -> String {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "email": email, "password": password }).to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_slice(&to_bytes(response.into_body(), usize::MAX).await.unwrap()).unwrap();
    body["access_token"].as_str().unwrap().to_string()
}

async fn baixar(app: &Router, uri: &str, token: &str) -> (StatusCode, HeaderMap, Vec<u8>) {
    let request = Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec();
    (status, headers, bytes)
}

fn detail(bytes: &[u8]) -> String {
    let body: Value = serde_json::from_slice(bytes).unwrap();
    body["detail"].as_str().unwrap().to_string()
}

/// Emite uma Factura B de 1000 + IVA na empresa semeada.
async fn emitir_factura(state: &AppState) -> i64 {
    state
        .facturacion_service
        .emitir(common::factura_b(1, 1, 1000), Utc::now().date_naive())
        .await
        .unwrap()
        .comprobante_id
        .unwrap()
}

/// Pasta com a família "Roboto": `./fonts` se existir, senão DejaVu do sistema
/// copiada com os nomes esperados.
fn fontes_de_teste() -> Option<PathBuf> {
    let local = PathBuf::from("./fonts");
    if local.join("Roboto-Regular.ttf").exists() {
        return Some(local);
    }

    let dejavu = PathBuf::from("/usr/share/fonts/truetype/dejavu");
    let variantes = [
        ("DejaVuSans.ttf", "Roboto-Regular.ttf"),
        ("DejaVuSans-Bold.ttf", "Roboto-Bold.ttf"),
        ("DejaVuSans-Oblique.ttf", "Roboto-Italic.ttf"),
        ("DejaVuSans-BoldOblique.ttf", "Roboto-BoldItalic.ttf"),
    ];
    if !variantes.iter().all(|(origem, _)| dejavu.join(origem).exists()) {
        return None;
    }

    let destino = std::env::temp_dir().join(format!("factuflow-fonts-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&destino).ok()?;
    for (origem, nome) in variantes {
        std::fs::copy(dejavu.join(origem), destino.join(nome)).ok()?;
    }
    Some(destino)
}

#[tokio::test]
async fn pdf_de_comprovante_inexistente_e_404() {
    let (app, _) = montar(common::settings(true)).await;
    let token = token(&app, common::ADMIN_EMAIL, common::ADMIN_PASSWORD).await;

    let (status, _, body) = baixar(&app, "/api/pdf/comprobante/999", &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(detail(&body), "Comprobante no encontrado");

    let (status, _, _) = baixar(&app, "/api/pdf/comprobante/999/preview", &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn pdf_de_outra_empresa_e_403() {
    let (app, state) = montar(common::settings(true)).await;
    let id = emitir_factura(&state).await;
    common::usuario_de_outra_empresa(&state).await;
    let token = token(&app, common::OUTRO_EMAIL, common::OUTRO_PASSWORD).await;

    let (status, _, body) = baixar(&app, &format!("/api/pdf/comprobante/{}", id), &token).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(detail(&body), "No tienes permiso para ver este comprobante");
}

#[tokio::test]
async fn sem_fontes_o_pdf_e_500() {
    let mut settings = common::settings(true);
    settings.fonts_dir = PathBuf::from("/caminho/sem/fontes");
    let (app, state) = montar(settings).await;
    let id = emitir_factura(&state).await;
    let token = token(&app, common::ADMIN_EMAIL, common::ADMIN_PASSWORD).await;

    let (status, _, body) = baixar(&app, &format!("/api/pdf/comprobante/{}", id), &token).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let detail = detail(&body);
    assert!(detail.starts_with("Error al generar PDF"), "{}", detail);
    assert!(detail.contains("/caminho/sem/fontes"));
}

#[tokio::test]
async fn pdf_renderizado_com_fontes() {
    let Some(fonts_dir) = fontes_de_teste() else {
        eprintln!("sem fontes TrueType disponíveis; renderização não exercitada");
        return;
    };
    let mut settings = common::settings(true);
    settings.fonts_dir = fonts_dir;
    let (app, state) = montar(settings).await;
    let id = emitir_factura(&state).await;
    let token = token(&app, common::ADMIN_EMAIL, common::ADMIN_PASSWORD).await;

    let (status, headers, body) = baixar(&app, &format!("/api/pdf/comprobante/{}", id), &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "application/pdf");
    assert_eq!(
        headers[header::CONTENT_DISPOSITION],
        "attachment; filename=\"FACTURA_B_0001-00000001.pdf\""
    );
    assert!(body.starts_with(b"%PDF"));

    let (status, headers, body) = baixar(&app, &format!("/api/pdf/comprobante/{}/preview", id), &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_DISPOSITION], "inline");
    assert!(body.starts_with(b"%PDF"));
}

#[tokio::test]
async fn cliente_pdf_propaga_404() {
    let client = common::admin_client().await;
    let err = client.pdf().descargar(999).await.unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 404, .. }));
    assert_eq!(err.detail(), "Comprobante no encontrado");

    let err = client.pdf().preview(999).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
}
