// tests/api.rs
// Rotas exercitadas direto no `Router`, sem abrir socket.

mod common;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use factuflow::{config::AppState, routes::build_router};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn enviar(app: &Router, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, value)
}

async fn token_admin(app: &Router) -> String {
    let (status, body) = enviar(
        app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": common::ADMIN_EMAIL, "password": common::ADMIN_PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "bearer");
    body["access_token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_responde() {
    let app = common::app(false).await;
    let (status, body) = enviar(&app, Method::GET, "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn login_com_senha_errada_e_401() {
    let app = common::app(true).await;
    let (status, body) = enviar(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": common::ADMIN_EMAIL, "password": "errada" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "Email o contraseña incorrectos");
}

#[tokio::test]
async fn rotas_protegidas_exigem_token() {
    let app = common::app(true).await;

    let (status, body) = enviar(&app, Method::GET, "/api/auth/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "No autenticado");

    let (status, body) = enviar(&app, Method::GET, "/api/clientes", Some("lixo"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "No se pudo validar las credenciales");

    let token = token_admin(&app).await;
    let (status, body) = enviar(&app, Method::GET, "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], common::ADMIN_EMAIL);
    assert_eq!(body["es_admin"], true);
}

#[tokio::test]
async fn setup_so_funciona_sem_usuarios() {
    let vazio = common::app(false).await;
    let (status, _) = enviar(
        &vazio,
        Method::POST,
        "/api/auth/setup",
        None,
        Some(json!({ "email": "x@y.com", "password": "123", "nombre": "X" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, body) = enviar(
        &vazio,
        Method::POST,
        "/api/auth/setup",
        None,
        Some(json!({ "email": "dueno@acme.com", "password": "secreta", "nombre": "Dueño" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["es_admin"], true);

    let (status, body) = enviar(
        &vazio,
        Method::POST,
        "/api/auth/setup",
        None,
        Some(json!({ "email": "otro@acme.com", "password": "secreta", "nombre": "Otro" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().starts_with("Ya existe al menos un usuario"));
}

#[tokio::test]
async fn cliente_com_cuit_invalido_e_422() {
    let app = common::app(true).await;
    let token = token_admin(&app).await;

    let (status, body) = enviar(
        &app,
        Method::POST,
        "/api/clientes",
        Some(&token),
        Some(json!({
            "razon_social": "Acme S.R.L.",
            "tipo_documento": "CUIT",
            "numero_documento": "30-123",
            "condicion_iva": "RI"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"], "CUIT inválido");

    let (status, body) = enviar(&app, Method::GET, "/api/clientes?search=acme", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 0);
    assert_eq!(body["items"], json!([]));

    let (status, body) = enviar(&app, Method::GET, "/api/clientes/999", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Cliente no encontrado");
}

#[tokio::test]
async fn listagem_de_comprovantes_exige_empresa() {
    let app = common::app(true).await;
    let token = token_admin(&app).await;

    let (status, body) = enviar(&app, Method::GET, "/api/comprobantes", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"], "El parámetro empresa_id es obligatorio");

    let (status, body) = enviar(&app, Method::GET, "/api/comprobantes?empresa_id=1", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 0);
    assert_eq!(body["page"], 1);
}

#[tokio::test]
async fn emissao_sem_itens_tem_erro_estruturado() {
    let app = common::app(true).await;
    let token = token_admin(&app).await;

    let mut request = serde_json::to_value(common::factura_b(1, 1, 1000)).unwrap();
    request["items"] = json!([]);

    let (status, body) = enviar(&app, Method::POST, "/api/comprobantes/emitir", Some(&token), Some(request)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"]["mensaje"], "Error de validación");
    let errores = body["detail"]["errores"].as_array().unwrap();
    assert!(errores.iter().any(|e| e == "Debe incluir al menos un ítem"));
}

#[tokio::test]
async fn relatorio_iva_valida_mes() {
    let app = common::app(true).await;
    let token = token_admin(&app).await;

    let (status, body) = enviar(
        &app,
        Method::GET,
        "/api/reportes/iva-ventas?empresa_id=1&periodo_mes=13&periodo_anio=2024",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"], "El mes debe estar entre 1 y 12");
}

#[tokio::test]
async fn claves_so_do_cuit_da_propria_empresa() {
    let state = AppState::new(common::settings(true)).await.unwrap();
    let app = build_router(state.clone());
    common::usuario_de_outra_empresa(&state).await;

    let (status, body) = enviar(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": common::OUTRO_EMAIL, "password": common::OUTRO_PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["access_token"].as_str().unwrap().to_string();

    let (status, body) = enviar(
        &app,
        Method::GET,
        "/api/certificados/keys?cuit=20123456789&ambiente=homologacion",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["detail"], "No tienes permiso para ver las claves de este CUIT");

    let uri = format!("/api/certificados/keys?cuit={}&ambiente=homologacion", common::OUTRO_CUIT);
    let (status, body) = enviar(&app, Method::GET, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    // Admin continua vendo qualquer CUIT
    let admin = token_admin(&app).await;
    let (status, _) = enviar(&app, Method::GET, &uri, Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
}
