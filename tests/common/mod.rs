// tests/common/mod.rs
#![allow(dead_code)]

use chrono::{Datelike, Duration, NaiveDate, Utc};
use factuflow::{
    client::ApiClient,
    config::{AppState, ClientConfig, Settings},
    db::usuario_repo::NuevoUsuario,
    models::{
        auth::LoginCredentials,
        comprobante::{EmitirComprobanteRequest, ItemComprobante},
        empresa::{CondicionIvaEmpresa, EmpresaCreate},
    },
    routes::build_router,
};
use rcgen::{
    date_time_ymd, BasicConstraints, CertificateParams, CertificateSigningRequestParams, DistinguishedName,
    DnType, IsCa, KeyPair,
};
use rust_decimal::Decimal;

pub const ADMIN_EMAIL: &str = "admin@factuflow.com";
pub const ADMIN_PASSWORD: &str = "admin123";

pub fn settings(seed: bool) -> Settings {
    let mut settings = Settings::new("segredo-de-teste");
    settings.bcrypt_cost = 4;
    settings.seed_data = seed;
    settings
}

pub async fn app(seed: bool) -> axum::Router {
    let state = AppState::new(settings(seed)).await.unwrap();
    build_router(state)
}

pub const OUTRO_EMAIL: &str = "operador@otra.com";
pub const OUTRO_PASSWORD: &str = "operador123";
pub const OUTRO_CUIT: &str = "30712345671";

/// Segunda empresa com um usuário comum (sem admin). Devolve o id da empresa.
pub async fn usuario_de_outra_empresa(state: &AppState) -> i64 {
    let ahora = Utc::now();
    let empresa = state
        .empresa_repo
        .create(
            EmpresaCreate {
                razon_social: "Otra Empresa S.R.L.".to_string(),
                cuit: OUTRO_CUIT.to_string(),
                condicion_iva: CondicionIvaEmpresa::ResponsableInscripto,
                domicilio: "Calle Falsa 123".to_string(),
                localidad: "Rosario".to_string(),
                provincia: "Santa Fe".to_string(),
                codigo_postal: "2000".to_string(),
                email: None,
                telefono: None,
                inicio_actividades: NaiveDate::from_ymd_opt(2021, 6, 1).unwrap(),
                logo: None,
            },
            ahora,
        )
        .await;

    let hashed = state.auth_service.hash_password(OUTRO_PASSWORD).await.unwrap();
    state
        .usuario_repo
        .create(
            NuevoUsuario {
                email: OUTRO_EMAIL,
                hashed_password: &hashed,
                nombre: "Operador",
                empresa_id: Some(empresa.id),
                es_admin: false,
            },
            ahora,
        )
        .await;
    empresa.id
}

/// Sobe o servidor numa porta efêmera e devolve a URL base.
pub async fn spawn_server(seed: bool) -> String {
    let router = app(seed).await;
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

pub async fn admin_client() -> ApiClient {
    let base_url = spawn_server(true).await;
    let client = ApiClient::new(&ClientConfig::new(base_url)).unwrap();
    client
        .auth()
        .login(&LoginCredentials {
            email: ADMIN_EMAIL.to_string(),
            password: ADMIN_PASSWORD.to_string(),
        })
        .await
        .unwrap();
    client
}

pub fn factura_b(empresa_id: i64, punto_venta_id: i64, precio: i64) -> EmitirComprobanteRequest {
    EmitirComprobanteRequest {
        empresa_id,
        punto_venta_id,
        tipo_comprobante: 6,
        concepto: 1,
        cliente_id: None,
        tipo_documento: 96,
        numero_documento: "30111222".to_string(),
        razon_social: "Juan Pérez".to_string(),
        condicion_iva: "CF".to_string(),
        domicilio: None,
        items: vec![ItemComprobante::nuevo(
            "Servicio técnico",
            Decimal::ONE,
            Decimal::from(precio),
            Decimal::from(21),
        )],
        fecha_servicio_desde: None,
        fecha_servicio_hasta: None,
        fecha_vto_pago: None,
        observaciones: None,
        moneda: "PES".to_string(),
        cotizacion: Decimal::ONE,
    }
}

/// Assina o CSR com uma autoridade de teste, válido de ontem até `dias` adiante.
pub fn firmar_csr(csr: &str, dias: i64) -> String {
    let ca_chave = KeyPair::generate().unwrap();
    let mut ca_params = CertificateParams::default();
    ca_params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
    ca_params.distinguished_name = DistinguishedName::new();
    ca_params.distinguished_name.push(DnType::CommonName, "Computadores Test");
    let ca = ca_params.self_signed(&ca_chave).unwrap();

    let hoy = Utc::now().date_naive();
    let desde = hoy - Duration::days(1);
    let hasta = hoy + Duration::days(dias);
    let mut pedido = CertificateSigningRequestParams::from_pem(csr).unwrap();
    pedido.params.not_before = date_time_ymd(desde.year(), desde.month() as u8, desde.day() as u8);
    pedido.params.not_after = date_time_ymd(hasta.year(), hasta.month() as u8, hasta.day() as u8);
    pedido.signed_by(&ca, &ca_chave).unwrap().pem()
}
