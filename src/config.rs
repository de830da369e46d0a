// src/config.rs

use std::{env, path::PathBuf, str::FromStr, sync::Arc, time::Duration};

use anyhow::Context;
use chrono::{NaiveDate, Utc};

use crate::{
    db::{
        usuario_repo::NuevoUsuario, CertificadoRepository, ClienteRepository, ComprobanteRepository,
        Database, EmpresaRepository, PuntoVentaRepository, UsuarioRepository,
    },
    models::{
        certificado::Ambiente,
        empresa::{CondicionIvaEmpresa, EmpresaCreate},
        punto_venta::PuntoVentaCreate,
    },
    services::{
        arca_service::{ArcaService, Autorizador, AutorizadorHomologacion},
        auth::AuthService,
        certificados_service::CertificadosService,
        facturacion_service::FacturacionService,
        pdf_service::PdfService,
        reportes_service::ReportesService,
    },
};

// =============================================================================
//  CONFIGURAÇÃO DO SERVIDOR
// =============================================================================

#[derive(Debug, Clone)]
pub struct Settings {
    pub secret_key: String,
    pub jwt_expiration_minutes: i64,
    pub bind_addr: String,
    pub log_level: String,
    pub fonts_dir: PathBuf,
    pub certs_path: Option<PathBuf>,
    pub arca_ambiente: Ambiente,
    pub bcrypt_cost: u32,
    pub seed_data: bool,
}

impl Settings {
    /// Valores padrão com a chave informada (usado pelos testes).
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            jwt_expiration_minutes: 1440,
            bind_addr: "0.0.0.0:8000".to_string(),
            log_level: "info".to_string(),
            fonts_dir: PathBuf::from("./fonts"),
            certs_path: None,
            arca_ambiente: Ambiente::Homologacion,
            bcrypt_cost: bcrypt::DEFAULT_COST,
            seed_data: true,
        }
    }

    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let secret_key = env::var("APP_SECRET_KEY").context("APP_SECRET_KEY deve ser definida")?;
        let mut settings = Self::new(secret_key);

        settings.jwt_expiration_minutes = parse_var("JWT_EXPIRATION_MINUTES", settings.jwt_expiration_minutes)?;
        settings.bcrypt_cost = parse_var("BCRYPT_COST", settings.bcrypt_cost)?;
        settings.seed_data = parse_var("SEED_DATA", settings.seed_data)?;
        if let Ok(v) = env::var("BIND_ADDR") {
            settings.bind_addr = v;
        }
        if let Ok(v) = env::var("LOG_LEVEL") {
            settings.log_level = v;
        }
        if let Ok(v) = env::var("FONTS_DIR") {
            settings.fonts_dir = PathBuf::from(v);
        }
        settings.certs_path = env::var("CERTS_PATH").ok().map(PathBuf::from);
        if let Ok(v) = env::var("ARCA_AMBIENTE") {
            settings.arca_ambiente = Ambiente::desde_texto(&v.to_lowercase())
                .with_context(|| format!("ARCA_AMBIENTE inválido: {}", v))?;
        }

        Ok(settings)
    }
}

/// Lê uma variável numérica/booleana; ausente usa o padrão, inválida é erro.
fn parse_var<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{} inválida: {}", name, raw)),
        Err(_) => Ok(default),
    }
}

// =============================================================================
//  CONFIGURAÇÃO DO CLIENTE
// =============================================================================

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let base_url = env::var("FACTUFLOW_API_URL").unwrap_or_else(|_| "http://localhost:8000".to_string());
        let secs: u64 = parse_var("FACTUFLOW_TIMEOUT_SECS", 30)?;
        Ok(Self {
            base_url,
            timeout: Duration::from_secs(secs),
        })
    }
}

// =============================================================================
//  ESTADO DA APLICAÇÃO
// =============================================================================

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub db: Database,
    pub usuario_repo: UsuarioRepository,
    pub empresa_repo: EmpresaRepository,
    pub cliente_repo: ClienteRepository,
    pub punto_venta_repo: PuntoVentaRepository,
    pub certificado_repo: CertificadoRepository,
    pub comprobante_repo: ComprobanteRepository,
    pub auth_service: AuthService,
    pub facturacion_service: FacturacionService,
    pub certificados_service: CertificadosService,
    pub reportes_service: ReportesService,
    pub arca_service: ArcaService,
    pub pdf_service: PdfService,
}

impl AppState {
    pub async fn new(settings: Settings) -> anyhow::Result<Self> {
        let autorizador: Arc<dyn Autorizador> = Arc::new(AutorizadorHomologacion::default());
        Self::with_autorizador(settings, autorizador).await
    }

    pub async fn with_autorizador(settings: Settings, autorizador: Arc<dyn Autorizador>) -> anyhow::Result<Self> {
        let settings = Arc::new(settings);
        let db = Database::new();

        // --- Monta o gráfico de dependências ---
        let usuario_repo = UsuarioRepository::new(db.clone());
        let empresa_repo = EmpresaRepository::new(db.clone());
        let cliente_repo = ClienteRepository::new(db.clone());
        let punto_venta_repo = PuntoVentaRepository::new(db.clone());
        let certificado_repo = CertificadoRepository::new(db.clone());
        let comprobante_repo = ComprobanteRepository::new(db.clone());

        let auth_service = AuthService::new(
            usuario_repo.clone(),
            settings.secret_key.clone(),
            settings.jwt_expiration_minutes,
            settings.bcrypt_cost,
        );
        let facturacion_service = FacturacionService::new(
            empresa_repo.clone(),
            punto_venta_repo.clone(),
            cliente_repo.clone(),
            comprobante_repo.clone(),
            autorizador.clone(),
        );
        let certificados_service = CertificadosService::new(
            certificado_repo.clone(),
            autorizador.clone(),
            settings.certs_path.clone(),
        );
        let reportes_service = ReportesService::new(
            comprobante_repo.clone(),
            cliente_repo.clone(),
            punto_venta_repo.clone(),
        );
        let arca_service = ArcaService::new(certificado_repo.clone(), autorizador, settings.arca_ambiente);
        let pdf_service = PdfService::new(
            comprobante_repo.clone(),
            empresa_repo.clone(),
            cliente_repo.clone(),
            punto_venta_repo.clone(),
            settings.fonts_dir.clone(),
        );

        let state = Self {
            settings,
            db,
            usuario_repo,
            empresa_repo,
            cliente_repo,
            punto_venta_repo,
            certificado_repo,
            comprobante_repo,
            auth_service,
            facturacion_service,
            certificados_service,
            reportes_service,
            arca_service,
            pdf_service,
        };

        if state.settings.seed_data {
            state.seed().await?;
        }

        Ok(state)
    }

    /// Dados iniciais: empresa de teste, ponto de venda 1 e o usuário admin.
    async fn seed(&self) -> anyhow::Result<()> {
        let ahora = Utc::now();
        let inicio = NaiveDate::from_ymd_opt(2020, 1, 1).context("data de início inválida")?;

        let empresa = self
            .empresa_repo
            .create(
                EmpresaCreate {
                    razon_social: "Empresa Test S.A.".to_string(),
                    cuit: "20123456789".to_string(),
                    condicion_iva: CondicionIvaEmpresa::ResponsableInscripto,
                    domicilio: "Av. Siempre Viva 123".to_string(),
                    localidad: "Buenos Aires".to_string(),
                    provincia: "Buenos Aires".to_string(),
                    codigo_postal: "1000".to_string(),
                    email: None,
                    telefono: None,
                    inicio_actividades: inicio,
                    logo: None,
                },
                ahora,
            )
            .await;

        self.punto_venta_repo
            .create(
                empresa.id,
                PuntoVentaCreate { numero: 1, nombre: Some("Casa Central".to_string()) },
                ahora,
            )
            .await;

        let hashed = self.auth_service.hash_password("admin123").await?;
        self.usuario_repo
            .create(
                NuevoUsuario {
                    email: "admin@factuflow.com",
                    hashed_password: &hashed,
                    nombre: "Admin",
                    empresa_id: Some(empresa.id),
                    es_admin: true,
                },
                ahora,
            )
            .await;

        tracing::info!("🌱 Dados iniciais carregados (empresa {}, admin@factuflow.com)", empresa.id);
        Ok(())
    }
}
