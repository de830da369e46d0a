// src/main.rs

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use factuflow::{
    config::{AppState, Settings},
    routes::build_router,
};

#[tokio::main]
async fn main() {
    // Sem configuração válida o processo não sobe.
    let settings = Settings::from_env().expect("Falha ao carregar a configuração.");

    // RUST_LOG tem prioridade; LOG_LEVEL é o padrão
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

    let bind_addr = settings.bind_addr.clone();
    let app_state = AppState::new(settings)
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    let app = build_router(app_state);

    let listener = TcpListener::bind(&bind_addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", bind_addr);
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
