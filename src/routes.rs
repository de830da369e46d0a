// src/routes.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};

use crate::{config::AppState, handlers, middleware::auth::auth_guard};

pub fn build_router(app_state: AppState) -> Router {
    // Rotas públicas de autenticação
    let auth_routes = Router::new()
        .route("/login", post(handlers::auth::login))
        .route("/setup", post(handlers::auth::setup))
        .route(
            "/me",
            get(handlers::auth::me).layer(axum_middleware::from_fn_with_state(app_state.clone(), auth_guard)),
        );

    let empresa_routes = Router::new()
        .route(
            "/",
            get(handlers::empresas::list_empresas).post(handlers::empresas::create_empresa),
        )
        .route(
            "/{id}",
            get(handlers::empresas::get_empresa)
                .put(handlers::empresas::update_empresa)
                .delete(handlers::empresas::delete_empresa),
        );

    let cliente_routes = Router::new()
        .route(
            "/",
            get(handlers::clientes::list_clientes).post(handlers::clientes::create_cliente),
        )
        .route(
            "/{id}",
            get(handlers::clientes::get_cliente)
                .put(handlers::clientes::update_cliente)
                .delete(handlers::clientes::delete_cliente),
        );

    let punto_venta_routes = Router::new()
        .route(
            "/",
            get(handlers::puntos_venta::list_puntos_venta).post(handlers::puntos_venta::create_punto_venta),
        )
        .route(
            "/{id}",
            axum::routing::put(handlers::puntos_venta::update_punto_venta)
                .delete(handlers::puntos_venta::delete_punto_venta),
        );

    let certificado_routes = Router::new()
        .route("/", get(handlers::certificados::list_certificados))
        .route("/generar-csr", post(handlers::certificados::generar_csr))
        .route("/subir-certificado", post(handlers::certificados::subir_certificado))
        .route("/verificar-conexion/{id}", post(handlers::certificados::verificar_conexion))
        .route("/alertas-vencimiento", get(handlers::certificados::alertas_vencimiento))
        .route("/keys", get(handlers::certificados::listar_claves))
        .route(
            "/{id}",
            get(handlers::certificados::get_certificado).delete(handlers::certificados::delete_certificado),
        );

    let comprobante_routes = Router::new()
        .route("/", get(handlers::comprobantes::listar_comprobantes))
        .route("/emitir", post(handlers::comprobantes::emitir_comprobante))
        .route(
            "/proximo-numero/{punto_venta}/{tipo}",
            get(handlers::comprobantes::proximo_numero),
        )
        .route("/{id}", get(handlers::comprobantes::obtener_comprobante));

    let reporte_routes = Router::new()
        .route("/ventas", get(handlers::reportes::reporte_ventas))
        .route("/iva-ventas", get(handlers::reportes::reporte_iva_ventas))
        .route("/clientes", get(handlers::reportes::ranking_clientes));

    let arca_routes = Router::new()
        .route("/status", get(handlers::arca::status))
        .route("/test", post(handlers::arca::test_conexion))
        .route("/puntos-venta", get(handlers::arca::puntos_venta));

    let pdf_routes = Router::new()
        .route("/comprobante/{id}", get(handlers::pdf::descargar_pdf))
        .route("/comprobante/{id}/preview", get(handlers::pdf::preview_pdf));

    // Tudo o que não é autenticação passa pelo guard
    let protected = Router::new()
        .nest("/empresas", empresa_routes)
        .nest("/clientes", cliente_routes)
        .nest("/puntos-venta", punto_venta_routes)
        .nest("/certificados", certificado_routes)
        .nest("/comprobantes", comprobante_routes)
        .nest("/reportes", reporte_routes)
        .nest("/arca", arca_routes)
        .nest("/pdf", pdf_routes)
        .layer(axum_middleware::from_fn_with_state(app_state.clone(), auth_guard));

    Router::new()
        .route("/api/health", get(handlers::health::health))
        .nest("/api/auth", auth_routes)
        .nest("/api", protected)
        .with_state(app_state)
}
