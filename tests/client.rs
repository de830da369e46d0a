// tests/client.rs
// Cliente REST e contêineres de estado contra o servidor em porta efêmera.

mod common;

use chrono::Utc;
use rust_decimal::Decimal;
use factuflow::{
    client::{certificados::SubirCertificado, ApiClient, ClientError},
    config::ClientConfig,
    models::{
        auth::LoginCredentials,
        certificado::{Ambiente, Certificado, EstadoCertificado, GenerarCsrRequest},
        cliente::{ClienteCreate, ClienteListParams, ClienteUpdate, CondicionIva, TipoDocumento},
        comprobante::ListarComprobantesParams,
        punto_venta::PuntoVentaCreate,
    },
    stores::{AuthStore, ClientesStore, ComprobantesStore, PuntosVentaStore, SessionSnapshot},
};

fn nuevo_cliente(razon_social: &str, cuit: &str) -> ClienteCreate {
    ClienteCreate {
        razon_social: razon_social.to_string(),
        tipo_documento: TipoDocumento::Cuit,
        numero_documento: cuit.to_string(),
        condicion_iva: CondicionIva::ResponsableInscripto,
        domicilio: None,
        localidad: None,
        provincia: None,
        codigo_postal: None,
        email: None,
        telefono: None,
        notas: None,
    }
}

/// Gera o CSR, assina com a autoridade de teste e sobe o .crt para a empresa do admin.
async fn instalar_certificado(client: &ApiClient) -> Certificado {
    let csr = client
        .certificados()
        .generar_csr(&GenerarCsrRequest {
            cuit: "20123456789".to_string(),
            nombre_empresa: "Empresa Test S.A.".to_string(),
            ambiente: Ambiente::Homologacion,
        })
        .await
        .unwrap();
    assert!(csr.csr.starts_with("-----BEGIN CERTIFICATE REQUEST-----"));

    client
        .certificados()
        .subir_certificado(SubirCertificado {
            contenido: common::firmar_csr(&csr.csr, 365).into_bytes(),
            filename: "test.crt".to_string(),
            cuit: "20123456789".to_string(),
            nombre: "Homologación".to_string(),
            ambiente: Ambiente::Homologacion,
            key_filename: csr.key_filename,
        })
        .await
        .unwrap()
}

#[tokio::test]
async fn setup_ja_feito_nao_e_exigido() {
    let base_url = common::spawn_server(true).await;
    let client = ApiClient::new(&ClientConfig::new(base_url)).unwrap();
    assert!(!client.auth().check_setup_required().await.unwrap());

    let vazio = ApiClient::new(&ClientConfig::new(common::spawn_server(false).await)).unwrap();
    assert!(vazio.auth().check_setup_required().await.unwrap());
}

#[tokio::test]
async fn erros_da_api_viram_client_error() {
    let client = common::admin_client().await;
    let err = client.clientes().get(404).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.detail(), "Cliente no encontrado");

    client.auth().logout();
    let err = client.auth().me().await.unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 401, .. }));
}

#[tokio::test]
async fn crud_de_clientes_pelo_store() {
    let client = common::admin_client().await;
    let mut store = ClientesStore::new(client.clone());

    let creado = store.create_cliente(&nuevo_cliente("Acme S.R.L.", "30712345678")).await.unwrap();
    store.create_cliente(&nuevo_cliente("Beta S.A.", "30798765432")).await.unwrap();
    assert_eq!(store.clientes[0].razon_social, "Beta S.A.");

    let pagina = store.fetch_clientes(ClienteListParams::default()).await.unwrap();
    assert_eq!(pagina.total, 2);
    assert_eq!(store.pagination.per_page, 30);
    // Mais recente primeiro, agora vindo do servidor
    assert_eq!(store.clientes[0].razon_social, "Beta S.A.");
    assert_eq!(store.clientes[1].id, creado.id);

    // Busca sem distinguir maiúsculas
    let busca = ClienteListParams { search: Some("ACME".to_string()), ..Default::default() };
    let pagina = store.fetch_clientes(busca).await.unwrap();
    assert_eq!(pagina.total, 1);
    assert_eq!(store.clientes.len(), 1);
    assert_eq!(store.clientes[0].razon_social, "Acme S.R.L.");
    let busca = ClienteListParams { search: Some("beta s.a".to_string()), ..Default::default() };
    store.fetch_clientes(busca).await.unwrap();
    assert_eq!(store.clientes.len(), 1);
    assert_eq!(store.clientes[0].razon_social, "Beta S.A.");

    // CUIT inválido não entra na lista
    let err = store.create_cliente(&nuevo_cliente("Gamma S.A.", "30-123")).await.unwrap_err();
    assert_eq!(err.status(), Some(422));
    assert_eq!(store.error.as_deref(), Some("CUIT inválido"));
    let pagina = store.fetch_clientes(ClienteListParams::default()).await.unwrap();
    assert_eq!(pagina.total, 2);
    assert!(store.clientes.iter().all(|c| c.razon_social != "Gamma S.A."));

    store.fetch_cliente(creado.id).await.unwrap();
    let cambios = ClienteUpdate { razon_social: Some("Acme Argentina S.R.L.".to_string()), ..Default::default() };
    store.update_cliente(creado.id, &cambios).await.unwrap();
    assert_eq!(store.cliente_actual.as_ref().unwrap().razon_social, "Acme Argentina S.R.L.");
    assert!(store.clientes.iter().any(|c| c.razon_social == "Acme Argentina S.R.L."));

    store.delete_cliente(creado.id).await.unwrap();
    assert!(store.clientes.iter().all(|c| c.id != creado.id));

    let err = store.fetch_cliente(9999).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(store.error.as_deref(), Some("Cliente no encontrado"));
    assert!(!store.loading);
}

#[tokio::test]
async fn emissao_recarrega_lista_filtrada() {
    let client = common::admin_client().await;
    let punto_venta = client.puntos_venta().list().await.unwrap().remove(0);
    let mut store = ComprobantesStore::new(client.clone());

    store
        .listar(ListarComprobantesParams { empresa_id: Some(1), ..Default::default() })
        .await
        .unwrap();
    assert!(!store.hay_comprobantes());

    let response = store.emitir(&common::factura_b(1, punto_venta.id, 1000)).await.unwrap();
    assert!(response.exito);
    assert_eq!(response.numero, 1);
    assert_eq!(response.cae.as_deref().map(str::len), Some(14));
    assert_eq!(store.total(), 1);
    // 1000 + 21% de IVA
    assert_eq!(response.total, Decimal::from(1210));
    assert_eq!(store.comprobantes[0].total, Decimal::from(1210));
    assert_eq!(store.comprobantes[0].numero, 1);

    let proximo = store.proximo_numero(punto_venta.numero, 6, 1).await.unwrap();
    assert_eq!(proximo, 2);

    let id = response.comprobante_id.unwrap();
    let detalle = store.obtener(id).await.unwrap();
    assert_eq!(detalle.items.len(), 1);
    store.limpiar_actual();
    assert!(store.comprobante_actual.is_none());
}

#[tokio::test]
async fn emissao_rejeitada_fica_no_erro() {
    let client = common::admin_client().await;
    let punto_venta = client.puntos_venta().list().await.unwrap().remove(0);
    let mut store = ComprobantesStore::new(client);

    let err = store.emitir(&common::factura_b(1, punto_venta.id, 0)).await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(
        store.error.as_deref(),
        Some("Error al solicitar CAE a ARCA: 10016: El importe total debe ser mayor a cero")
    );
    store.limpiar_error();
    assert!(store.error.is_none());
    assert!(!store.loading);
}

#[tokio::test]
async fn sincronizacao_cria_apenas_habilitados() {
    let client = common::admin_client().await;
    instalar_certificado(&client).await;

    let mut store = PuntosVentaStore::new(client.clone());
    let resultado = store.sync_from_arca().await.unwrap();

    // Homologação informa 1 e 2 habilitados e 3 bloqueado; o 1 já existe.
    assert_eq!(resultado.total_arca, 2);
    assert_eq!(resultado.nuevos, 1);
    assert_eq!(resultado.existentes, 1);
    let numeros: Vec<i32> = store.puntos_venta.iter().map(|pv| pv.numero).collect();
    assert_eq!(numeros, vec![1, 2]);
    assert!(!store.syncing);

    let err = store.create(&PuntoVentaCreate { numero: 2, nombre: None }).await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(store.error.as_deref(), Some("Ya existe un punto de venta con el número 2"));
}

#[tokio::test]
async fn sessao_restaurada_e_revalidada() {
    let base_url = common::spawn_server(true).await;
    let client = ApiClient::new(&ClientConfig::new(base_url.clone())).unwrap();
    let mut auth = AuthStore::new(client);
    auth.login(&LoginCredentials {
        email: common::ADMIN_EMAIL.to_string(),
        password: common::ADMIN_PASSWORD.to_string(),
    })
    .await
    .unwrap();
    let snapshot = auth.snapshot();

    let outro = ApiClient::new(&ClientConfig::new(base_url)).unwrap();
    let mut restaurado = AuthStore::new(outro.clone());
    restaurado.init(snapshot);
    assert!(restaurado.is_authenticated);
    assert!(restaurado.check_auth().await);
    assert!(outro.token().is_some());

    let mut invalido = AuthStore::new(outro.clone());
    invalido.init(SessionSnapshot {
        token: Some("expirado".to_string()),
        user: restaurado.user.clone(),
    });
    assert!(!invalido.check_auth().await);
    assert!(!invalido.is_authenticated);
    assert!(outro.token().is_none());
}

#[tokio::test]
async fn relatorio_de_vendas_soma_emitidos() {
    let client = common::admin_client().await;
    let punto_venta = client.puntos_venta().list().await.unwrap().remove(0);
    client.comprobantes().emitir(&common::factura_b(1, punto_venta.id, 1000)).await.unwrap();
    client.comprobantes().emitir(&common::factura_b(1, punto_venta.id, 500)).await.unwrap();

    let hoy = Utc::now().date_naive();
    let reporte = client.reportes().ventas(1, hoy, hoy).await.unwrap();
    assert_eq!(reporte.comprobantes.len(), 2);

    // Cada emissão sem cliente_id cadastra um cliente rápido.
    let ranking = client.reportes().ranking_clientes(1, hoy, hoy, 10).await.unwrap();
    assert_eq!(ranking.len(), 2);
    assert!(ranking[0].total_facturado > ranking[1].total_facturado);
}

#[tokio::test]
async fn certificado_assinado_fica_valido_com_datas_do_arquivo() {
    let client = common::admin_client().await;
    let certificado = instalar_certificado(&client).await;

    let hoy = Utc::now().date_naive();
    assert_eq!(certificado.fecha_emision, hoy - chrono::Duration::days(1));
    assert_eq!(certificado.fecha_vencimiento, hoy + chrono::Duration::days(365));
    assert_eq!(certificado.estado, EstadoCertificado::Valido);
    assert!(client.certificados().alertas_vencimiento().await.unwrap().is_empty());

    let claves = client
        .certificados()
        .listar_claves("20123456789", Ambiente::Homologacion)
        .await
        .unwrap();
    assert_eq!(claves, vec![certificado.archivo_key.clone()]);
}
