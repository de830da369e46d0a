// src/stores.rs
// Contêineres de estado por recurso: última lista, item atual, `loading` e `error`.

pub mod auth;
pub mod certificados;
pub mod clientes;
pub mod comprobantes;
pub mod empresa;
pub mod puntos_venta;
pub mod ui;

use crate::client::ClientError;

pub use auth::{AuthStore, SessionSnapshot};
pub use certificados::CertificadosStore;
pub use clientes::ClientesStore;
pub use comprobantes::ComprobantesStore;
pub use empresa::EmpresaStore;
pub use puntos_venta::PuntosVentaStore;
pub use ui::{Notificacion, TipoNotificacion, UiStore};

/// Mensagem que a tela mostra: o `detail` da API ou o texto fixo da ação.
pub(crate) fn mensaje_error(err: &ClientError, fallback: &str) -> String {
    match err {
        ClientError::Api { detail, .. } if !detail.trim().is_empty() => detail.clone(),
        _ => fallback.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usa_detalhe_da_api_ou_o_padrao() {
        let api = ClientError::Api { status: 404, detail: "Cliente no encontrado".into() };
        assert_eq!(mensaje_error(&api, "Error al cargar el cliente"), "Cliente no encontrado");

        let vazio = ClientError::Api { status: 500, detail: " ".into() };
        assert_eq!(mensaje_error(&vazio, "Error al cargar el cliente"), "Error al cargar el cliente");

        let decode = ClientError::Decode(serde_json::from_str::<u8>("x").unwrap_err());
        assert_eq!(mensaje_error(&decode, "Error al listar comprobantes"), "Error al listar comprobantes");
    }
}
