// src/client/error.rs

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Resposta fora de 2xx; `detail` já vem legível.
    #[error("{detail}")]
    Api { status: u16, detail: String },

    #[error("Error de conexión: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Respuesta inválida del servidor: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    /// Mensagem exibida ao usuário.
    pub fn detail(&self) -> String {
        self.to_string()
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detalhe_da_api_e_repassado() {
        let err = ClientError::Api { status: 404, detail: "Cliente no encontrado".into() };
        assert_eq!(err.detail(), "Cliente no encontrado");
        assert_eq!(err.status(), Some(404));
    }
}
