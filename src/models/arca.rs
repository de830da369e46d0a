// src/models/arca.rs

use serde::{Deserialize, Serialize};

use crate::models::certificado::{Ambiente, EstadoCertificado, EstadoServidores};

/// Situação da integração com a ARCA para a empresa do usuário.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArcaStatus {
    pub ambiente: Ambiente,
    pub configurado: bool,
    #[serde(default)]
    pub certificado_id: Option<i64>,
    #[serde(default)]
    pub dias_restantes: Option<i64>,
    #[serde(default)]
    pub estado_certificado: Option<EstadoCertificado>,
}

/// Resposta do teste de conexão (`FEDummy`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArcaTestResponse {
    pub status: String,
    pub message: String,
    pub ambiente: Ambiente,
    pub servidor: EstadoServidores,
}
