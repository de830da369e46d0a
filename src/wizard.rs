// src/wizard.rs
// Assistente de certificado ARCA em cinco etapas, estado só em memória.

use crate::models::certificado::{Certificado, GenerarCsrResponse, VerificacionResponse};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Etapa {
    #[default]
    Intro,
    GenerarClave,
    PortalArca,
    SubirCertificado,
    Verificar,
}

impl Etapa {
    pub const TODAS: [Etapa; 5] = [
        Etapa::Intro,
        Etapa::GenerarClave,
        Etapa::PortalArca,
        Etapa::SubirCertificado,
        Etapa::Verificar,
    ];

    /// Posição 1-based, como no indicador de progresso.
    pub fn numero(self) -> usize {
        Self::TODAS.iter().position(|e| *e == self).map_or(0, |i| i + 1)
    }

    fn siguiente(self) -> Option<Etapa> {
        Self::TODAS.get(self.numero()).copied()
    }

    fn anterior(self) -> Option<Etapa> {
        self.numero().checked_sub(2).and_then(|i| Self::TODAS.get(i).copied())
    }
}

#[derive(Debug, Clone, Default)]
pub struct CertificadoWizard {
    etapa: Etapa,
    pub cuit: String,
    pub nombre_empresa: String,
    /// Id do certificado sendo renovado, se houver.
    pub renovar: Option<i64>,
    csr: Option<GenerarCsrResponse>,
    pub certificado: Option<Certificado>,
    pub verificacion: Option<VerificacionResponse>,
}

impl CertificadoWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn renovacion(certificado_id: i64) -> Self {
        Self { renovar: Some(certificado_id), ..Self::default() }
    }

    pub fn etapa(&self) -> Etapa {
        self.etapa
    }

    /// CUIT com exatamente 11 dígitos e razão social preenchida.
    pub fn can_generate(&self) -> bool {
        let cuit = self.cuit.trim();
        cuit.len() == 11 && cuit.chars().all(|c| c.is_ascii_digit()) && !self.nombre_empresa.trim().is_empty()
    }

    pub fn puede_continuar(&self) -> bool {
        match self.etapa() {
            Etapa::Intro | Etapa::PortalArca => true,
            Etapa::GenerarClave => self.csr.is_some() && self.can_generate(),
            Etapa::SubirCertificado => self.certificado.is_some(),
            Etapa::Verificar => false,
        }
    }

    /// Avança se a etapa atual estiver completa; devolve se avançou.
    pub fn continuar(&mut self) -> bool {
        if !self.puede_continuar() {
            return false;
        }
        match self.etapa().siguiente() {
            Some(e) => {
                self.etapa = e;
                true
            }
            None => false,
        }
    }

    /// Volta uma etapa mantendo o que já foi preenchido.
    pub fn volver(&mut self) -> bool {
        match self.etapa().anterior() {
            Some(e) => {
                self.etapa = e;
                true
            }
            None => false,
        }
    }

    pub fn csr(&self) -> Option<&GenerarCsrResponse> {
        self.csr.as_ref()
    }

    /// Só aceita o CSR se os dados do formulário permitem gerar; devolve se registrou.
    pub fn registrar_csr(&mut self, csr: GenerarCsrResponse) -> bool {
        if !self.can_generate() {
            return false;
        }
        self.csr = Some(csr);
        true
    }

    pub fn registrar_certificado(&mut self, certificado: Certificado) {
        self.certificado = Some(certificado);
    }

    pub fn registrar_verificacion(&mut self, verificacion: VerificacionResponse) {
        self.verificacion = Some(verificacion);
    }

    pub fn finalizado(&self) -> bool {
        self.etapa() == Etapa::Verificar && self.verificacion.as_ref().is_some_and(|v| v.exito)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn csr() -> GenerarCsrResponse {
        serde_json::from_value(serde_json::json!({
            "csr": "-----BEGIN CERTIFICATE REQUEST-----",
            "key_filename": "20123456789_homologacion.key",
            "mensaje": "ok"
        }))
        .unwrap()
    }

    #[test]
    fn gerar_exige_cuit_e_nome() {
        let mut w = CertificadoWizard::new();
        assert!(!w.can_generate());
        w.cuit = "2012345678".into();
        w.nombre_empresa = "ACME".into();
        assert!(!w.can_generate());
        w.cuit = "20123456789".into();
        assert!(w.can_generate());
        w.nombre_empresa = "  ".into();
        assert!(!w.can_generate());
    }

    #[test]
    fn etapas_bloqueiam_sem_resultado() {
        let mut w = CertificadoWizard::new();
        assert_eq!(w.etapa().numero(), 1);
        assert!(w.continuar());
        assert_eq!(w.etapa(), Etapa::GenerarClave);

        assert!(!w.continuar());
        w.cuit = "20123456789".into();
        w.nombre_empresa = "ACME".into();
        assert!(w.registrar_csr(csr()));
        assert!(w.continuar());
        assert!(w.continuar());
        assert_eq!(w.etapa(), Etapa::SubirCertificado);
        assert!(!w.continuar());

        assert!(w.volver());
        assert_eq!(w.etapa(), Etapa::PortalArca);
        assert!(w.csr().is_some());
    }

    #[test]
    fn csr_sem_dados_validos_e_recusado() {
        let mut w = CertificadoWizard::new();
        assert!(w.continuar());
        w.cuit = "2012345678".into();
        w.nombre_empresa = "ACME".into();
        assert!(!w.registrar_csr(csr()));
        assert!(w.csr().is_none());
        assert!(!w.continuar());

        // CUIT alterado depois de gerar também trava o avanço
        w.cuit = "20123456789".into();
        assert!(w.registrar_csr(csr()));
        w.cuit = "201234".into();
        assert!(!w.puede_continuar());
        assert!(!w.continuar());
        assert_eq!(w.etapa(), Etapa::GenerarClave);
    }

    #[test]
    fn primeira_etapa_nao_volta() {
        let mut w = CertificadoWizard::renovacion(3);
        assert!(!w.volver());
        assert_eq!(w.renovar, Some(3));
        assert!(!w.finalizado());
    }
}
