// src/stores/comprobantes.rs

use crate::{
    client::{ApiClient, ClientError},
    models::{
        api::Paginated,
        comprobante::{
            ComprobanteDetalle, ComprobanteListItem, EmitirComprobanteRequest, EmitirComprobanteResponse,
            ListarComprobantesParams,
        },
    },
    stores::{clientes::Paginacion, mensaje_error},
};

pub struct ComprobantesStore {
    client: ApiClient,
    pub comprobantes: Vec<ComprobanteListItem>,
    pub comprobante_actual: Option<ComprobanteDetalle>,
    pub paginacion: Paginacion,
    pub filtros: ListarComprobantesParams,
    pub loading: bool,
    pub error: Option<String>,
}

impl ComprobantesStore {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            comprobantes: Vec::new(),
            comprobante_actual: None,
            paginacion: Paginacion::con_tamano(20),
            filtros: ListarComprobantesParams::default(),
            loading: false,
            error: None,
        }
    }

    // --- getters ---

    pub fn total(&self) -> u64 {
        self.paginacion.total
    }

    pub fn hay_comprobantes(&self) -> bool {
        !self.comprobantes.is_empty()
    }

    pub fn pagina_actual(&self) -> u32 {
        self.paginacion.page
    }

    pub fn total_paginas(&self) -> u32 {
        self.paginacion.pages
    }

    // --- ações ---

    /// Os parâmetros informados passam a ser os filtros atuais.
    pub async fn listar(
        &mut self,
        params: ListarComprobantesParams,
    ) -> Result<Paginated<ComprobanteListItem>, ClientError> {
        self.loading = true;
        self.error = None;
        self.filtros = params;

        let mut consulta = self.filtros.clone();
        consulta.per_page.get_or_insert(self.paginacion.per_page);

        let result = self.client.comprobantes().listar(&consulta).await;
        match &result {
            Ok(pagina) => {
                self.comprobantes = pagina.items.clone();
                self.paginacion.actualizar(pagina);
            }
            Err(e) => self.error = Some(mensaje_error(e, "Error al listar comprobantes")),
        }
        self.loading = false;
        result
    }

    pub async fn obtener(&mut self, id: i64) -> Result<ComprobanteDetalle, ClientError> {
        self.loading = true;
        self.error = None;
        let result = self.client.comprobantes().obtener(id).await;
        match &result {
            Ok(detalle) => self.comprobante_actual = Some(detalle.clone()),
            Err(e) => self.error = Some(mensaje_error(e, "Error al obtener comprobante")),
        }
        self.loading = false;
        result
    }

    /// Resposta sem êxito não é erro de transporte: vira `error` e é devolvida.
    pub async fn emitir(
        &mut self,
        request: &EmitirComprobanteRequest,
    ) -> Result<EmitirComprobanteResponse, ClientError> {
        self.loading = true;
        self.error = None;

        let response = match self.client.comprobantes().emitir(request).await {
            Ok(r) => r,
            Err(e) => {
                self.error = Some(mensaje_error(&e, "Error al emitir comprobante"));
                self.loading = false;
                return Err(e);
            }
        };

        if !response.exito {
            self.error = Some(response.mensaje.clone());
            self.loading = false;
            return Ok(response);
        }

        if self.filtros.empresa_id.is_some() {
            // Falha no recarregamento já fica registrada em `error`.
            let filtros = self.filtros.clone();
            if let Err(e) = self.listar(filtros).await {
                tracing::warn!("Falha ao recarregar comprovantes: {}", e);
            }
        }
        self.loading = false;
        Ok(response)
    }

    pub async fn proximo_numero(
        &mut self,
        punto_venta: i32,
        tipo_comprobante: i32,
        empresa_id: i64,
    ) -> Result<i64, ClientError> {
        match self
            .client
            .comprobantes()
            .proximo_numero(punto_venta, tipo_comprobante, empresa_id)
            .await
        {
            Ok(r) => Ok(r.proximo_numero),
            Err(e) => {
                self.error = Some(mensaje_error(&e, "Error al obtener próximo número"));
                Err(e)
            }
        }
    }

    /// Sem empresa nos filtros não há o que paginar.
    pub async fn cambiar_pagina(&mut self, pagina: u32) -> Result<(), ClientError> {
        if self.filtros.empresa_id.is_none() {
            return Ok(());
        }
        let mut filtros = self.filtros.clone();
        filtros.page = Some(pagina);
        self.listar(filtros).await.map(|_| ())
    }

    pub fn limpiar_actual(&mut self) {
        self.comprobante_actual = None;
    }

    pub fn limpiar_error(&mut self) {
        self.error = None;
    }
}
