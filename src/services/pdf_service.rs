// src/services/pdf_service.rs

use std::path::PathBuf;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use genpdf::{elements, style, Element, Scale};
use image::Luma;
use qrcode::QrCode;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    common::error::AppError,
    db::{ClienteRepository, ComprobanteRepository, EmpresaRepository, PuntoVentaRepository},
    format::{formatear_cuit, formatear_fecha, formatear_moneda, numero_completo},
    models::{
        cliente::{Cliente, CondicionIva},
        comprobante::{Comprobante, ItemComprobante, TipoComprobante},
        empresa::{CondicionIvaEmpresa, Empresa},
    },
};

pub const ARCA_QR_BASE_URL: &str = "https://www.afip.gob.ar/fe/qr/?p=";

/// Conteúdo do QR exigido pela ARCA (RG 4892).
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DatosQr {
    pub ver: u8,
    pub fecha: String,
    pub cuit: u64,
    pub pto_vta: i32,
    pub tipo_cmp: i32,
    pub nro_cmp: i64,
    pub importe: Decimal,
    pub moneda: String,
    pub ctz: Decimal,
    pub tipo_doc_rec: i32,
    pub nro_doc_rec: u64,
    pub tipo_cod_aut: String,
    pub cod_aut: u64,
}

fn solo_digitos(texto: &str) -> u64 {
    texto
        .chars()
        .filter(char::is_ascii_digit)
        .collect::<String>()
        .parse()
        .unwrap_or(0)
}

impl DatosQr {
    pub fn new(comprobante: &Comprobante, empresa: &Empresa, cliente: &Cliente, punto_venta: i32) -> Self {
        Self {
            ver: 1,
            fecha: comprobante.fecha_emision.format("%Y-%m-%d").to_string(),
            cuit: solo_digitos(&empresa.cuit),
            pto_vta: punto_venta,
            tipo_cmp: comprobante.tipo_comprobante,
            nro_cmp: comprobante.numero,
            importe: comprobante.total,
            moneda: comprobante.moneda.clone(),
            ctz: comprobante.cotizacion,
            tipo_doc_rec: cliente.tipo_documento.codigo_arca(),
            nro_doc_rec: solo_digitos(&cliente.numero_documento),
            tipo_cod_aut: "E".to_string(),
            cod_aut: comprobante.cae.as_deref().map(solo_digitos).unwrap_or(0),
        }
    }

    /// URL codificada no QR: base + JSON em base64.
    pub fn url(&self) -> Result<String, AppError> {
        let json = serde_json::to_vec(self).map_err(anyhow::Error::from)?;
        Ok(format!("{}{}", ARCA_QR_BASE_URL, STANDARD.encode(json)))
    }
}

/// "FACTURA_A_0001-00000042.pdf" (somente ASCII, vai no Content-Disposition).
pub fn nombre_archivo(tipo_comprobante: i32, punto_venta: i32, numero: i64) -> String {
    let (nombre, letra) = match TipoComprobante::desde_codigo(tipo_comprobante) {
        Some(t) => (t.nombre_clase().to_uppercase().replace('É', "E"), t.letra.as_str()),
        None => ("COMPROBANTE".to_string(), ""),
    };
    format!("{}_{}_{:04}-{:08}.pdf", nombre, letra, punto_venta, numero)
}

pub struct PdfGenerado {
    pub contenido: Vec<u8>,
    pub filename: String,
}

#[derive(Clone)]
pub struct PdfService {
    comprobante_repo: ComprobanteRepository,
    empresa_repo: EmpresaRepository,
    cliente_repo: ClienteRepository,
    punto_venta_repo: PuntoVentaRepository,
    fonts_dir: PathBuf,
}

impl PdfService {
    pub fn new(
        comprobante_repo: ComprobanteRepository,
        empresa_repo: EmpresaRepository,
        cliente_repo: ClienteRepository,
        punto_venta_repo: PuntoVentaRepository,
        fonts_dir: PathBuf,
    ) -> Self {
        Self {
            comprobante_repo,
            empresa_repo,
            cliente_repo,
            punto_venta_repo,
            fonts_dir,
        }
    }

    /// Empresa dona do comprovante (para checar o escopo antes de gerar).
    pub async fn empresa_del_comprobante(&self, id: i64) -> Result<i64, AppError> {
        self.comprobante_repo
            .find_by_id(id)
            .await
            .map(|r| r.comprobante.empresa_id)
            .ok_or_else(|| AppError::NotFound("Comprobante no encontrado".to_string()))
    }

    pub async fn generar(&self, id: i64) -> Result<PdfGenerado, AppError> {
        // 1. Busca os dados
        let registro = self
            .comprobante_repo
            .find_by_id(id)
            .await
            .ok_or_else(|| AppError::NotFound("Comprobante no encontrado".to_string()))?;
        let comp = &registro.comprobante;

        let empresa = self
            .empresa_repo
            .find_by_id(comp.empresa_id)
            .await
            .ok_or_else(|| AppError::not_found("Empresa"))?;
        let cliente = self
            .cliente_repo
            .find_by_id(comp.cliente_id)
            .await
            .ok_or_else(|| AppError::not_found("Cliente"))?;
        let punto_venta = self
            .punto_venta_repo
            .find_by_id(comp.punto_venta_id)
            .await
            .map(|p| p.numero)
            .ok_or_else(|| AppError::not_found("Punto de venta"))?;

        let url_qr = DatosQr::new(comp, &empresa, &cliente, punto_venta).url()?;

        // 2. Renderiza (sem awaits daqui em diante)
        let contenido = self
            .renderizar(comp, &registro.items, &empresa, &cliente, punto_venta, &url_qr)
            .map_err(|e| {
                tracing::error!("Falha ao gerar PDF do comprovante {}: {}", id, e);
                e
            })?;

        tracing::info!("PDF gerado para o comprovante {}", id);
        Ok(PdfGenerado {
            contenido,
            filename: nombre_archivo(comp.tipo_comprobante, punto_venta, comp.numero),
        })
    }

    fn renderizar(
        &self,
        comp: &Comprobante,
        items: &[ItemComprobante],
        empresa: &Empresa,
        cliente: &Cliente,
        punto_venta: i32,
        url_qr: &str,
    ) -> Result<Vec<u8>, AppError> {
        let pdf_err = |e: genpdf::error::Error| AppError::Pdf(e.to_string());

        // Carrega a fonte da pasta configurada
        let font_family = genpdf::fonts::from_files(&self.fonts_dir, "Roboto", None).map_err(|_| {
            AppError::Pdf(format!("Fuente no encontrada en {}", self.fonts_dir.display()))
        })?;

        let tipo = TipoComprobante::desde_codigo(comp.tipo_comprobante);
        let titulo = tipo.map(|t| t.nombre_clase().to_uppercase()).unwrap_or_else(|| "COMPROBANTE".into());
        let letra = tipo.map(|t| t.letra.as_str()).unwrap_or("");
        let numero_completo = numero_completo(punto_venta, comp.numero);

        let mut doc = genpdf::Document::new(font_family);
        doc.set_title(format!("{} {} {}", titulo, letra, numero_completo));
        let mut decorator = genpdf::SimplePageDecorator::new();
        decorator.set_margins(10);
        doc.set_page_decorator(decorator);

        // --- EMISOR ---
        doc.push(
            elements::Paragraph::new(empresa.razon_social.clone())
                .styled(style::Style::new().bold().with_font_size(18)),
        );
        doc.push(
            elements::Paragraph::new(format!(
                "{} - {}, {}",
                empresa.domicilio, empresa.localidad, empresa.provincia
            ))
            .styled(style::Style::new().with_font_size(9)),
        );
        doc.push(
            elements::Paragraph::new(format!(
                "CUIT: {}  |  {}  |  Inicio de actividades: {}",
                formatear_cuit(&empresa.cuit),
                condicion_empresa(empresa.condicion_iva),
                formatear_fecha(empresa.inicio_actividades)
            ))
            .styled(style::Style::new().with_font_size(9)),
        );

        doc.push(elements::Break::new(1.5));

        doc.push(
            elements::Paragraph::new(format!("{} {}  Nº {}", titulo, letra, numero_completo))
                .styled(style::Style::new().bold().with_font_size(14)),
        );
        doc.push(elements::Paragraph::new(format!(
            "Fecha de emisión: {}",
            formatear_fecha(comp.fecha_emision)
        )));

        // --- RECEPTOR ---
        doc.push(elements::Break::new(1));
        doc.push(elements::Paragraph::new(format!("Cliente: {}", cliente.razon_social)));
        doc.push(elements::Paragraph::new(format!(
            "{}: {}  |  {}",
            cliente.tipo_documento.as_str(),
            cliente.numero_documento,
            condicion_cliente(cliente.condicion_iva)
        )));
        if let Some(domicilio) = &cliente.domicilio {
            doc.push(elements::Paragraph::new(format!("Domicilio: {}", domicilio)));
        }

        doc.push(elements::Break::new(2));

        // --- ITENS ---
        let mut table = elements::TableLayout::new(vec![4, 1, 2, 1, 1, 2]);
        table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

        let style_bold = style::Style::new().bold();
        table
            .row()
            .element(elements::Paragraph::new("Descripción").styled(style_bold))
            .element(elements::Paragraph::new("Cant.").styled(style_bold))
            .element(elements::Paragraph::new("P. Unitario").styled(style_bold))
            .element(elements::Paragraph::new("Bonif. %").styled(style_bold))
            .element(elements::Paragraph::new("IVA %").styled(style_bold))
            .element(elements::Paragraph::new("Subtotal").styled(style_bold))
            .push()
            .map_err(pdf_err)?;

        for item in items {
            let subtotal = item.subtotal.unwrap_or_else(|| item.importe_neto());
            table
                .row()
                .element(elements::Paragraph::new(item.descripcion.clone()))
                .element(elements::Paragraph::new(format!("{:.2}", item.cantidad)))
                .element(elements::Paragraph::new(formatear_moneda(item.precio_unitario)))
                .element(elements::Paragraph::new(format!("{:.2}", item.descuento_porcentaje)))
                .element(elements::Paragraph::new(format!("{}", item.iva_porcentaje.normalize())))
                .element(elements::Paragraph::new(formatear_moneda(subtotal)))
                .push()
                .map_err(pdf_err)?;
        }

        doc.push(table);
        doc.push(elements::Break::new(2));

        // --- TOTAIS ---
        let mut totales = vec![format!("Subtotal: {}", formatear_moneda(comp.subtotal))];
        for (alicuota, iva) in [("21%", comp.iva_21), ("10,5%", comp.iva_10_5), ("27%", comp.iva_27)] {
            if iva > Decimal::ZERO {
                totales.push(format!("IVA {}: {}", alicuota, formatear_moneda(iva)));
            }
        }
        for linea in totales {
            let mut p = elements::Paragraph::new(linea);
            p.set_alignment(genpdf::Alignment::Right);
            doc.push(p);
        }

        let mut total_paragraph = elements::Paragraph::new(format!("TOTAL: {}", formatear_moneda(comp.total)));
        total_paragraph.set_alignment(genpdf::Alignment::Right);
        doc.push(total_paragraph.styled(style::Style::new().bold().with_font_size(12)));

        doc.push(elements::Break::new(2));

        // --- CAE E QR ---
        if let Some(cae) = &comp.cae {
            doc.push(elements::Paragraph::new(format!("CAE: {}", cae)).styled(style_bold));
            if let Some(venc) = comp.cae_vencimiento {
                doc.push(elements::Paragraph::new(format!(
                    "Vencimiento CAE: {}",
                    formatear_fecha(venc)
                )));
            }
            doc.push(elements::Break::new(1));

            let code = QrCode::new(url_qr.as_bytes()).map_err(|e| AppError::Pdf(e.to_string()))?;
            let image_buffer = code.render::<Luma<u8>>().build();
            let dynamic_image = image::DynamicImage::ImageLuma8(image_buffer);
            let pdf_image = elements::Image::from_dynamic_image(dynamic_image)
                .map_err(pdf_err)?
                .with_scale(Scale::new(0.5, 0.5));
            doc.push(pdf_image);
        }

        if let Some(obs) = &comp.observaciones {
            doc.push(elements::Break::new(1));
            doc.push(elements::Paragraph::new(obs.clone()).styled(style::Style::new().italic().with_font_size(8)));
        }

        let mut buffer = Vec::new();
        doc.render(&mut buffer).map_err(pdf_err)?;
        Ok(buffer)
    }
}

fn condicion_empresa(c: CondicionIvaEmpresa) -> &'static str {
    match c {
        CondicionIvaEmpresa::ResponsableInscripto => "IVA Responsable Inscripto",
        CondicionIvaEmpresa::Monotributo => "Responsable Monotributo",
        CondicionIvaEmpresa::Exento => "IVA Exento",
    }
}

fn condicion_cliente(c: CondicionIva) -> &'static str {
    match c {
        CondicionIva::ResponsableInscripto => "IVA Responsable Inscripto",
        CondicionIva::Monotributo => "Responsable Monotributo",
        CondicionIva::ConsumidorFinal => "Consumidor Final",
        CondicionIva::Exento => "IVA Exento",
    }
}
