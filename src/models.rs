// src/models.rs
// DTOs compartilhados entre o cliente HTTP e o servidor stub.

pub mod api;
pub mod arca;
pub mod auth;
pub mod certificado;
pub mod cliente;
pub mod comprobante;
pub mod empresa;
pub mod punto_venta;
pub mod reporte;
