pub mod arca_service;
pub mod auth;
pub mod certificados_service;
pub mod facturacion_service;
pub mod pdf_service;
pub mod reportes_service;
