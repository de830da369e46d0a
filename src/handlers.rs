// src/handlers.rs

pub mod arca;
pub mod auth;
pub mod certificados;
pub mod clientes;
pub mod comprobantes;
pub mod empresas;
pub mod health;
pub mod pdf;
pub mod puntos_venta;
pub mod reportes;
