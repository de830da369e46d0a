// src/db.rs
// Armazenamento em memória: uma tabela por recurso atrás de um único RwLock.

pub mod database;
pub use database::Database;
pub mod usuario_repo;
pub use usuario_repo::UsuarioRepository;
pub mod empresa_repo;
pub use empresa_repo::EmpresaRepository;
pub mod cliente_repo;
pub use cliente_repo::ClienteRepository;
pub mod punto_venta_repo;
pub use punto_venta_repo::PuntoVentaRepository;
pub mod certificado_repo;
pub use certificado_repo::CertificadoRepository;
pub mod comprobante_repo;
pub use comprobante_repo::ComprobanteRepository;
