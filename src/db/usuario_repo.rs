// src/db/usuario_repo.rs

use chrono::{DateTime, Utc};

use crate::{
    db::database::{Database, Tabla, Tablas, UsuarioRegistro},
    models::auth::Usuario,
};

#[derive(Clone)]
pub struct UsuarioRepository {
    db: Database,
}

pub struct NuevoUsuario<'a> {
    pub email: &'a str,
    pub hashed_password: &'a str,
    pub nombre: &'a str,
    pub empresa_id: Option<i64>,
    pub es_admin: bool,
}

impl UsuarioRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn count(&self) -> usize {
        self.db.leer().await.usuarios.len()
    }

    /// Busca por email sem diferenciar maiúsculas.
    pub async fn find_by_email(&self, email: &str) -> Option<UsuarioRegistro> {
        self.db
            .leer()
            .await
            .usuarios
            .iter()
            .find(|u| u.usuario.email.eq_ignore_ascii_case(email))
            .cloned()
    }

    pub async fn find_by_id(&self, id: i64) -> Option<Usuario> {
        self.db
            .leer()
            .await
            .usuarios
            .iter()
            .find(|u| u.usuario.id == id)
            .map(|u| u.usuario.clone())
    }

    pub async fn create(&self, nuevo: NuevoUsuario<'_>, ahora: DateTime<Utc>) -> Usuario {
        let mut tablas = self.db.escribir().await;
        Self::insertar(&mut tablas, nuevo, ahora)
    }

    /// Cria o usuário só se a tabela estiver vazia (checagem e inserção sob o mesmo lock).
    pub async fn create_si_vacio(&self, nuevo: NuevoUsuario<'_>, ahora: DateTime<Utc>) -> Option<Usuario> {
        let mut tablas = self.db.escribir().await;
        if !tablas.usuarios.is_empty() {
            return None;
        }
        Some(Self::insertar(&mut tablas, nuevo, ahora))
    }

    fn insertar(tablas: &mut Tablas, nuevo: NuevoUsuario<'_>, ahora: DateTime<Utc>) -> Usuario {
        let usuario = Usuario {
            id: tablas.siguiente_id(Tabla::Usuarios),
            email: nuevo.email.to_lowercase(),
            nombre: nuevo.nombre.to_string(),
            empresa_id: nuevo.empresa_id,
            activo: true,
            es_admin: nuevo.es_admin,
            created_at: ahora,
            ultimo_login: None,
        };
        tablas.usuarios.push(UsuarioRegistro {
            usuario: usuario.clone(),
            hashed_password: nuevo.hashed_password.to_string(),
        });
        usuario
    }

    pub async fn registrar_login(&self, id: i64, ahora: DateTime<Utc>) -> Option<Usuario> {
        let mut tablas = self.db.escribir().await;
        let registro = tablas.usuarios.iter_mut().find(|u| u.usuario.id == id)?;
        registro.usuario.ultimo_login = Some(ahora);
        Some(registro.usuario.clone())
    }

    pub async fn set_activo(&self, id: i64, activo: bool) -> bool {
        let mut tablas = self.db.escribir().await;
        match tablas.usuarios.iter_mut().find(|u| u.usuario.id == id) {
            Some(registro) => {
                registro.usuario.activo = activo;
                true
            }
            None => false,
        }
    }
}
