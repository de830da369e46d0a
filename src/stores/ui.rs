// src/stores/ui.rs

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DURACION_POR_DEFECTO_MS: i64 = 5000;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TipoNotificacion {
    Success,
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notificacion {
    pub id: Uuid,
    pub tipo: TipoNotificacion,
    pub titulo: String,
    pub mensaje: Option<String>,
    /// Milissegundos; `None` mantém a notificação até `hide`.
    pub duracion_ms: Option<i64>,
    pub creada: DateTime<Utc>,
}

pub struct UiStore {
    pub notificaciones: Vec<Notificacion>,
    pub sidebar_open: bool,
    pub loading: bool,
}

impl Default for UiStore {
    fn default() -> Self {
        Self {
            notificaciones: Vec::new(),
            sidebar_open: true,
            loading: false,
        }
    }
}

impl UiStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(
        &mut self,
        tipo: TipoNotificacion,
        titulo: impl Into<String>,
        mensaje: Option<String>,
        now: DateTime<Utc>,
    ) -> Uuid {
        self.show_con_duracion(tipo, titulo, mensaje, Some(DURACION_POR_DEFECTO_MS), now)
    }

    pub fn show_con_duracion(
        &mut self,
        tipo: TipoNotificacion,
        titulo: impl Into<String>,
        mensaje: Option<String>,
        duracion_ms: Option<i64>,
        now: DateTime<Utc>,
    ) -> Uuid {
        let id = Uuid::new_v4();
        self.notificaciones.push(Notificacion {
            id,
            tipo,
            titulo: titulo.into(),
            mensaje,
            duracion_ms,
            creada: now,
        });
        id
    }

    pub fn hide(&mut self, id: Uuid) {
        self.notificaciones.retain(|n| n.id != id);
    }

    /// Remove as notificações cujo prazo já passou em `now`.
    pub fn expire(&mut self, now: DateTime<Utc>) {
        self.notificaciones.retain(|n| match n.duracion_ms {
            Some(ms) => n.creada + Duration::milliseconds(ms) > now,
            None => true,
        });
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }

    pub fn set_loading(&mut self, value: bool) {
        self.loading = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notificacoes_expiram_pelo_prazo() {
        let t0 = Utc::now();
        let mut ui = UiStore::new();
        let curta = ui.show(TipoNotificacion::Success, "Cliente creado", None, t0);
        let fixa = ui.show_con_duracion(TipoNotificacion::Error, "Error", Some("x".into()), None, t0);

        ui.expire(t0 + Duration::milliseconds(4999));
        assert_eq!(ui.notificaciones.len(), 2);

        ui.expire(t0 + Duration::milliseconds(5000));
        assert_eq!(ui.notificaciones.len(), 1);
        assert_eq!(ui.notificaciones[0].id, fixa);

        ui.hide(fixa);
        ui.hide(curta);
        assert!(ui.notificaciones.is_empty());
    }

    #[test]
    fn sidebar_alterna() {
        let mut ui = UiStore::new();
        assert!(ui.sidebar_open);
        ui.toggle_sidebar();
        assert!(!ui.sidebar_open);
    }
}
