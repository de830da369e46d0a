// src/navigation.rs
// Tabela de rotas da aplicação e o guarda de autenticação.

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acceso {
    /// Apenas sem sessão (login, setup).
    Invitado,
    RequiereAuth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ruta {
    pub nombre: &'static str,
    pub patron: &'static str,
    pub acceso: Acceso,
}

const fn protegida(nombre: &'static str, patron: &'static str) -> Ruta {
    Ruta { nombre, patron, acceso: Acceso::RequiereAuth }
}

// Rotas estáticas antes das dinâmicas do mesmo prefixo.
pub const RUTAS: &[Ruta] = &[
    Ruta { nombre: "login", patron: "/login", acceso: Acceso::Invitado },
    Ruta { nombre: "setup", patron: "/setup", acceso: Acceso::Invitado },
    protegida("dashboard", "/"),
    protegida("clientes", "/clientes"),
    protegida("cliente-nuevo", "/clientes/nuevo"),
    protegida("cliente-detalle", "/clientes/:id"),
    protegida("cliente-editar", "/clientes/:id/editar"),
    protegida("empresa", "/empresa"),
    protegida("comprobantes", "/comprobantes"),
    protegida("comprobante-nuevo", "/comprobantes/nuevo"),
    protegida("comprobante-detalle", "/comprobantes/:id"),
    protegida("certificados", "/certificados"),
    protegida("certificado-wizard", "/certificados/nuevo"),
    protegida("certificado-renovar", "/certificados/:id/renovar"),
    protegida("certificado-exito", "/certificados/:id/exito"),
    protegida("reportes", "/reportes"),
    protegida("reporte-ventas", "/reportes/ventas"),
    protegida("reporte-iva", "/reportes/iva"),
    protegida("reporte-clientes", "/reportes/clientes"),
];

pub const RUTA_LOGIN: &str = "/login";
pub const RUTA_DASHBOARD: &str = "/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RutaResuelta {
    pub ruta: Ruta,
    pub params: HashMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Continuar(RutaResuelta),
    Redirigir(String),
    NoEncontrada,
}

fn segmentos(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

fn coincide(patron: &str, path: &str) -> Option<HashMap<String, String>> {
    let esperado = segmentos(patron);
    let recibido = segmentos(path);
    if esperado.len() != recibido.len() {
        return None;
    }

    let mut params = HashMap::new();
    for (p, s) in esperado.iter().zip(&recibido) {
        match p.strip_prefix(':') {
            Some(nombre) => {
                params.insert(nombre.to_string(), s.to_string());
            }
            None if p == s => {}
            None => return None,
        }
    }
    Some(params)
}

/// Casa o caminho (query string e fragmento ignorados) com a tabela.
pub fn resolve(path: &str) -> Option<RutaResuelta> {
    let limpio = path.split(['?', '#']).next().unwrap_or(path);
    RUTAS.iter().find_map(|ruta| {
        coincide(ruta.patron, limpio).map(|params| RutaResuelta { ruta: *ruta, params })
    })
}

pub fn guard(path: &str, is_authenticated: bool) -> Decision {
    let Some(resuelta) = resolve(path) else {
        return Decision::NoEncontrada;
    };

    match resuelta.ruta.acceso {
        Acceso::RequiereAuth if !is_authenticated => Decision::Redirigir(format!(
            "{}?redirect={}",
            RUTA_LOGIN,
            urlencoding::encode(path)
        )),
        Acceso::Invitado if is_authenticated => Decision::Redirigir(RUTA_DASHBOARD.to_string()),
        _ => Decision::Continuar(resuelta),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_extrai_parametros() {
        let r = resolve("/clientes/15/editar").unwrap();
        assert_eq!(r.ruta.nombre, "cliente-editar");
        assert_eq!(r.params.get("id").map(String::as_str), Some("15"));

        assert_eq!(resolve("/clientes/nuevo").unwrap().ruta.nombre, "cliente-nuevo");
        assert_eq!(resolve("/").unwrap().ruta.nombre, "dashboard");
        assert_eq!(resolve("/reportes/iva?mes=3").unwrap().ruta.nombre, "reporte-iva");
        assert!(resolve("/inexistente").is_none());
    }

    #[test]
    fn rota_protegida_sem_sessao_vai_para_login() {
        assert_eq!(
            guard("/comprobantes/7", false),
            Decision::Redirigir("/login?redirect=%2Fcomprobantes%2F7".to_string())
        );
    }

    #[test]
    fn login_com_sessao_vai_para_dashboard() {
        assert_eq!(guard("/login", true), Decision::Redirigir("/".to_string()));
        assert!(matches!(guard("/setup", false), Decision::Continuar(_)));
    }

    #[test]
    fn rota_desconhecida() {
        assert_eq!(guard("/nada/aqui", true), Decision::NoEncontrada);
    }
}
