use serde::{Deserialize, Serialize};
use std::fmt;

/// Identificador del condominio tal como lo entrega el backend.
/// Es opaco: se conserva el tipo JSON recibido (texto o número) y se reenvía igual.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SiteId {
    Text(String),
    Number(serde_json::Number),
}

impl SiteId {
    /// Interpretar un valor JSON como condominio.
    /// Vacío, cero, null, booleanos u objetos no cuentan como condominio.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        let site = match value {
            serde_json::Value::String(s) => SiteId::Text(s.clone()),
            serde_json::Value::Number(n) => SiteId::Number(n.clone()),
            _ => return None,
        };
        (!site.is_blank()).then_some(site)
    }

    pub fn is_blank(&self) -> bool {
        match self {
            SiteId::Text(s) => s.trim().is_empty(),
            SiteId::Number(n) => n.as_f64() == Some(0.0),
        }
    }
}

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteId::Text(s) => write!(f, "{}", s),
            SiteId::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for SiteId {
    fn from(value: &str) -> Self {
        SiteId::Text(value.to_string())
    }
}

/// Sesión de un guardia autenticado. Solo existe con condominio asignado.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub guard_name: String,
    pub site_id: SiteId,
}

impl Session {
    pub fn new(guard_name: impl Into<String>, site_id: SiteId) -> Self {
        Self {
            guard_name: guard_name.into(),
            site_id,
        }
    }

    pub fn to_stored(&self) -> StoredSession {
        StoredSession {
            is_logged_in: true,
            site_id: Some(self.site_id.clone()),
            guard_name: Some(self.guard_name.clone()),
        }
    }
}

/// Registro persistido en localStorage (`ravensGuardUser`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSession {
    #[serde(rename = "isLoggedIn", default)]
    pub is_logged_in: bool,
    #[serde(rename = "condominioId", default)]
    pub site_id: Option<SiteId>,
    #[serde(rename = "usuario", default)]
    pub guard_name: Option<String>,
}

impl StoredSession {
    /// Convertir el registro en sesión válida (logged in + condominio)
    pub fn into_session(self) -> Option<Session> {
        if !self.is_logged_in {
            return None;
        }
        let site_id = self.site_id.filter(|site| !site.is_blank())?;
        Some(Session {
            guard_name: self.guard_name.unwrap_or_default(),
            site_id,
        })
    }
}
