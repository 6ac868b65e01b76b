use serde::{Deserialize, Serialize};
use crate::models::lenient;
use crate::models::session::SiteId;

/// `{ action: "login", username, password }`
#[derive(Clone, PartialEq, Serialize, Debug)]
pub struct LoginRequest {
    pub action: &'static str,
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            action: "login",
            username: username.to_string(),
            password: password.to_string(),
        }
    }
}

/// Respuesta de login del proxy.
/// El condominio puede venir en `condominioId`, `condominio` o `data.condominio`.
#[derive(Clone, PartialEq, Deserialize, Debug, Default)]
pub struct LoginResponse {
    #[serde(default, deserialize_with = "lenient::truthy")]
    pub success: bool,
    #[serde(rename = "condominioId", default)]
    pub condominio_id: Option<serde_json::Value>,
    #[serde(default)]
    pub condominio: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub data: Option<LoginData>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub message: Option<String>,
}

#[derive(Clone, PartialEq, Deserialize, Debug, Default)]
pub struct LoginData {
    #[serde(default)]
    pub condominio: Option<serde_json::Value>,
}

impl LoginResponse {
    /// Primer condominio no vacío, en el orden de prioridad del backend
    pub fn site_id(&self) -> Option<SiteId> {
        let nested = self.data.as_ref().and_then(|d| d.condominio.as_ref());
        [self.condominio_id.as_ref(), self.condominio.as_ref(), nested]
            .into_iter()
            .flatten()
            .find_map(SiteId::from_json)
    }
}
