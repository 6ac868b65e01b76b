// ============================================================================
// API CLIENT - SOLO COMUNICACIÓN HTTP (Stateless)
// ============================================================================
// Un único endpoint (proxy de Azure), JSON sobre POST.
// NO interpreta respuestas: eso lo hacen auth_service y submission_service.
// ============================================================================

use gloo_net::http::Request;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use crate::config::CONFIG;

/// Fallos de transporte (antes de que exista una respuesta de aplicación)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Respuesta cruda del proxy: status HTTP + cuerpo JSON
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyReply {
    pub status: u16,
    pub body: serde_json::Value,
}

impl ProxyReply {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, TransportError> {
        serde_json::from_value(self.body.clone())
            .map_err(|e| TransportError::Parse(e.to_string()))
    }
}

/// Punto de inyección del transporte: el navegador usa gloo-net, los tests un fake
#[allow(async_fn_in_trait)]
pub trait ProxyTransport {
    async fn post<B: Serialize>(&self, body: &B) -> Result<ProxyReply, TransportError>;
}

/// Cliente API - SOLO comunicación HTTP (stateless)
#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new() -> Self {
        Self::with_url(CONFIG.api_proxy_url())
    }

    pub fn with_url(url: &str) -> Self {
        Self {
            base_url: url.to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ProxyTransport for ApiClient {
    async fn post<B: Serialize>(&self, body: &B) -> Result<ProxyReply, TransportError> {
        let response = Request::post(&self.base_url)
            .json(body)
            .map_err(|e| TransportError::Serialization(e.to_string()))?
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        log::debug!("📡 [API] POST {} -> HTTP {}", self.base_url, status);

        // El proxy responde JSON también en errores de aplicación
        let body = response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| TransportError::Parse(e.to_string()))?;

        Ok(ProxyReply { status, body })
    }
}
