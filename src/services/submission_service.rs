// ============================================================================
// SUBMISSION SERVICE - Registro de visitas a puntos de control
// ============================================================================
// Un intento por lectura. Sin reintentos ni cola offline.
// ============================================================================

use chrono::Utc;
use thiserror::Error;
use crate::models::{CheckpointVisit, SiteId, SubmitFormRequest, SubmitFormResponse};
use crate::services::api_client::{ProxyTransport, TransportError};

/// Fallo al registrar una visita. El Display es el texto del modal de error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("Error de conexión")]
    Network(#[source] TransportError),
    #[error("Error: {0}")]
    Rejected(String),
    #[error("Error de conexión")]
    RejectedWithoutMessage,
}

/// Cliente de envío de rondines
#[derive(Clone)]
pub struct SubmissionClient<T> {
    transport: T,
}

impl<T: ProxyTransport> SubmissionClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Construir la visita con la hora actual y enviarla una sola vez
    pub async fn submit(&self, tag_id: &str, guard_name: &str, site_id: &SiteId) -> Result<(), SubmitError> {
        let visit = CheckpointVisit::new(tag_id, guard_name, site_id, Utc::now());
        self.send(visit).await
    }

    pub async fn send(&self, visit: CheckpointVisit) -> Result<(), SubmitError> {
        log::info!("📍 [SUBMIT] Registrando tag {} ({} @ {})", visit.tag_id, visit.guard_name, visit.site_id);

        let reply = self
            .transport
            .post(&SubmitFormRequest::rondin(visit))
            .await
            .map_err(|e| {
                log::error!("❌ [SUBMIT] Error de transporte: {}", e);
                SubmitError::Network(e)
            })?;

        // Decide el cuerpo JSON, no el status HTTP
        let response = reply.json::<SubmitFormResponse>().map_err(|e| {
            log::error!("❌ [SUBMIT] Respuesta ilegible (HTTP {}): {}", reply.status, e);
            SubmitError::Network(e)
        })?;

        if response.success {
            log::info!("✅ [SUBMIT] Posición registrada");
            return Ok(());
        }

        match response.message.filter(|m| !m.trim().is_empty()) {
            Some(message) => {
                log::warn!("⚠️ [SUBMIT] Rechazado por el backend: {}", message);
                Err(SubmitError::Rejected(message))
            }
            None => {
                log::warn!("⚠️ [SUBMIT] Rechazado por el backend sin mensaje");
                Err(SubmitError::RejectedWithoutMessage)
            }
        }
    }
}
