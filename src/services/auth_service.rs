use thiserror::Error;
use crate::models::{LoginRequest, LoginResponse, Session};
use crate::services::api_client::{ProxyTransport, TransportError};

const DEFAULT_REJECTION: &str = "Credenciales incorrectas.";

/// Errores de login. El Display es el texto que se muestra bajo el formulario.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("{0}")]
    Rejected(String),
    #[error("El usuario no tiene un condominio asignado.")]
    MissingSite,
    #[error("Error de conexión")]
    Network(#[source] TransportError),
}

/// Login contra el proxy. Solo devuelve sesión si el backend acepta Y entrega condominio.
pub async fn perform_login<T: ProxyTransport>(
    transport: &T,
    username: &str,
    password: &str,
) -> Result<Session, AuthError> {
    log::info!("🔐 [AUTH] Login para usuario: {}", username);

    let reply = transport
        .post(&LoginRequest::new(username, password))
        .await
        .map_err(|e| {
            log::error!("❌ [AUTH] Error de transporte: {}", e);
            AuthError::Network(e)
        })?;

    let response = reply.json::<LoginResponse>().unwrap_or_else(|e| {
        log::warn!("⚠️ [AUTH] Respuesta de login no reconocida: {}", e);
        LoginResponse::default()
    });

    if !(reply.ok() && response.success) {
        let message = response
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_REJECTION.to_string());
        log::warn!("⚠️ [AUTH] Login rechazado (HTTP {}): {}", reply.status, message);
        return Err(AuthError::Rejected(message));
    }

    let site_id = response.site_id().ok_or_else(|| {
        log::error!("❌ [AUTH] Login aceptado sin condominio para {}", username);
        AuthError::MissingSite
    })?;

    log::info!("✅ [AUTH] Login exitoso: {} @ condominio {}", username, site_id);
    Ok(Session::new(username, site_id))
}
