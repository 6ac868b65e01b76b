// ============================================================================
// SESSION STORE - Sesión del guardia en almacenamiento durable
// ============================================================================
// Un único registro JSON bajo SESSION_STORAGE_KEY (localStorage).
// ============================================================================

use gloo_storage::errors::StorageError as GlooStorageError;
use gloo_storage::{LocalStorage, Storage};
use thiserror::Error;
use crate::config::CONFIG;
use crate::models::{Session, StoredSession};
use crate::services::api_client::ProxyTransport;
use crate::services::auth_service::{perform_login, AuthError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("No se pudo acceder a localStorage: {0}")]
    Unavailable(String),
    #[error("Registro de sesión ilegible: {0}")]
    Corrupt(String),
}

/// Dónde vive el registro de sesión
pub trait SessionBackend {
    fn load(&self) -> Result<Option<StoredSession>, StorageError>;
    fn save(&self, record: &StoredSession) -> Result<(), StorageError>;
    fn clear(&self) -> Result<(), StorageError>;
}

/// Backend del navegador (gloo-storage sobre localStorage)
#[derive(Clone, Debug)]
pub struct LocalStorageBackend {
    key: String,
}

impl LocalStorageBackend {
    pub fn new() -> Self {
        Self::with_key(CONFIG.session_storage_key())
    }

    pub fn with_key(key: &str) -> Self {
        Self { key: key.to_string() }
    }
}

impl Default for LocalStorageBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionBackend for LocalStorageBackend {
    fn load(&self) -> Result<Option<StoredSession>, StorageError> {
        match LocalStorage::get::<StoredSession>(&self.key) {
            Ok(record) => Ok(Some(record)),
            Err(GlooStorageError::KeyNotFound(_)) => Ok(None),
            Err(GlooStorageError::SerdeError(e)) => Err(StorageError::Corrupt(e.to_string())),
            Err(e) => Err(StorageError::Unavailable(e.to_string())),
        }
    }

    fn save(&self, record: &StoredSession) -> Result<(), StorageError> {
        LocalStorage::set(&self.key, record).map_err(|e| match e {
            GlooStorageError::SerdeError(e) => StorageError::Corrupt(e.to_string()),
            other => StorageError::Unavailable(other.to_string()),
        })
    }

    fn clear(&self) -> Result<(), StorageError> {
        LocalStorage::delete(&self.key);
        Ok(())
    }
}

/// Session Store: login / restore / logout
#[derive(Clone)]
pub struct SessionStore<B> {
    backend: B,
}

impl<B: SessionBackend> SessionStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Login remoto y persistencia de la sesión resultante.
    /// Si no se puede persistir, se registra y el login sigue siendo válido.
    pub async fn login<T: ProxyTransport>(
        &self,
        transport: &T,
        username: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        let session = perform_login(transport, username, password).await?;
        match self.save(&session) {
            Ok(()) => log::info!("💾 [SESSION] Sesión guardada en storage"),
            Err(e) => log::error!("❌ [SESSION] Error guardando sesión: {}", e),
        }
        Ok(session)
    }

    pub fn save(&self, session: &Session) -> Result<(), StorageError> {
        self.backend.save(&session.to_stored())
    }

    /// Sesión guardada, solo si está logueada y tiene condominio
    pub fn restore(&self) -> Option<Session> {
        match self.backend.load() {
            Ok(Some(record)) => {
                let session = record.into_session();
                if session.is_none() {
                    log::info!("📋 [SESSION] Registro guardado sin condominio, se requiere login");
                }
                session
            }
            Ok(None) => None,
            Err(e) => {
                log::warn!("⚠️ [SESSION] No se pudo restaurar la sesión: {}", e);
                None
            }
        }
    }

    pub fn logout(&self) {
        log::info!("👋 [SESSION] Logout - limpiando sesión");
        if let Err(e) = self.backend.clear() {
            log::warn!("⚠️ [SESSION] Error limpiando sesión: {}", e);
        }
    }
}
