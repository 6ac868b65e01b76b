use serde::{Deserialize, Serialize};
use crate::utils::constants::{API_PROXY_URL, SESSION_STORAGE_KEY};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_proxy_url: String,
    pub environment: String,
    pub enable_logging: bool,
    pub session_storage_key: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_proxy_url: API_PROXY_URL.to_string(),
            environment: "production".to_string(),
            enable_logging: true,
            session_storage_key: SESSION_STORAGE_KEY.to_string(),
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        Self::from_values(
            option_env!("API_PROXY_URL"),
            option_env!("ENVIRONMENT"),
            option_env!("ENABLE_LOGGING"),
            option_env!("SESSION_STORAGE_KEY"),
        )
    }

    fn from_values(
        api_proxy_url: Option<&str>,
        environment: Option<&str>,
        enable_logging: Option<&str>,
        session_storage_key: Option<&str>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            api_proxy_url: non_empty(api_proxy_url).unwrap_or(defaults.api_proxy_url),
            environment: non_empty(environment).unwrap_or(defaults.environment),
            enable_logging: enable_logging
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.enable_logging),
            session_storage_key: non_empty(session_storage_key).unwrap_or(defaults.session_storage_key),
        }
    }

    pub fn api_proxy_url(&self) -> &str {
        &self.api_proxy_url
    }

    pub fn session_storage_key(&self) -> &str {
        &self.session_storage_key
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Nivel para wasm_logger: Debug con logging habilitado, Warn si no
    pub fn log_level(&self) -> log::Level {
        if self.enable_logging {
            log::Level::Debug
        } else {
            log::Level::Warn
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}
