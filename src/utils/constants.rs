/// URL por defecto del proxy de Azure (único endpoint del backend).
/// AppConfig la reemplaza con API_PROXY_URL en tiempo de compilación.
pub const API_PROXY_URL: &str = "https://proxyguard.azurewebsites.net/api/ravens-proxy";

/// Clave por defecto de localStorage donde vive la sesión del guardia
pub const SESSION_STORAGE_KEY: &str = "ravensGuardUser";

/// Formulario del backend donde se registran las marcas de rondín
pub const FORM_RONDINES: &str = "RONDINES";

/// Tipo de marca enviado en cada visita
pub const VISIT_TYPE: &str = "Rondín";

/// Estatus inicial de cada visita registrada
pub const VISIT_STATUS: &str = "Registrado";

/// IDs del shell HTML (index.html)
pub const VIEWPORT_ID: &str = "viewport";
pub const STATUS_MODAL_ID: &str = "status-modal";
