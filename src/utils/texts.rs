// ============================================================================
// TEXTOS DE LA UI - Copys visibles para el guardia (solo español)
// ============================================================================

// Login
pub const APP_TITLE: &str = "RAVENS GUARD";
pub const APP_SUBTITLE: &str = "Control de Rondines NFC";
pub const LABEL_USER: &str = "Usuario";
pub const LABEL_PASSWORD: &str = "Contraseña";
pub const PLACEHOLDER_USER: &str = "Guardia";
pub const PLACEHOLDER_PASSWORD: &str = "••••••";
pub const BTN_LOGIN: &str = "INGRESAR";
pub const BTN_LOGIN_BUSY: &str = "Verificando...";

// Pantalla principal
pub const HEADER_TITLE: &str = "RONDINES";
pub const STATUS_READY: &str = "Listo para escanear";
pub const STATUS_LISTENING: &str = "Acerca el TAG ahora...";
pub const BTN_SCAN: &str = "ESCANEAR";
pub const BTN_SCANNING: &str = "LEYENDO...";
pub const SCAN_HINT: &str = "Acerca el dispositivo al punto de control NFC.\n\nAsegúrate de tener el NFC activado.";

// Modal
pub const MODAL_REGISTERING: &str = "Registrando posición...";
pub const MODAL_REGISTERED: &str = "Posición registrada";
pub const BTN_OK: &str = "OK";
pub const BTN_CLOSE: &str = "Cerrar";
