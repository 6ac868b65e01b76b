// ============================================================================
// WEB NFC FFI - Bindings de NDEFReader (Chrome Android, solo HTTPS)
// ============================================================================
// Wrappers sin estado ni lógica: el manejo de sesiones vive en nfc_service
// ============================================================================

use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = NDEFReader)]
    pub type NdefReader;

    #[wasm_bindgen(constructor, catch, js_class = "NDEFReader")]
    pub fn new() -> Result<NdefReader, JsValue>;

    /// `scan({ signal })` - resuelve cuando la antena queda escuchando
    #[wasm_bindgen(method, catch, js_class = "NDEFReader")]
    pub fn scan(this: &NdefReader, options: &JsValue) -> Result<js_sys::Promise, JsValue>;

    #[wasm_bindgen(method, setter, js_class = "NDEFReader")]
    pub fn set_onreading(this: &NdefReader, handler: Option<&js_sys::Function>);

    #[wasm_bindgen(method, setter, js_class = "NDEFReader")]
    pub fn set_onreadingerror(this: &NdefReader, handler: Option<&js_sys::Function>);

    #[wasm_bindgen(js_name = NDEFReadingEvent)]
    pub type NdefReadingEvent;

    #[wasm_bindgen(method, getter = serialNumber, js_class = "NDEFReadingEvent")]
    pub fn serial_number(this: &NdefReadingEvent) -> Option<String>;
}

/// `'NDEFReader' in window`
pub fn is_web_nfc_available() -> bool {
    match web_sys::window() {
        Some(window) => js_sys::Reflect::has(&window, &JsValue::from_str("NDEFReader")).unwrap_or(false),
        None => false,
    }
}
