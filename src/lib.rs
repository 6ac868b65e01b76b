// ============================================================================
// RAVENS GUARD NFC - PWA DE RONDINES (RUST PURO + WASM)
// ============================================================================
// Arquitectura MVVM:
// - Views: Funciones que renderizan DOM (sin lógica)
// - ViewModels: Estado + Lógica UI (login, sesión de escaneo, modal)
// - Services: Proxy HTTP, localStorage, Web NFC
// - State: Estado compartido con Rc<RefCell>
// - Models: Estructuras compartidas con el proxy
// ============================================================================

pub mod config;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;
pub mod viewmodels;
mod dom;
mod views;
mod app;

#[cfg(test)]
mod test_support;

use std::cell::RefCell;
use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use wasm_logger::Config;
use crate::app::App;
use crate::config::CONFIG;
use crate::state::Screen;

// Instancia global de App (un solo hilo en WASM)
thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    // Inicializar panic hook para mejor debugging
    console_error_panic_hook::set_once();

    wasm_logger::init(Config::new(CONFIG.log_level()));
    log::info!("🚀 Ravens Guard NFC - Rust Puro + MVVM ({})", CONFIG.environment);

    register_service_worker();

    let mut app = App::new()?;
    app.render()?;

    APP.with(|app_cell| {
        *app_cell.borrow_mut() = Some(app);
    });

    Ok(())
}

/// Cambiar de pantalla ahora mismo
pub fn navigate(screen: Screen) {
    APP.with(|app_cell| match app_cell.try_borrow_mut() {
        Ok(mut app) => {
            if let Some(app) = app.as_mut() {
                if let Err(e) = app.show(screen) {
                    log::error!("❌ [APP] Error navegando a {:?}: {:?}", screen, e);
                }
            } else {
                log::warn!("⚠️ [APP] App no está inicializada");
            }
        }
        Err(_) => log::warn!("⚠️ [APP] Navegación a {:?} durante un render, ignorada", screen),
    });
}

/// Cambiar de pantalla en el siguiente tick (desde handlers de la pantalla actual)
pub fn schedule_navigation(screen: Screen) {
    Timeout::new(0, move || navigate(screen)).forget();
}

/// Registra ./sw.js; sin soporte o con error la app sigue funcionando
fn register_service_worker() {
    let Some(win) = web_sys::window() else {
        return;
    };
    let navigator = win.navigator();
    if !js_sys::Reflect::has(&navigator, &JsValue::from_str("serviceWorker")).unwrap_or(false) {
        log::info!("ℹ️ [SW] Navegador sin service workers");
        return;
    }
    let container = navigator.service_worker();
    let promise = container.register("./sw.js");

    wasm_bindgen_futures::spawn_local(async move {
        match JsFuture::from(promise).await {
            Ok(_) => log::info!("✅ [SW] Service worker registrado"),
            Err(e) => log::warn!("⚠️ [SW] Registro fallido: {:?}", e),
        }
    });
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    fn shell_file(relative: &str) -> String {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join(relative);
        std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("{}: {}", path.display(), e))
    }

    #[test]
    fn manifest_icons_ship_with_the_shell() {
        let manifest: serde_json::Value = serde_json::from_str(&shell_file("static/manifest.json")).unwrap();
        let icons = manifest["icons"].as_array().unwrap();
        assert!(!icons.is_empty());
        for icon in icons {
            let src = icon["src"].as_str().unwrap();
            assert!(Path::new(env!("CARGO_MANIFEST_DIR")).join("static").join(src).is_file(), "{}", src);
        }
        assert!(shell_file("index.html").contains(r#"rel="copy-dir" href="static/icons""#));
    }

    #[test]
    fn service_worker_caches_fetched_assets() {
        let sw = shell_file("static/sw.js");
        assert!(sw.contains("'ravens-guard-nfc-v3'"));
        assert!(sw.contains("cache.put(request"));
        assert!(sw.contains("./icons/icon-192.png"));
    }
}
