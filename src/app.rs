// ============================================================================
// APP - Aplicación principal (navegación entre pantallas)
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::{append_child, get_element_by_id, set_inner_html};
use crate::services::{LocalStorageBackend, SessionStore};
use crate::state::app_state::{AppState, Screen};
use crate::utils::VIEWPORT_ID;
use crate::views::render_screen;

/// Aplicación principal
pub struct App {
    state: AppState,
    root: Element,
}

impl App {
    /// Crear nueva aplicación
    pub fn new() -> Result<Self, JsValue> {
        let root = get_element_by_id(VIEWPORT_ID)
            .ok_or_else(|| JsValue::from_str("No #viewport element found"))?;

        let state = AppState::new();

        // Cargar sesión desde storage si existe
        if let Some(session) = SessionStore::new(LocalStorageBackend::new()).restore() {
            log::info!("💾 [APP] Sesión restaurada: {} @ {}", session.guard_name, session.site_id);
            state.session.set_session(Some(session));
        }

        Ok(Self { state, root })
    }

    /// Primer render según la sesión restaurada
    pub fn render(&mut self) -> Result<(), JsValue> {
        self.show(self.state.boot_screen())
    }

    /// Reemplaza todo el viewport por la pantalla pedida
    pub fn show(&mut self, screen: Screen) -> Result<(), JsValue> {
        // La pantalla saliente suelta el lector NFC antes de desaparecer
        self.state.stop_scanner();

        let screen = if screen == Screen::Main && !self.state.session.is_logged_in() {
            log::warn!("⚠️ [APP] Main sin sesión, redirigiendo a login");
            Screen::Login
        } else {
            screen
        };

        let previous = self.state.current_screen();
        let view = render_screen(&self.state, screen)?;
        set_inner_html(&self.root, "");
        append_child(&self.root, &view)?;
        self.state.set_screen(screen);

        log::info!("🧭 [APP] {:?} -> {:?}", previous, screen);
        Ok(())
    }
}

/// Cerrar sesión: limpia storage y estado, vuelve a login
pub fn logout(state: &AppState) {
    state.stop_scanner();
    SessionStore::new(LocalStorageBackend::new()).logout();
    state.session.logout();
    crate::schedule_navigation(Screen::Login);
}
