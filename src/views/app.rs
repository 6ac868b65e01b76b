// ============================================================================
// APP VIEW - Elige la pantalla y monta su controlador
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use crate::services::{ApiClient, SubmissionClient, WebNfcReader};
use crate::state::app_state::{AppState, Screen};
use crate::viewmodels::scan_session::{scan_channel, ScanSessionController};
use crate::views::{render_login, render_main_screen, DomModalSurface, DomScanView};

/// Renderizar la pantalla pedida. Main exige sesión (la comprueba App::show).
pub fn render_screen(state: &AppState, screen: Screen) -> Result<Element, JsValue> {
    match screen {
        Screen::Login => render_login(state),
        Screen::Main => {
            let session = state
                .session
                .get_session()
                .ok_or_else(|| JsValue::from_str("Main screen requires a session"))?;

            let (sender, inbox) = scan_channel();
            let element = render_main_screen(state, &sender)?;

            let controller = ScanSessionController::new(
                WebNfcReader,
                SubmissionClient::new(ApiClient::new()),
                DomScanView,
                DomModalSurface::new(sender.clone()),
                session,
                sender.clone(),
            );
            spawn_local(controller.run(inbox));
            state.attach_scanner(sender);

            Ok(element)
        }
    }
}
