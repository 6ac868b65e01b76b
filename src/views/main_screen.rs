// ============================================================================
// MAIN SCREEN VIEW - Botón ESCANEAR + estado del lector
// ============================================================================
// La vista no decide nada: el click encola StartRequested y el controlador
// de escaneo repinta a través de DomScanView.
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::{add_class, get_element_by_id, on_click, remove_class, set_text_content, window, ElementBuilder};
use crate::state::app_state::AppState;
use crate::utils::texts::*;
use crate::viewmodels::scan_session::{ScanMessage, ScanSender, ScanView};

/// Renderizar pantalla principal
pub fn render_main_screen(state: &AppState, scan: &ScanSender) -> Result<Element, JsValue> {
    log::info!("🎬 [MAIN] render_main_screen()");

    let logout = ElementBuilder::new("div")?
        .class("header-logout")
        .attr("role", "button")?
        .attr("aria-label", "Cerrar sesión")?
        .child(ElementBuilder::new("i")?.class("fas fa-sign-out-alt fa-lg").build())?
        .build();
    {
        let state = state.clone();
        on_click(&logout, move |_| crate::app::logout(&state))?;
    }

    let header = ElementBuilder::new("header")?
        .class("header-app")
        .child(ElementBuilder::new("div")?.class("header-logo-text").text(HEADER_TITLE).build())?
        .child(logout)?
        .build();

    let nfc_button = ElementBuilder::new("div")?
        .class("nfc-button")
        .id("nfc-btn")?
        .attr("role", "button")?
        .child(ElementBuilder::new("i")?.class("fas fa-wifi").build())?
        .child(ElementBuilder::new("span")?.id("btn-text")?.text(BTN_SCAN).build())?
        .build();
    {
        let scan = scan.clone();
        on_click(&nfc_button, move |_| scan.send(ScanMessage::StartRequested))?;
    }

    let scan_container = ElementBuilder::new("div")?
        .class("scan-container")
        .child(
            ElementBuilder::new("div")?
                .class("status-text")
                .id("status-text")?
                .text(STATUS_READY)
                .build(),
        )?
        .child(nfc_button)?
        .child(ElementBuilder::new("div")?.class("info-text").text(SCAN_HINT).build())?
        .build();

    Ok(ElementBuilder::new("div")?
        .class("main-screen")
        .child(header)?
        .child(scan_container)?
        .build())
}

/// ScanView sobre los elementos de la pantalla principal
#[derive(Clone, Copy, Debug, Default)]
pub struct DomScanView;

impl DomScanView {
    fn paint(&self, scanning: bool, status: &str, label: &str) {
        if let Some(button) = get_element_by_id("nfc-btn") {
            let result = if scanning {
                add_class(&button, "scanning")
            } else {
                remove_class(&button, "scanning")
            };
            if let Err(e) = result {
                log::warn!("⚠️ [MAIN] No se pudo actualizar el botón: {:?}", e);
            }
        }
        if let Some(text) = get_element_by_id("status-text") {
            set_text_content(&text, status);
        }
        if let Some(text) = get_element_by_id("btn-text") {
            set_text_content(&text, label);
        }
    }
}

impl ScanView for DomScanView {
    fn show_ready(&self) {
        self.paint(false, STATUS_READY, BTN_SCAN);
    }

    fn show_listening(&self) {
        self.paint(true, STATUS_LISTENING, BTN_SCANNING);
    }

    fn alert(&self, message: &str) {
        if let Some(win) = window() {
            if let Err(e) = win.alert_with_message(message) {
                log::error!("❌ [MAIN] alert() falló: {:?}", e);
            }
        }
    }
}
