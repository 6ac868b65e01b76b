// ============================================================================
// STATUS MODAL VIEW - Overlay #status-modal (vive fuera del viewport)
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::{get_element_by_id, on_click, set_inner_html, set_style, ElementBuilder};
use crate::utils::STATUS_MODAL_ID;
use crate::viewmodels::modal::{Modal, ModalSurface};
use crate::viewmodels::scan_session::{ScanMessage, ScanSender};

/// Pinta el modal en el DOM; el botón de acuse encola ModalAcknowledged
#[derive(Clone, Debug)]
pub struct DomModalSurface {
    sender: ScanSender,
}

impl DomModalSurface {
    pub fn new(sender: ScanSender) -> Self {
        Self { sender }
    }

    fn build_content(&self, modal: &Modal) -> Result<Element, JsValue> {
        let mut content = ElementBuilder::new("div")?
            .class("modal-content")
            .child(
                ElementBuilder::new("i")?
                    .class(modal.icon_class())
                    .style("color", modal.accent_color())?
                    .build(),
            )?
            // Texto del servidor: siempre como texto plano
            .child(ElementBuilder::new("p")?.text(modal.text()).build())?;

        if let Some(label) = modal.button_label() {
            let button = ElementBuilder::new("button")?
                .class("btn-primary modal-btn")
                .attr("type", "button")?
                .style("background", modal.accent_color())?
                .text(label)
                .build();
            let sender = self.sender.clone();
            on_click(&button, move |_| sender.send(ScanMessage::ModalAcknowledged))?;
            content = content.child(button)?;
        }

        Ok(content.build())
    }

    fn try_render(&self, modal: &Modal) -> Result<(), JsValue> {
        let overlay = get_element_by_id(STATUS_MODAL_ID)
            .ok_or_else(|| JsValue::from_str("No #status-modal element found"))?;
        let content = self.build_content(modal)?;
        set_inner_html(&overlay, "");
        overlay.append_child(&content)?;
        set_style(&overlay, "display", "flex")
    }
}

impl ModalSurface for DomModalSurface {
    fn render(&self, modal: &Modal) {
        if let Err(e) = self.try_render(modal) {
            log::error!("❌ [MODAL] No se pudo mostrar el modal: {:?}", e);
        }
    }

    fn hide(&self) {
        if let Some(overlay) = get_element_by_id(STATUS_MODAL_ID) {
            let _ = set_style(&overlay, "display", "none");
            set_inner_html(&overlay, "");
        }
    }
}
