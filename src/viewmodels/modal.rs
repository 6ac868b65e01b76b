// ============================================================================
// MODAL PRESENTER - Carga / éxito / error
// ============================================================================
// Solo recuerda qué modal está visible. El acuse (OK / Cerrar) es la única
// vía para liberar el candado de lectura del ScanSessionController.
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    Loading(String),
    Success(String),
    Error(String),
}

impl Modal {
    pub fn loading(text: impl Into<String>) -> Self {
        Modal::Loading(text.into())
    }

    pub fn success(text: impl Into<String>) -> Self {
        Modal::Success(text.into())
    }

    pub fn error(text: impl Into<String>) -> Self {
        Modal::Error(text.into())
    }

    pub fn text(&self) -> &str {
        match self {
            Modal::Loading(text) | Modal::Success(text) | Modal::Error(text) => text,
        }
    }

    /// Éxito y error exponen botón de acuse; la carga no
    pub fn is_acknowledgeable(&self) -> bool {
        !matches!(self, Modal::Loading(_))
    }

    pub fn icon_class(&self) -> &'static str {
        match self {
            Modal::Loading(_) => "fas fa-circle-notch fa-spin modal-icon",
            Modal::Success(_) => "fas fa-check-circle modal-icon",
            Modal::Error(_) => "fas fa-times-circle modal-icon",
        }
    }

    pub fn accent_color(&self) -> &'static str {
        match self {
            Modal::Loading(_) => "#2563eb",
            Modal::Success(_) => "#16a34a",
            Modal::Error(_) => "#ef4444",
        }
    }

    pub fn button_label(&self) -> Option<&'static str> {
        match self {
            Modal::Loading(_) => None,
            Modal::Success(_) => Some(crate::utils::texts::BTN_OK),
            Modal::Error(_) => Some(crate::utils::texts::BTN_CLOSE),
        }
    }
}

/// Superficie donde se pinta el modal (DOM en el navegador)
pub trait ModalSurface {
    fn render(&self, modal: &Modal);
    fn hide(&self);
}

pub struct ModalPresenter<S> {
    surface: S,
    visible: Option<Modal>,
}

impl<S: ModalSurface> ModalPresenter<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            visible: None,
        }
    }

    /// Reemplaza el modal visible
    pub fn show(&mut self, modal: Modal) {
        log::debug!("🪟 [MODAL] {:?}", modal);
        self.surface.render(&modal);
        self.visible = Some(modal);
    }

    pub fn current(&self) -> Option<&Modal> {
        self.visible.as_ref()
    }

    /// Acuse del guardia. `true` solo si había un resultado visible que cerrar.
    pub fn acknowledge(&mut self) -> bool {
        match &self.visible {
            Some(modal) if modal.is_acknowledgeable() => {
                self.surface.hide();
                self.visible = None;
                true
            }
            _ => false,
        }
    }

    /// Ocultar sin acuse (salida de pantalla)
    pub fn clear(&mut self) {
        if self.visible.take().is_some() {
            self.surface.hide();
        }
    }
}
