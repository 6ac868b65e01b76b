// ============================================================================
// APP STATE - Estado global de la aplicación
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use crate::state::SessionState;
use crate::viewmodels::scan_session::{ScanMessage, ScanSender};

/// Pantallas de la app. Cada cambio reemplaza todo el viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Login,
    Main,
}

#[derive(Clone)]
pub struct AppState {
    pub session: SessionState,
    pub screen: Rc<RefCell<Screen>>,
    /// Cola del controlador de escaneo de la pantalla principal (si está montada)
    pub scan: Rc<RefCell<Option<ScanSender>>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            session: SessionState::new(),
            screen: Rc::new(RefCell::new(Screen::Login)),
            scan: Rc::new(RefCell::new(None)),
        }
    }

    pub fn current_screen(&self) -> Screen {
        *self.screen.borrow()
    }

    pub fn set_screen(&self, screen: Screen) {
        *self.screen.borrow_mut() = screen;
    }

    /// Pantalla de arranque según haya sesión restaurada o no
    pub fn boot_screen(&self) -> Screen {
        if self.session.is_logged_in() {
            Screen::Main
        } else {
            Screen::Login
        }
    }

    pub fn attach_scanner(&self, sender: ScanSender) {
        self.stop_scanner();
        *self.scan.borrow_mut() = Some(sender);
    }

    /// Detener el controlador de escaneo activo (apaga la antena)
    pub fn stop_scanner(&self) {
        if let Some(sender) = self.scan.borrow_mut().take() {
            sender.send(ScanMessage::Shutdown);
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
