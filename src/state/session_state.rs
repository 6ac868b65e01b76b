// ============================================================================
// SESSION STATE - Guardia autenticado (compartido entre pantallas)
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use crate::models::Session;

#[derive(Clone, Default)]
pub struct SessionState {
    session: Rc<RefCell<Option<Session>>>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_session(&self, session: Option<Session>) {
        *self.session.borrow_mut() = session;
    }

    pub fn get_session(&self) -> Option<Session> {
        self.session.borrow().clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.borrow().is_some()
    }

    pub fn logout(&self) {
        self.set_session(None);
    }
}
