// ============================================================================
// LOGIN VIEWMODEL - Lógica del formulario de login
// ============================================================================
// La vista solo pinta LoginForm; aquí se decide qué pasa con cada envío.
// ============================================================================

use crate::models::Session;
use crate::services::api_client::ProxyTransport;
use crate::services::session_store::{SessionBackend, SessionStore};
use crate::state::Screen;
use crate::utils::texts::{BTN_LOGIN, BTN_LOGIN_BUSY};

#[derive(Debug, Clone, PartialEq)]
pub enum LoginOutcome {
    /// Campos vacíos: no se envía nada
    Ignored,
    LoggedIn(Session),
    Failed(String),
}

impl LoginOutcome {
    pub fn next_screen(&self) -> Option<Screen> {
        match self {
            LoginOutcome::LoggedIn(_) => Some(Screen::Main),
            _ => None,
        }
    }
}

/// Estado visible del formulario
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub busy: bool,
    pub error: Option<String>,
}

impl LoginForm {
    pub fn button_label(&self) -> &'static str {
        if self.busy {
            BTN_LOGIN_BUSY
        } else {
            BTN_LOGIN
        }
    }

    pub fn begin(&mut self) {
        self.busy = true;
    }

    /// Tras el intento: en error se muestra el mensaje y se rehabilita el botón
    pub fn finish(&mut self, outcome: &LoginOutcome) {
        match outcome {
            LoginOutcome::Failed(message) => {
                self.busy = false;
                self.error = Some(message.clone());
            }
            LoginOutcome::Ignored => self.busy = false,
            LoginOutcome::LoggedIn(_) => self.error = None,
        }
    }
}

pub struct LoginViewModel<T, B> {
    transport: T,
    store: SessionStore<B>,
}

impl<T: ProxyTransport, B: SessionBackend> LoginViewModel<T, B> {
    pub fn new(transport: T, store: SessionStore<B>) -> Self {
        Self { transport, store }
    }

    pub async fn submit(&self, username: &str, password: &str) -> LoginOutcome {
        if username.is_empty() || password.is_empty() {
            return LoginOutcome::Ignored;
        }

        match self.store.login(&self.transport, username, password).await {
            Ok(session) => LoginOutcome::LoggedIn(session),
            Err(e) => LoginOutcome::Failed(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SiteId;
    use crate::test_support::{FakeTransport, MemoryBackend};
    use futures::executor::block_on;
    use serde_json::json;

    fn viewmodel() -> (FakeTransport, MemoryBackend, LoginViewModel<FakeTransport, MemoryBackend>) {
        let transport = FakeTransport::new();
        let backend = MemoryBackend::new();
        let vm = LoginViewModel::new(transport.clone(), SessionStore::new(backend.clone()));
        (transport, backend, vm)
    }

    #[test]
    fn valid_credentials_persist_and_go_to_main() {
        let (transport, backend, vm) = viewmodel();
        transport.reply_json(200, json!({ "success": true, "condominioId": "C1" }));

        let outcome = block_on(vm.submit("juan", "secreto"));

        assert_eq!(outcome, LoginOutcome::LoggedIn(Session::new("juan", SiteId::from("C1"))));
        assert_eq!(outcome.next_screen(), Some(Screen::Main));
        assert_eq!(backend.raw_json().unwrap()["condominioId"], "C1");
    }

    #[test]
    fn bad_credentials_show_inline_error_and_reenable_form() {
        let (transport, _, vm) = viewmodel();
        transport.reply_json(200, json!({ "success": false, "message": "bad creds" }));
        let mut form = LoginForm::default();

        form.begin();
        assert_eq!(form.button_label(), "Verificando...");
        let outcome = block_on(vm.submit("juan", "x"));
        form.finish(&outcome);

        assert_eq!(outcome.next_screen(), None);
        assert_eq!(form.error.as_deref(), Some("bad creds"));
        assert!(!form.busy);
        assert_eq!(form.button_label(), "INGRESAR");
    }

    #[test]
    fn empty_fields_send_nothing() {
        let (transport, _, vm) = viewmodel();

        assert_eq!(block_on(vm.submit("", "x")), LoginOutcome::Ignored);
        assert_eq!(block_on(vm.submit("juan", "")), LoginOutcome::Ignored);
        assert!(transport.requests().is_empty());
    }
}
