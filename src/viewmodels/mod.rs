pub mod modal;
pub mod scan_session;
pub mod login;

pub use modal::{Modal, ModalPresenter, ModalSurface};
pub use scan_session::{ScanSessionController, ScanMessage, ScanSender, NfcReader, ScanView};
pub use login::{LoginForm, LoginOutcome, LoginViewModel};
