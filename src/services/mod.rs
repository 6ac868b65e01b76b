pub mod api_client;
pub mod auth_service;
pub mod submission_service;
pub mod session_store;
pub mod nfc_service;

pub use api_client::{ApiClient, ProxyTransport, TransportError};
pub use auth_service::{perform_login, AuthError};
pub use submission_service::{SubmissionClient, SubmitError};
pub use session_store::{LocalStorageBackend, SessionBackend, SessionStore, StorageError};
pub use nfc_service::WebNfcReader;
