pub mod session;
pub mod auth;
pub mod checkpoint;
pub mod lenient;

pub use session::{Session, SiteId, StoredSession};
pub use auth::{LoginRequest, LoginResponse};
pub use checkpoint::{CheckpointVisit, SubmitFormRequest, SubmitFormResponse};
