pub mod app;
pub mod login;
pub mod main_screen;
pub mod status_modal;

pub use app::render_screen;
pub use login::render_login;
pub use main_screen::{render_main_screen, DomScanView};
pub use status_modal::DomModalSurface;
