// ============================================================================
// STATE MODULE - Estado compartido con Rc<RefCell> + estado de escaneo
// ============================================================================

pub mod session_state;
pub mod scan_state;
pub mod app_state;

pub use session_state::*;
pub use scan_state::*;
pub use app_state::*;
