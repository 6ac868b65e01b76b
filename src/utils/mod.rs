// Utils compartidos

pub mod constants;
pub mod texts;
pub mod nfc_ffi;

pub use constants::*;
