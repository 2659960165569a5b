pub mod codec;
pub mod config;
pub mod error;
pub mod field;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use error::NumfieldError;
