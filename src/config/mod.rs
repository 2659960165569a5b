pub mod loader;
pub mod registry;

pub use loader::*;
pub use registry::*;
