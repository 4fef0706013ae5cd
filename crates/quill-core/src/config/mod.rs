//! Configuration system for Quill

pub mod defaults;
mod loader;
mod settings;
mod types;
pub mod validation;

pub use defaults::*;
pub use loader::*;
pub use settings::*;
pub use types::*;
pub use validation::*;
