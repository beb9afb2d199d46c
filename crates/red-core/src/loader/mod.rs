pub mod loader;
pub mod module;

pub use loader::ModuleLoader;
pub use module::{Module, ModuleRegistry};
