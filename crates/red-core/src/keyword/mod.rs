pub mod extension;
pub mod registry;

pub use extension::{bind_arguments, KeywordExtension};
pub use registry::KeywordRegistry;
