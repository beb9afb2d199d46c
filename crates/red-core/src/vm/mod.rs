pub mod function;
pub mod interpreter;
pub mod scope;
pub mod stack;
pub mod value;

mod ops;
mod runner;

pub use interpreter::Interpreter;
pub use value::Value;
