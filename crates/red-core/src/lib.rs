//! RED Interpreter - Core Library
//!
//! Public API surface for the RED core.

pub mod error;
pub mod config;
pub mod instruction;
pub mod vm;
pub mod loader;
pub mod keyword;
pub mod host;

// Re-export commonly used types
pub use error::{RedError, RedResult};
pub use config::RedConfig;
pub use instruction::OpCode;
pub use vm::{Interpreter, Value};
pub use loader::{Module, ModuleLoader};
pub use keyword::{KeywordExtension, KeywordRegistry};
pub use host::{Host, MemoryHost};

#[cfg(test)]
mod tests {
	use super::*;

	fn run(source: &str) -> RedResult<Interpreter<MemoryHost>> {
		let mut interp = Interpreter::new(RedConfig::new(), MemoryHost::new());
		interp.run_source(source)?;
		Ok(interp)
	}

	#[test]
	fn top_value_is_left_operand() {
		let interp = run("PUSH 3\nPUSH 10\nSUB\nPUSH 2\nPUSH 8\nDIV").unwrap();
		assert_eq!(interp.stack().values(), &[Value::Number(7.0), Value::Number(4.0)]);
	}

	#[test]
	fn divide_by_zero_below_top() {
		let err = run("PUSH 0\nPUSH 5\nDIV").unwrap_err();
		assert!(matches!(err, RedError::DivideByZero));
	}

	#[test]
	fn arithmetic_rejects_mixed_operands() {
		let err = run("PUSH \"a\"\nPUSH 1\nADD").unwrap_err();
		assert!(matches!(err, RedError::TypeError(_)));
	}

	#[test]
	fn print_goes_through_host() {
		let interp = run("PUSH \"hello world\"\nPRINT\nPUSH 2.5\nPRINT").unwrap();
		assert_eq!(interp.host().output(), &["hello world".to_string(), "2.5".to_string()]);
		assert!(interp.stack().is_empty());
	}

	#[test]
	fn independent_interpreters() {
		let a = run("PUSH 1\nSTORE x").unwrap();
		let b = run("PUSH 2\nSTORE x").unwrap();
		assert_eq!(a.globals().load("x").unwrap(), Value::Number(1.0));
		assert_eq!(b.globals().load("x").unwrap(), Value::Number(2.0));
	}

	#[test]
	fn exit_stops_program() {
		let interp = run("PUSH 1\nEXIT\nPUSH 2").unwrap();
		assert!(interp.is_halted());
		assert_eq!(interp.stack().size(), 1);
	}

	#[test]
	fn unknown_opcode_without_keywords() {
		let err = run("FROB 1").unwrap_err();
		assert!(matches!(err, RedError::UnknownOperation(_)));
	}

	#[test]
	fn stack_overflow_is_reported() {
		let config = RedConfig { max_stack_size: 2, ..RedConfig::default() };
		let mut interp = Interpreter::new(config, MemoryHost::new());
		let err = interp.run_source("PUSH 1\nPUSH 2\nPUSH 3").unwrap_err();
		assert!(matches!(err, RedError::StackOverflow));
	}
}
