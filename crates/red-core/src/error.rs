//! RED Error Types
//!
//! Defines every failure the interpreter can report. Errors are returned to
//! the caller instead of terminating the process; the CLI decides how to
//! surface them.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RedError {
    // Value errors
    #[error("type error: {0}")]
    TypeError(String),

    #[error("cannot divide by zero")]
    DivideByZero,

    #[error("index error: {0}")]
    IndexError(String),

    // Name resolution
    #[error("undefined symbol: {0}")]
    UnboundSymbol(String),

    #[error("no such function: {0}")]
    UnknownFunction(String),

    #[error("no such module: {0}")]
    UnknownModule(String),

    // Instruction decoding
    #[error("invalid syntax: {0}")]
    InvalidSyntax(String),

    #[error("invalid operation: {0}")]
    UnknownOperation(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    // VM limits
    #[error("stack overflow")]
    StackOverflow,

    #[error("stack underflow")]
    StackUnderflow,

    #[error("call depth exceeded (limit {0})")]
    CallDepthExceeded(usize),

    // IO boundary
    #[error("cannot load {path}: {reason}")]
    Resource { path: String, reason: String },
}

impl RedError {
    /// Build a resource error for `path`
    pub fn resource(path: impl Into<String>, reason: impl ToString) -> Self {
        RedError::Resource {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

pub type RedResult<T> = Result<T, RedError>;
