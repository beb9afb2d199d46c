//! VM Scope Model
//!
//! Symbol tables and the execution context that selects which of them an
//! instruction reads and writes. Three kinds of table exist: the global
//! symbols, one internal table per module, and the ephemeral argument table
//! of a keyword expansion.

use std::collections::HashMap;

use crate::error::{RedError, RedResult};
use super::value::Value;

/// Name -> value bindings; last store wins
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SymbolTable {
    values: HashMap<String, Value>,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Clone the bound value or fail with `UnboundSymbol`
    pub fn load(&self, name: &str) -> RedResult<Value> {
        self.values
            .get(name)
            .cloned()
            .ok_or_else(|| RedError::UnboundSymbol(name.to_string()))
    }

    pub fn store(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }
}

/// Which symbol table plain STORE/LOAD address
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeTarget {
    Global,
    Module(String),
}

/// Scope set for one running block of instructions
#[derive(Debug, Clone)]
pub struct ExecContext {
    pub target: ScopeTarget,
    /// Index of the operand stack this context pushes to
    pub stack: usize,
    /// Argument table of the enclosing keyword expansion, if any
    pub args: Option<SymbolTable>,
}

impl ExecContext {
    /// Context of the main program
    pub fn top_level() -> Self {
        ExecContext {
            target: ScopeTarget::Global,
            stack: 0,
            args: None,
        }
    }

    /// Same scope and stack with a fresh argument table
    pub fn for_expansion(&self, args: SymbolTable) -> Self {
        ExecContext {
            target: self.target.clone(),
            stack: self.stack,
            args: Some(args),
        }
    }

    /// Same scope and stack; expansion arguments do not follow into function bodies
    pub fn for_function(&self) -> Self {
        ExecContext {
            target: self.target.clone(),
            stack: self.stack,
            args: None,
        }
    }

    /// Module scope on its own stack
    pub fn for_module(module: &str, stack: usize) -> Self {
        ExecContext {
            target: ScopeTarget::Module(module.to_string()),
            stack,
            args: None,
        }
    }

    pub fn module(&self) -> Option<&str> {
        match &self.target {
            ScopeTarget::Module(name) => Some(name),
            ScopeTarget::Global => None,
        }
    }

    /// Map a STORE/LOAD operand to the real symbol name.
    ///
    /// Inside an expansion an operand bound in the argument table must hold
    /// text naming the target symbol; unbound operands are used as written.
    pub fn resolve_name(&self, name: &str) -> RedResult<String> {
        match self.args.as_ref().and_then(|args| args.get(name)) {
            Some(Value::Text(real)) => Ok(real.clone()),
            Some(other) => Err(RedError::TypeError(format!(
                "argument {} holds {}, not a symbol name",
                name,
                other.type_name()
            ))),
            None => Ok(name.to_string()),
        }
    }

    /// `LOADARG`: read an argument of the enclosing expansion
    pub fn load_arg(&self, name: &str) -> RedResult<Value> {
        match &self.args {
            Some(args) => args.load(name),
            None => Err(RedError::UnboundSymbol(name.to_string())),
        }
    }
}
