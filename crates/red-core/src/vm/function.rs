//! Function storage
//!
//! Named instruction-line bodies created by `FUNC ... ENDFUNC` blocks.

use std::collections::HashMap;

/// A stored function body. Never mutated after creation.
///
/// The loop condition is not stored here: `RUN` and `MODRUN` name it per
/// call, so the same body can run once at one call site and loop at another.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: String,
    /// Declared parameter names (reserved, not bound at call sites)
    pub params: Vec<String>,
    pub body: Vec<String>,
}

impl Function {
    pub fn new(name: impl Into<String>, params: Vec<String>) -> Self {
        Function {
            name: name.into(),
            params,
            body: Vec::new(),
        }
    }
}

/// Function table owned by the program or by one module
#[derive(Debug, Clone, Default)]
pub struct FunctionTable {
    functions: HashMap<String, Function>,
}

impl FunctionTable {
    pub fn new() -> Self {
        FunctionTable::default()
    }

    /// Register a function, replacing any previous definition with the same name
    pub fn define(&mut self, function: Function) {
        self.functions.insert(function.name.clone(), function);
    }

    pub fn get(&self, name: &str) -> Option<&Function> {
        self.functions.get(name)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

/// A function definition being collected line by line
#[derive(Debug)]
pub struct PendingFunction {
    function: Function,
}

impl PendingFunction {
    pub fn open(name: &str, params: &[&str]) -> Self {
        PendingFunction {
            function: Function::new(name, params.iter().map(|p| p.to_string()).collect()),
        }
    }

    pub fn name(&self) -> &str {
        &self.function.name
    }

    /// Append one body line verbatim
    pub fn push_line(&mut self, line: &str) {
        self.function.body.push(line.to_string());
    }

    pub fn finish(self) -> Function {
        self.function
    }
}
