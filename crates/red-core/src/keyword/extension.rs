//! Keyword extensions
//!
//! A prefix plus a case table mapping case names to instruction-line
//! templates. Invoked as `PREFIX CASE arg...`.

use std::collections::HashMap;

use crate::error::{RedError, RedResult};
use crate::vm::scope::SymbolTable;
use crate::vm::value::Value;

/// One loaded keyword pack
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeywordExtension {
    prefix: String,
    cases: HashMap<String, Vec<String>>,
}

impl KeywordExtension {
    pub fn new(prefix: impl Into<String>) -> Self {
        KeywordExtension {
            prefix: prefix.into(),
            cases: HashMap::new(),
        }
    }

    /// Build an extension from `(case, code)` pairs; later duplicates win
    pub fn from_cases<I, C>(prefix: impl Into<String>, cases: I) -> Self
    where
        I: IntoIterator<Item = (C, Vec<String>)>,
        C: Into<String>,
    {
        let mut ext = KeywordExtension::new(prefix);
        for (case, code) in cases {
            ext.add_case(case, code);
        }
        ext
    }

    pub fn add_case(&mut self, case: impl Into<String>, code: Vec<String>) {
        self.cases.insert(case.into(), code);
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn case(&self, name: &str) -> Option<&[String]> {
        self.cases.get(name).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}

/// Bind invocation arguments positionally as `term0`, `term1`, ...
pub fn bind_arguments(args: &[&str]) -> RedResult<SymbolTable> {
    let mut table = SymbolTable::new();
    for (n, arg) in args.iter().enumerate() {
        let value = Value::parse_literal(arg)
            .ok_or_else(|| RedError::InvalidArgument(arg.to_string()))?;
        table.store(format!("term{}", n), value);
    }
    Ok(table)
}
