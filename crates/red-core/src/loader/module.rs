//! Module records
//!
//! A module owns its functions, its internal symbols and the exported
//! variables the importing program can read and write. While a module is
//! active, exports are copied into its symbols before each instruction and
//! copied back out afterwards.

use std::collections::HashMap;

use crate::error::{RedError, RedResult};
use crate::vm::function::FunctionTable;
use crate::vm::scope::SymbolTable;
use crate::vm::value::Value;

#[derive(Debug, Clone, Default)]
pub struct Module {
    pub functions: FunctionTable,
    pub symbols: SymbolTable,
    pub exports: SymbolTable,
}

impl Module {
    pub fn new() -> Self {
        Module::default()
    }

    /// Export -> internal, before an instruction runs
    pub fn sync_in(&mut self) {
        for (name, value) in self.exports.iter() {
            self.symbols.store(name.clone(), value.clone());
        }
    }

    /// Internal -> export, after an instruction ran
    pub fn sync_out(&mut self) {
        let names: Vec<String> = self.exports.iter().map(|(name, _)| name.clone()).collect();
        for name in names {
            if let Some(value) = self.symbols.get(&name) {
                self.exports.store(name, value.clone());
            }
        }
    }

    /// Read an export
    pub fn export(&self, name: &str) -> Option<&Value> {
        self.exports.get(name)
    }
}

/// Imported modules keyed by the name given to `IMPORT`
#[derive(Debug, Default)]
pub struct ModuleRegistry {
    modules: HashMap<String, Module>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        ModuleRegistry::default()
    }

    /// Link a module under `name`, replacing any earlier import
    pub fn link(&mut self, name: impl Into<String>, module: Module) {
        self.modules.insert(name.into(), module);
    }

    pub fn get(&self, name: &str) -> RedResult<&Module> {
        self.modules
            .get(name)
            .ok_or_else(|| RedError::UnknownModule(name.to_string()))
    }

    pub fn get_mut(&mut self, name: &str) -> RedResult<&mut Module> {
        self.modules
            .get_mut(name)
            .ok_or_else(|| RedError::UnknownModule(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}
