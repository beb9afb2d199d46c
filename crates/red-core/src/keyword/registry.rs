//! Keyword Registry
//!
//! Loaded keyword extensions keyed by prefix.
//! Loading a pack whose prefix is already present replaces the earlier one.

use std::collections::HashMap;

use super::extension::KeywordExtension;

#[derive(Debug, Default)]
pub struct KeywordRegistry {
    extensions: HashMap<String, KeywordExtension>,
}

impl KeywordRegistry {
    pub fn new() -> Self {
        KeywordRegistry::default()
    }

    /// Register an extension; returns the one it replaced, if any
    pub fn register(&mut self, ext: KeywordExtension) -> Option<KeywordExtension> {
        self.extensions.insert(ext.prefix().to_string(), ext)
    }

    pub fn get(&self, prefix: &str) -> Option<&KeywordExtension> {
        self.extensions.get(prefix)
    }

    /// Template for `prefix case`, if both are known
    pub fn lookup(&self, prefix: &str, case: &str) -> Option<&[String]> {
        self.extensions.get(prefix).and_then(|ext| ext.case(case))
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }
}
