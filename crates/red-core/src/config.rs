//! RED Configuration
//!
//! Stack and nesting limits, the `PUSH` strictness switch and the random seed.
//! Every field has a default, so a TOML file may set any subset.

use serde::Deserialize;

/// Interpreter configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RedConfig {
    /// Maximum operand stack depth
    pub max_stack_size: usize,

    /// Maximum nesting of RUN, MODRUN and keyword expansions
    pub max_call_depth: usize,

    /// Reject `PUSH` literals that are not a number, quoted text or boolean
    pub strict_push: bool,

    /// Seed for RANDINT / RANDFLOAT; random when unset
    pub random_seed: Option<u64>,
}

impl Default for RedConfig {
    fn default() -> Self {
        RedConfig {
            max_stack_size: 1024,
            max_call_depth: 256,
            strict_push: false,
            random_seed: None,
        }
    }
}

impl RedConfig {
    /// Create a new configuration with default limits
    pub fn new() -> Self {
        Self::default()
    }
}
