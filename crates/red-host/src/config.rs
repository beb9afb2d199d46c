//! Configuration files
//!
//! `RedConfig` read from TOML; missing keys keep their defaults.

use std::fs;
use std::path::Path;

use red_core::{RedConfig, RedError, RedResult};

/// Parse TOML configuration text
pub fn parse_config(text: &str, origin: &str) -> RedResult<RedConfig> {
    toml::from_str(text).map_err(|e| RedError::resource(origin, e))
}

/// Load configuration from a TOML file
pub fn load_config(path: impl AsRef<Path>) -> RedResult<RedConfig> {
    let path = path.as_ref();
    let origin = path.display().to_string();
    let text = fs::read_to_string(path).map_err(|e| RedError::resource(origin.as_str(), e))?;
    parse_config(&text, &origin)
}
