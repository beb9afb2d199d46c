//! Host boundary
//!
//! Everything the interpreter needs from the outside world: writing program
//! output, sleeping, reading imported module sources and loading keyword
//! packs. The interpreter performs no IO of its own.

use std::collections::HashMap;
use std::time::Duration;

use crate::error::{RedError, RedResult};
use crate::keyword::KeywordExtension;

/// Services provided by the embedding program
pub trait Host {
    /// Write one line of program output (`PRINT`)
    fn print(&mut self, text: &str) -> RedResult<()>;

    /// Block the calling thread (`DELAYST`)
    fn sleep(&mut self, duration: Duration);

    /// Return the source text of a module file (`IMPORT`)
    fn read_module(&mut self, path: &str) -> RedResult<String>;

    /// Load and decode a keyword pack (`KEYPORT`)
    fn load_keywords(&mut self, path: &str) -> RedResult<KeywordExtension>;
}

/// In-memory host: virtual files, captured output, recorded sleeps.
#[derive(Debug, Default)]
pub struct MemoryHost {
    files: HashMap<String, String>,
    keyword_packs: HashMap<String, KeywordExtension>,
    output: Vec<String>,
    slept: Duration,
}

impl MemoryHost {
    pub fn new() -> Self {
        MemoryHost::default()
    }

    /// Add a module source at `path`
    pub fn with_file(mut self, path: impl Into<String>, source: impl Into<String>) -> Self {
        self.files.insert(path.into(), source.into());
        self
    }

    /// Add a decoded keyword pack at `path`
    pub fn with_keywords(mut self, path: impl Into<String>, ext: KeywordExtension) -> Self {
        self.keyword_packs.insert(path.into(), ext);
        self
    }

    /// Lines printed so far
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Total time requested through `sleep`
    pub fn slept(&self) -> Duration {
        self.slept
    }
}

impl Host for MemoryHost {
    fn print(&mut self, text: &str) -> RedResult<()> {
        self.output.push(text.to_string());
        Ok(())
    }

    fn sleep(&mut self, duration: Duration) {
        self.slept += duration;
    }

    fn read_module(&mut self, path: &str) -> RedResult<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| RedError::resource(path, "no such file"))
    }

    fn load_keywords(&mut self, path: &str) -> RedResult<KeywordExtension> {
        self.keyword_packs
            .get(path)
            .cloned()
            .ok_or_else(|| RedError::resource(path, "no such keyword file"))
    }
}
