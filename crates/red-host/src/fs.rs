//! Filesystem host
//!
//! Reads module sources and keyword packs from disk, prints to stdout and
//! sleeps the calling thread.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use tracing::debug;

use red_core::{Host, KeywordExtension, RedError, RedResult};

use crate::pack::parse_keyword_pack;

/// Host backed by the real OS. Relative paths resolve against `base_dir`.
#[derive(Debug, Clone, Default)]
pub struct FsHost {
    base_dir: Option<PathBuf>,
}

impl FsHost {
    pub fn new() -> Self {
        FsHost::default()
    }

    /// Resolve relative `IMPORT`/`KEYPORT` paths against `dir`
    pub fn with_base_dir(dir: impl Into<PathBuf>) -> Self {
        FsHost {
            base_dir: Some(dir.into()),
        }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        match &self.base_dir {
            Some(base) if Path::new(path).is_relative() => base.join(path),
            _ => PathBuf::from(path),
        }
    }

    fn read(&self, path: &str) -> RedResult<String> {
        let resolved = self.resolve(path);
        debug!(path, resolved = %resolved.display(), "reading file");
        fs::read_to_string(&resolved).map_err(|e| RedError::resource(path, e))
    }
}

impl Host for FsHost {
    fn print(&mut self, text: &str) -> RedResult<()> {
        let mut out = io::stdout().lock();
        writeln!(out, "{}", text).map_err(|e| RedError::resource("<stdout>", e))
    }

    fn sleep(&mut self, duration: Duration) {
        thread::sleep(duration);
    }

    fn read_module(&mut self, path: &str) -> RedResult<String> {
        self.read(path)
    }

    fn load_keywords(&mut self, path: &str) -> RedResult<KeywordExtension> {
        let json = self.read(path)?;
        parse_keyword_pack(&json, path)
    }
}

/// Read a program source file
pub fn read_program(path: impl AsRef<Path>) -> RedResult<String> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|e| RedError::resource(path.display().to_string(), e))
}
