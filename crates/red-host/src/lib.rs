//! RED host crate: OS integration for the RED interpreter
//!
//! Filesystem-backed `Host`, keyword-pack decoding with the embedded
//! built-in pack, program reading and configuration files.

pub mod config;
pub mod fs;
pub mod pack;

pub use config::{load_config, parse_config};
pub use fs::{read_program, FsHost};
pub use pack::{builtin_keywords, parse_keyword_pack, KeywordCase, KeywordPack};
