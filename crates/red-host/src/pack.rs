//! Keyword packs
//!
//! JSON documents shaped `{"prefix": ..., "main": [{"case": ..., "code": [...]}]}`
//! decoded into core keyword extensions.

use serde::Deserialize;
use tracing::debug;

use red_core::{KeywordExtension, RedError, RedResult};

/// Built-in pack registered at startup
pub const BUILTIN_PACK: &str = include_str!("../packs/util.json");

/// Name reported for the built-in pack in diagnostics
pub const BUILTIN_PACK_NAME: &str = "built-in/util.json";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct KeywordPack {
    pub prefix: String,
    pub main: Vec<KeywordCase>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct KeywordCase {
    pub case: String,
    pub code: Vec<String>,
}

impl From<KeywordPack> for KeywordExtension {
    fn from(pack: KeywordPack) -> Self {
        KeywordExtension::from_cases(
            pack.prefix,
            pack.main.into_iter().map(|c| (c.case, c.code)),
        )
    }
}

/// Decode a pack; `origin` names the source in errors
pub fn parse_keyword_pack(json: &str, origin: &str) -> RedResult<KeywordExtension> {
    let pack: KeywordPack =
        serde_json::from_str(json).map_err(|e| RedError::resource(origin, e))?;
    if pack.prefix.is_empty() {
        return Err(RedError::resource(origin, "keyword pack prefix is empty"));
    }
    debug!(origin, prefix = %pack.prefix, cases = pack.main.len(), "decoded keyword pack");
    Ok(pack.into())
}

/// The embedded built-in pack
pub fn builtin_keywords() -> RedResult<KeywordExtension> {
    parse_keyword_pack(BUILTIN_PACK, BUILTIN_PACK_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn decodes_cases_in_order() {
        let json = r#"{"prefix": "MATH", "main": [
            {"case": "SQ", "code": ["LOADARG term0", "LOADARG term0", "MULT"]}
        ]}"#;
        let ext = parse_keyword_pack(json, "math.json").unwrap();
        assert_eq!(ext.prefix(), "MATH");
        assert_eq!(
            ext.case("SQ").unwrap(),
            &["LOADARG term0", "LOADARG term0", "MULT"]
        );
    }

    #[test]
    fn malformed_pack_is_resource_error() {
        let err = parse_keyword_pack(r#"{"prefix": "X"}"#, "x.json").unwrap_err();
        assert!(matches!(err, RedError::Resource { ref path, .. } if path == "x.json"));

        let err = parse_keyword_pack(r#"{"prefix": "", "main": []}"#, "e.json").unwrap_err();
        assert!(matches!(err, RedError::Resource { .. }));
    }

    #[test]
    fn builtin_pack_decodes() {
        let ext = builtin_keywords().unwrap();
        assert_eq!(ext.prefix(), "UTIL");
        assert!(ext.case("INC").is_some());
    }
}
