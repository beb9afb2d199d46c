//! Runtime Value Representation
//!
//! Defines the tagged values manipulated by RED programs. The variant tag is
//! authoritative: conversions happen only through the explicit `STR`,
//! `FLOAT` and `BOOL` instructions.

use std::fmt;

use crate::error::{RedError, RedResult};

/// Runtime value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Numeric value (IEEE 754)
    Number(f64),

    /// Text value
    Text(String),

    /// Boolean value
    Boolean(bool),

    /// Ordered, arbitrarily nested sequence of values
    Array(Vec<Value>),
}

impl Value {
    /// Variant name used in diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Text(_) => "string",
            Value::Boolean(_) => "bool",
            Value::Array(_) => "array",
        }
    }

    /// Parse one literal token: a number, a quoted string or `true`/`false`.
    pub fn parse_literal(token: &str) -> Option<Value> {
        if let Ok(n) = token.parse::<f64>() {
            return Some(Value::Number(n));
        }
        if let Some(inner) = unquote(token) {
            return Some(Value::Text(inner.to_string()));
        }
        match token {
            "true" => Some(Value::Boolean(true)),
            "false" => Some(Value::Boolean(false)),
            _ => None,
        }
    }

    /// `STR`: render any value as text
    pub fn to_text(&self) -> Value {
        match self {
            Value::Text(s) => Value::Text(s.clone()),
            other => Value::Text(other.to_string()),
        }
    }

    /// `FLOAT`: parse text as a number; booleans are never numeric
    pub fn to_number(&self) -> RedResult<Value> {
        match self {
            Value::Number(n) => Ok(Value::Number(*n)),
            Value::Text(s) => s.trim().parse::<f64>().map(Value::Number).map_err(|_| {
                RedError::TypeError(format!("cannot convert string {:?} to number", s))
            }),
            other => Err(RedError::TypeError(format!(
                "cannot convert {} to number",
                other.type_name()
            ))),
        }
    }

    /// `BOOL`: parse text as a boolean literal; numbers are never boolean
    pub fn to_boolean(&self) -> RedResult<Value> {
        match self {
            Value::Boolean(b) => Ok(Value::Boolean(*b)),
            Value::Text(s) => match s.as_str() {
                "true" => Ok(Value::Boolean(true)),
                "false" => Ok(Value::Boolean(false)),
                _ => Err(RedError::TypeError(format!(
                    "cannot convert string {:?} to bool",
                    s
                ))),
            },
            other => Err(RedError::TypeError(format!(
                "cannot convert {} to bool",
                other.type_name()
            ))),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => write!(f, "{}", s),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    match item {
                        Value::Text(s) => write!(f, "\"{}\"", s)?,
                        other => write!(f, "{}", other)?,
                    }
                }
                write!(f, "]")
            }
        }
    }
}

/// Strip one pair of matching `"` or `'` quotes.
pub fn unquote(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    if bytes.len() < 2 {
        return None;
    }
    let first = bytes[0];
    if (first == b'"' || first == b'\'') && bytes[bytes.len() - 1] == first {
        Some(&text[1..text.len() - 1])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literals() {
        assert_eq!(Value::parse_literal("42"), Some(Value::Number(42.0)));
        assert_eq!(Value::parse_literal("-1.5"), Some(Value::Number(-1.5)));
        assert_eq!(Value::parse_literal("\"hi\""), Some(Value::Text("hi".into())));
        assert_eq!(Value::parse_literal("'hi'"), Some(Value::Text("hi".into())));
        assert_eq!(Value::parse_literal("true"), Some(Value::Boolean(true)));
        assert_eq!(Value::parse_literal("\"mixed'"), None);
        assert_eq!(Value::parse_literal("\""), None);
        assert_eq!(Value::parse_literal("name"), None);
    }

    #[test]
    fn number_text_uses_shortest_form() {
        assert_eq!(Value::Number(3.0).to_text(), Value::Text("3".into()));
        assert_eq!(Value::Number(0.25).to_text(), Value::Text("0.25".into()));
        assert_eq!(Value::Boolean(false).to_text(), Value::Text("false".into()));
    }

    #[test]
    fn conversions_reject_cross_kind() {
        assert!(matches!(
            Value::Boolean(true).to_number(),
            Err(RedError::TypeError(_))
        ));
        assert!(matches!(
            Value::Number(1.0).to_boolean(),
            Err(RedError::TypeError(_))
        ));
        assert!(matches!(
            Value::Text("abc".into()).to_number(),
            Err(RedError::TypeError(_))
        ));
        assert_eq!(
            Value::Text("2.5".into()).to_number().unwrap(),
            Value::Number(2.5)
        );
        assert_eq!(
            Value::Text("true".into()).to_boolean().unwrap(),
            Value::Boolean(true)
        );
    }

    #[test]
    fn array_display() {
        let v = Value::Array(vec![
            Value::Number(1.0),
            Value::Text("a".into()),
            Value::Array(vec![Value::Boolean(true)]),
        ]);
        assert_eq!(v.to_string(), "[1, \"a\", [true]]");
    }
}
