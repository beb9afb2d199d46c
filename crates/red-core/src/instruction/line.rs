//! Instruction Line Representation
//!
//! Splits one source line into an opcode token and its operands.
//! This layer contains no execution semantics.

use crate::error::{RedError, RedResult};
use crate::vm::value::unquote;

/// One tokenized instruction line
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction<'a> {
    pub op: &'a str,
    /// Positional operands; runs of spaces never produce empty operands
    pub operands: Vec<&'a str>,
    /// Text after the opcode with its inner spacing intact
    rest: &'a str,
}

impl<'a> Instruction<'a> {
    /// Tokenize a line; blank lines yield `None`
    pub fn parse(line: &'a str) -> Option<Self> {
        let line = normalize(line);
        let (op, rest) = line.split_once(' ').unwrap_or((line, ""));
        let op = op.trim();
        if op.is_empty() {
            return None;
        }
        let rest = rest.trim_matches(' ');
        Some(Instruction {
            op,
            operands: rest
                .split(' ')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .collect(),
            rest,
        })
    }

    /// Operand at `index`, or an `InvalidSyntax` error naming the opcode
    pub fn operand(&self, index: usize) -> RedResult<&'a str> {
        self.operands.get(index).copied().ok_or_else(|| {
            RedError::InvalidSyntax(format!(
                "{} expects at least {} operand(s)",
                self.op,
                index + 1
            ))
        })
    }

    /// Operand text from operand `from` onward. From the first operand the
    /// source spacing is kept; later starts rejoin tokens with single spaces.
    pub fn joined(&self, from: usize) -> String {
        if from == 0 {
            return self.rest.to_string();
        }
        self.operands.get(from..).map(|rest| rest.join(" ")).unwrap_or_default()
    }

    /// Operand text with one level of matching quotes removed
    pub fn text_operand(&self, from: usize) -> Option<String> {
        if from >= self.operands.len() {
            return None;
        }
        let joined = self.joined(from);
        Some(unquote(&joined).map(str::to_string).unwrap_or(joined))
    }

    /// Quoted leading operand (spaces allowed inside) and the text after it;
    /// `None` when the first operand is not quoted.
    pub fn path_and_rest(&self) -> Option<(&'a str, &'a str)> {
        let rest = self.rest;
        let quote = rest.chars().next().filter(|c| *c == '"' || *c == '\'')?;
        let close = rest[1..].find(quote)? + 1;
        Some((&rest[1..close], rest[close + 1..].trim_matches(' ')))
    }
}

/// Strip leading indentation and a trailing carriage return
pub fn normalize(line: &str) -> &str {
    line.trim_end_matches(['\r', '\n'])
        .trim_start_matches([' ', '\t'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizes_indented_line() {
        let instr = Instruction::parse("\t    LOAD  items 2\r").unwrap();
        assert_eq!(instr.op, "LOAD");
        assert_eq!(instr.operands, vec!["items", "2"]);
    }

    #[test]
    fn blank_lines() {
        assert!(Instruction::parse("").is_none());
        assert!(Instruction::parse("   \t").is_none());
    }

    #[test]
    fn quoted_text_rejoins() {
        let instr = Instruction::parse("PUSH \"hello big world\"").unwrap();
        assert_eq!(instr.joined(0), "\"hello big world\"");
        assert_eq!(instr.text_operand(0).as_deref(), Some("hello big world"));
        assert_eq!(instr.text_operand(1), None);
    }

    #[test]
    fn quoted_text_keeps_inner_spacing() {
        let instr = Instruction::parse("    PUSH \"a  b\"").unwrap();
        assert_eq!(instr.operands, vec!["\"a", "b\""]);
        assert_eq!(instr.text_operand(0).as_deref(), Some("a  b"));

        let instr = Instruction::parse("SPLIT \"  \"").unwrap();
        assert_eq!(instr.text_operand(0).as_deref(), Some("  "));
    }

    #[test]
    fn quoted_path_with_spaces() {
        let instr = Instruction::parse("IMPORT \"my  mods/m.kr\" counter").unwrap();
        assert_eq!(instr.path_and_rest(), Some(("my  mods/m.kr", "counter")));
        assert_eq!(Instruction::parse("IMPORT m.kr c").unwrap().path_and_rest(), None);
    }

    #[test]
    fn missing_operand_is_syntax_error() {
        let instr = Instruction::parse("STORE").unwrap();
        assert!(matches!(instr.operand(0), Err(RedError::InvalidSyntax(_))));
    }
}
