//! Module Loader
//!
//! Builds a `Module` from imported source text.
//! A module file may contain only function blocks, `EXPORT`, `EXARR`, `SET`
//! and comments at its top level; anything else is rejected.

use crate::error::{RedError, RedResult};
use crate::instruction::line::{normalize, Instruction};
use crate::instruction::opcode::OpCode;
use crate::vm::function::PendingFunction;
use crate::vm::value::Value;

use super::module::Module;

/// Module source loader
pub struct ModuleLoader;

impl ModuleLoader {
    /// Parse module source. `importer_stack` is the importing context's
    /// operand stack, snapshotted by `EXARR`.
    pub fn parse(source: &str, importer_stack: &[Value]) -> RedResult<Module> {
        let mut module = Module::new();
        let mut pending: Option<PendingFunction> = None;
        let mut in_comment = false;

        for (index, raw) in source.lines().enumerate() {
            let Some(instr) = Instruction::parse(raw) else {
                continue;
            };

            if in_comment {
                if OpCode::from_mnemonic(instr.op) == Some(OpCode::CommentEnd) {
                    in_comment = false;
                }
                continue;
            }

            if pending.is_some() {
                if instr.op == "ENDFUNC" {
                    if let Some(done) = pending.take() {
                        module.functions.define(done.finish());
                    }
                } else if let Some(func) = pending.as_mut() {
                    func.push_line(normalize(raw));
                }
                continue;
            }

            match instr.op {
                "FUNC" => {
                    let name = instr.operand(0)?;
                    pending = Some(PendingFunction::open(name, &instr.operands[1..]));
                }
                "EXPORT" => {
                    let name = instr.operand(0)?;
                    let literal = instr.operand(1)?;
                    let n = literal.parse::<f64>().map_err(|_| {
                        RedError::InvalidSyntax(format!(
                            "EXPORT {} needs a numeric initial value, got {}",
                            name, literal
                        ))
                    })?;
                    module.exports.store(name, Value::Number(n));
                }
                "EXARR" => {
                    let name = instr.operand(0)?;
                    module
                        .exports
                        .store(name, Value::Array(importer_stack.to_vec()));
                }
                "SET" => {
                    let name = instr.operand(0)?;
                    let value = match instr.operand(1)? {
                        "true" => true,
                        "false" => false,
                        other => {
                            return Err(RedError::InvalidSyntax(format!(
                                "SET is used for boolean values only, got {}",
                                other
                            )))
                        }
                    };
                    module.symbols.store(name, Value::Boolean(value));
                }
                op => match OpCode::from_mnemonic(op) {
                    Some(OpCode::Comment) => {}
                    Some(OpCode::CommentStart) => in_comment = true,
                    _ => {
                        return Err(RedError::InvalidSyntax(format!(
                            "line {}: `{}` is not allowed at module top level",
                            index + 1,
                            op
                        )))
                    }
                },
            }
        }

        if let Some(func) = pending {
            return Err(RedError::InvalidSyntax(format!(
                "FUNC {} is missing ENDFUNC",
                func.name()
            )));
        }

        Ok(module)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const COUNTER: &str = "\
// counter module
EXPORT counter 0
SET running true
FUNC incr
    MODGET self counter
    LOAD counter
    PUSH 1
    ADD
    STORE counter
ENDFUNC
";

    #[test]
    fn parses_functions_exports_and_flags() {
        let module = ModuleLoader::parse(COUNTER, &[]).unwrap();
        assert_eq!(module.export("counter"), Some(&Value::Number(0.0)));
        assert_eq!(module.symbols.load("running").unwrap(), Value::Boolean(true));

        let incr = module.functions.get("incr").unwrap();
        assert_eq!(incr.body.len(), 5);
        assert_eq!(incr.body[1], "LOAD counter");
    }

    #[test]
    fn exarr_snapshots_importer_stack() {
        let stack = vec![Value::Number(1.0), Value::Text("a".into())];
        let module = ModuleLoader::parse("EXARR items", &stack).unwrap();
        assert_eq!(module.export("items"), Some(&Value::Array(stack)));
    }

    #[test]
    fn block_comments_are_skipped() {
        let src = "MCOMM\nnot a statement\nENDCOMM\n/*\nPRINT\n*/\nEXPORT x 2";
        let module = ModuleLoader::parse(src, &[]).unwrap();
        assert_eq!(module.export("x"), Some(&Value::Number(2.0)));
    }

    #[test]
    fn rejects_non_boolean_set() {
        let err = ModuleLoader::parse("SET flag 1", &[]).unwrap_err();
        assert!(matches!(err, RedError::InvalidSyntax(_)));
    }

    #[test]
    fn rejects_non_numeric_export() {
        let err = ModuleLoader::parse("EXPORT x \"a\"", &[]).unwrap_err();
        assert!(matches!(err, RedError::InvalidSyntax(_)));
    }

    #[test]
    fn rejects_statements_at_top_level() {
        let err = ModuleLoader::parse("PUSH 1", &[]).unwrap_err();
        assert!(matches!(err, RedError::InvalidSyntax(_)));
    }

    #[test]
    fn rejects_unterminated_function() {
        let err = ModuleLoader::parse("FUNC f\nPUSH 1", &[]).unwrap_err();
        assert!(matches!(err, RedError::InvalidSyntax(_)));
    }
}
