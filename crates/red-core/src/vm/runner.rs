//! Function / Loop Runner
//!
//! `RUN` executes a function body once, or repeatedly while a Boolean
//! condition symbol reads true at the top of each pass. `MODRUN` does the
//! same in a module's scope on a stack of its own.

use tracing::debug;

use crate::error::{RedError, RedResult};
use crate::host::Host;
use crate::instruction::line::Instruction;

use super::function::Function;
use super::interpreter::Interpreter;
use super::scope::ExecContext;
use super::stack::Stack;
use super::value::Value;

impl<H: Host> Interpreter<H> {
    /// `RUN <name> [condition [args...]]`
    pub(super) fn run_function(
        &mut self,
        instr: &Instruction<'_>,
        ctx: &ExecContext,
    ) -> RedResult<()> {
        let name = instr.operand(0)?;
        let function = self.resolve_function(name, ctx)?.clone();
        let condition = instr.operands.get(1).copied();
        if let Some(args) = instr.operands.get(2..).filter(|args| !args.is_empty()) {
            debug!(function = name, ?args, "RUN arguments are reserved and not bound");
        }

        let mut body = ctx.for_function();
        self.nested(|this| this.run_body(&function, condition, &mut body))
    }

    /// `MODRUN <module> <name> [condition]`
    pub(super) fn run_module_function(&mut self, instr: &Instruction<'_>) -> RedResult<()> {
        let module = instr.operand(0)?;
        let name = instr.operand(1)?;
        let function = self
            .modules
            .get(module)?
            .functions
            .get(name)
            .cloned()
            .ok_or_else(|| RedError::UnknownFunction(format!("{}.{}", module, name)))?;
        let condition = instr.operands.get(2).copied();

        self.stacks.push(Stack::new(self.config.max_stack_size));
        let mut body = ExecContext::for_module(module, self.stacks.len() - 1);
        let result = self.nested(|this| this.run_body(&function, condition, &mut body));
        self.stacks.pop();
        result
    }

    /// Module functions shadow global ones while a module is active
    fn resolve_function(&self, name: &str, ctx: &ExecContext) -> RedResult<&Function> {
        if let Some(module) = ctx.module() {
            if let Some(function) = self.modules.get(module)?.functions.get(name) {
                return Ok(function);
            }
        }
        self.functions
            .get(name)
            .ok_or_else(|| RedError::UnknownFunction(name.to_string()))
    }

    fn run_body(
        &mut self,
        function: &Function,
        condition: Option<&str>,
        ctx: &mut ExecContext,
    ) -> RedResult<()> {
        debug!(function = %function.name, condition = ?condition, "run");

        let Some(condition) = condition else {
            return self.execute_block(&function.body, ctx);
        };

        // No post-test: a condition that starts false skips the body entirely
        while self.read_condition(condition, ctx)? {
            self.execute_block(&function.body, ctx)?;
            if self.halted {
                break;
            }
        }
        Ok(())
    }

    fn read_condition(&mut self, name: &str, ctx: &ExecContext) -> RedResult<bool> {
        if let Some(module) = ctx.module() {
            self.modules.get_mut(module)?.sync_in();
        }
        match self.symbols(ctx)?.load(name)? {
            Value::Boolean(b) => Ok(b),
            other => Err(RedError::TypeError(format!(
                "condition {} must be bool, holds {}",
                name,
                other.type_name()
            ))),
        }
    }
}
