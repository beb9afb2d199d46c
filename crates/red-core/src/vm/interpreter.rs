//! Interpreter Core
//!
//! The `Interpreter` owns all state of one program run: operand stacks,
//! global symbols and functions, imported modules and loaded keyword
//! extensions. A single block executor runs top-level programs, function
//! bodies, module functions and keyword templates; the `ExecContext` passed
//! along selects the symbol scope, stack and argument table.

use tracing::{debug, trace, warn};

use crate::config::RedConfig;
use crate::error::{RedError, RedResult};
use crate::host::Host;
use crate::instruction::line::{normalize, Instruction};
use crate::instruction::opcode::OpCode;
use crate::keyword::{bind_arguments, KeywordExtension, KeywordRegistry};
use crate::loader::{ModuleLoader, ModuleRegistry};
use crate::vm::value::unquote;

use super::function::{Function, FunctionTable, PendingFunction};
use super::scope::{ExecContext, ScopeTarget, SymbolTable};
use super::stack::Stack;
use super::value::Value;

/// Line state local to one executing block
#[derive(Debug, Default)]
struct BlockState {
    in_comment: bool,
    pending: Option<PendingFunction>,
}

/// RED interpreter
#[derive(Debug)]
pub struct Interpreter<H: Host> {
    pub(super) config: RedConfig,
    pub(super) host: H,

    /// Index 0 is the program stack; module runs push their own
    pub(super) stacks: Vec<Stack>,

    pub(super) globals: SymbolTable,
    pub(super) functions: FunctionTable,
    pub(super) modules: ModuleRegistry,
    pub(super) keywords: KeywordRegistry,

    pub(super) rng: fastrand::Rng,
    depth: usize,
    pub(super) halted: bool,
}

impl<H: Host> Interpreter<H> {
    /// Create a new interpreter instance
    pub fn new(config: RedConfig, host: H) -> Self {
        let rng = match config.random_seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        Interpreter {
            stacks: vec![Stack::new(config.max_stack_size)],
            globals: SymbolTable::new(),
            functions: FunctionTable::new(),
            modules: ModuleRegistry::new(),
            keywords: KeywordRegistry::new(),
            rng,
            depth: 0,
            halted: false,
            host,
            config,
        }
    }

    /// Register a keyword extension, replacing one with the same prefix
    pub fn register_keywords(&mut self, ext: KeywordExtension) {
        debug!(prefix = ext.prefix(), cases = ext.len(), "registered keyword extension");
        self.keywords.register(ext);
    }

    /// Run program source until it ends or executes `EXIT`
    pub fn run_source(&mut self, source: &str) -> RedResult<()> {
        let lines: Vec<&str> = source.lines().collect();
        let mut ctx = ExecContext::top_level();
        self.execute_block(&lines, &mut ctx)
    }

    pub fn config(&self) -> &RedConfig {
        &self.config
    }

    /// The program operand stack
    pub fn stack(&self) -> &Stack {
        &self.stacks[0]
    }

    pub fn globals(&self) -> &SymbolTable {
        &self.globals
    }

    pub fn functions(&self) -> &FunctionTable {
        &self.functions
    }

    pub fn modules(&self) -> &ModuleRegistry {
        &self.modules
    }

    pub fn keywords(&self) -> &KeywordRegistry {
        &self.keywords
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    /// True once `EXIT` has run
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /* ===================== Block execution ===================== */

    /// Execute lines in order; shared by every execution context
    pub(super) fn execute_block<S: AsRef<str>>(
        &mut self,
        lines: &[S],
        ctx: &mut ExecContext,
    ) -> RedResult<()> {
        let mut state = BlockState::default();
        for line in lines {
            if self.halted {
                return Ok(());
            }
            self.execute_line(line.as_ref(), ctx, &mut state)?;
        }
        match state.pending {
            Some(func) => Err(RedError::InvalidSyntax(format!(
                "FUNC {} is missing ENDFUNC",
                func.name()
            ))),
            None => Ok(()),
        }
    }

    fn execute_line(
        &mut self,
        line: &str,
        ctx: &mut ExecContext,
        state: &mut BlockState,
    ) -> RedResult<()> {
        let Some(instr) = Instruction::parse(line) else {
            return Ok(());
        };
        let opcode = OpCode::from_mnemonic(instr.op);

        if state.in_comment {
            if opcode == Some(OpCode::CommentEnd) {
                state.in_comment = false;
            }
            return Ok(());
        }

        if state.pending.is_some() {
            if opcode == Some(OpCode::EndFunc) {
                if let Some(pending) = state.pending.take() {
                    self.define_function(pending.finish(), ctx)?;
                }
            } else if let Some(pending) = state.pending.as_mut() {
                pending.push_line(normalize(line));
            }
            return Ok(());
        }

        match opcode {
            Some(OpCode::Func) => {
                let name = instr.operand(0)?;
                state.pending = Some(PendingFunction::open(name, &instr.operands[1..]));
                Ok(())
            }
            Some(OpCode::EndFunc) => Err(RedError::InvalidSyntax(
                "ENDFUNC without matching FUNC".to_string(),
            )),
            Some(OpCode::CommentStart) => {
                state.in_comment = true;
                Ok(())
            }
            _ => self.dispatch_synced(&instr, opcode, ctx),
        }
    }

    /// Dispatch with module export syncing around the instruction
    fn dispatch_synced(
        &mut self,
        instr: &Instruction<'_>,
        opcode: Option<OpCode>,
        ctx: &mut ExecContext,
    ) -> RedResult<()> {
        if let Some(module) = ctx.module() {
            self.modules.get_mut(module)?.sync_in();
        }
        self.dispatch(instr, opcode, ctx)?;
        if let Some(module) = ctx.module() {
            self.modules.get_mut(module)?.sync_out();
        }
        Ok(())
    }

    fn define_function(&mut self, function: Function, ctx: &ExecContext) -> RedResult<()> {
        debug!(function = %function.name, lines = function.body.len(), "defined function");
        match ctx.module() {
            Some(module) => self.modules.get_mut(module)?.functions.define(function),
            None => self.functions.define(function),
        }
        Ok(())
    }

    /* ===================== Dispatch ===================== */

    /// Execute one instruction. Built-in opcodes first, then keyword extensions.
    fn dispatch(
        &mut self,
        instr: &Instruction<'_>,
        opcode: Option<OpCode>,
        ctx: &mut ExecContext,
    ) -> RedResult<()> {
        trace!(op = instr.op, operands = ?instr.operands, "dispatch");

        let Some(opcode) = opcode else {
            return self.expand_keyword(instr, ctx);
        };

        match opcode {
            OpCode::Push => self.push_literal(instr, ctx),
            OpCode::Clear => {
                self.stack_mut(ctx).clear();
                Ok(())
            }
            OpCode::Print => {
                let value = self.pop(ctx)?;
                self.host.print(&value.to_string())
            }

            OpCode::Store => {
                let name = ctx.resolve_name(instr.operand(0)?)?;
                let value = self.pop(ctx)?;
                self.symbols_mut(ctx)?.store(name, value);
                Ok(())
            }
            OpCode::Load => self.load(instr, ctx),
            OpCode::LoadArg => {
                let value = ctx.load_arg(instr.operand(0)?)?;
                self.push(ctx, value)
            }

            OpCode::Add | OpCode::Sub | OpCode::Mult | OpCode::Div => {
                self.arithmetic(opcode, ctx)
            }

            OpCode::Str => {
                let value = self.pop(ctx)?;
                self.push(ctx, value.to_text())
            }
            OpCode::Float => {
                let value = self.pop(ctx)?.to_number()?;
                self.push(ctx, value)
            }
            OpCode::Bool => {
                let value = self.pop(ctx)?.to_boolean()?;
                self.push(ctx, value)
            }
            OpCode::StrCat => self.concat(ctx),

            OpCode::Eq
            | OpCode::Neq
            | OpCode::Gt
            | OpCode::Gte
            | OpCode::Lt
            | OpCode::Lte => self.compare(opcode, ctx),

            OpCode::Not | OpCode::And | OpCode::Or => self.logic(opcode, ctx),

            OpCode::MakeArray => {
                let items = self.stack_mut(ctx).drain();
                self.push(ctx, Value::Array(items))
            }
            OpCode::Split => self.split(instr, ctx),
            OpCode::Join => self.join(instr, ctx),
            OpCode::Append => self.append(ctx),
            OpCode::Len => self.array_len(ctx),
            OpCode::Remove => self.remove(ctx),

            OpCode::RandInt => self.rand_int(instr, ctx),
            OpCode::RandFloat => self.rand_float(instr, ctx),

            OpCode::Run => self.run_function(instr, ctx),
            OpCode::ModRun => self.run_module_function(instr),

            OpCode::Import => self.import(instr, ctx),
            OpCode::ModStore => {
                let module = instr.operand(0)?;
                let name = instr.operand(1)?;
                self.modules.get(module)?;
                let value = self.pop(ctx)?;
                self.modules.get_mut(module)?.exports.store(name, value);
                Ok(())
            }
            OpCode::ModGet => {
                let module = instr.operand(0)?;
                let name = instr.operand(1)?;
                let value = self
                    .modules
                    .get(module)?
                    .export(name)
                    .cloned()
                    .ok_or_else(|| RedError::UnboundSymbol(format!("{}.{}", module, name)))?;
                self.push(ctx, value)
            }

            OpCode::KeyPort => {
                // one path; a quoted path may contain spaces
                let joined = instr.joined(0);
                if instr.operands.len() > 1 && unquote(&joined).is_none() {
                    return Err(RedError::InvalidSyntax(format!(
                        "KEYPORT takes one path, got {}",
                        joined
                    )));
                }
                let path = instr.text_operand(0).ok_or_else(|| {
                    RedError::InvalidSyntax("KEYPORT expects a keyword file path".to_string())
                })?;
                let ext = self.host.load_keywords(&path)?;
                self.register_keywords(ext);
                Ok(())
            }

            OpCode::DelaySt => self.delay(ctx),
            OpCode::Exit => {
                debug!("EXIT");
                self.halted = true;
                Ok(())
            }

            // Block structure is consumed by execute_line; a stray ENDCOMM is a no-op
            OpCode::Comment
            | OpCode::CommentStart
            | OpCode::CommentEnd
            | OpCode::Func
            | OpCode::EndFunc => Ok(()),
        }
    }

    /* ===================== Stack and scope access ===================== */

    pub(super) fn stack_mut(&mut self, ctx: &ExecContext) -> &mut Stack {
        &mut self.stacks[ctx.stack]
    }

    pub(super) fn push(&mut self, ctx: &ExecContext, value: Value) -> RedResult<()> {
        self.stack_mut(ctx).push(value)
    }

    pub(super) fn pop(&mut self, ctx: &ExecContext) -> RedResult<Value> {
        self.stack_mut(ctx).pop()
    }

    pub(super) fn pop_pair(&mut self, ctx: &ExecContext) -> RedResult<(Value, Value)> {
        self.stack_mut(ctx).pop_pair()
    }

    /// Symbol table addressed by plain STORE/LOAD in `ctx`
    pub(super) fn symbols(&self, ctx: &ExecContext) -> RedResult<&SymbolTable> {
        match &ctx.target {
            ScopeTarget::Global => Ok(&self.globals),
            ScopeTarget::Module(name) => Ok(&self.modules.get(name)?.symbols),
        }
    }

    pub(super) fn symbols_mut(&mut self, ctx: &ExecContext) -> RedResult<&mut SymbolTable> {
        match &ctx.target {
            ScopeTarget::Global => Ok(&mut self.globals),
            ScopeTarget::Module(name) => Ok(&mut self.modules.get_mut(name)?.symbols),
        }
    }

    /// Run `f` one call level deeper, enforcing the depth limit
    pub(super) fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> RedResult<T>,
    ) -> RedResult<T> {
        if self.depth >= self.config.max_call_depth {
            return Err(RedError::CallDepthExceeded(self.config.max_call_depth));
        }
        self.depth += 1;
        let result = with_stack(|| f(self));
        self.depth -= 1;
        result
    }

    /* ===================== Symbols ===================== */

    fn push_literal(&mut self, instr: &Instruction<'_>, ctx: &ExecContext) -> RedResult<()> {
        let first = instr.operand(0)?;
        let joined = instr.joined(0);

        let value = if let Ok(n) = first.parse::<f64>() {
            Some(Value::Number(n))
        } else if let Some(inner) = unquote(&joined) {
            Some(Value::Text(inner.to_string()))
        } else {
            match first {
                "true" => Some(Value::Boolean(true)),
                "false" => Some(Value::Boolean(false)),
                _ => None,
            }
        };

        match value {
            Some(value) => self.push(ctx, value),
            None if self.config.strict_push => Err(RedError::InvalidSyntax(format!(
                "unrecognized literal: {}",
                joined
            ))),
            None => {
                warn!(literal = %joined, "PUSH literal not recognized; nothing pushed");
                Ok(())
            }
        }
    }

    fn load(&mut self, instr: &Instruction<'_>, ctx: &ExecContext) -> RedResult<()> {
        let name = ctx.resolve_name(instr.operand(0)?)?;
        let mut value = self.symbols(ctx)?.load(&name)?;

        if let Some(index_operand) = instr.operands.get(1) {
            let items = match value {
                Value::Array(items) => items,
                other => {
                    return Err(RedError::IndexError(format!(
                        "cannot index {} ({})",
                        name,
                        other.type_name()
                    )))
                }
            };
            let index = self.resolve_index(index_operand, ctx)?;
            value = items.get(index).cloned().ok_or_else(|| {
                RedError::IndexError(format!(
                    "index {} out of bounds for {} of length {}",
                    index,
                    name,
                    items.len()
                ))
            })?;
        }

        self.push(ctx, value)
    }

    /// An index operand is a number literal or the name of a number symbol
    fn resolve_index(&self, operand: &str, ctx: &ExecContext) -> RedResult<usize> {
        let n = match operand.parse::<f64>() {
            Ok(n) => n,
            Err(_) => {
                let name = ctx.resolve_name(operand)?;
                match self.symbols(ctx)?.load(&name)? {
                    Value::Number(n) => n,
                    other => {
                        return Err(RedError::TypeError(format!(
                            "index of array must be number, {} holds {}",
                            name,
                            other.type_name()
                        )))
                    }
                }
            }
        };
        as_index(n)
    }

    /* ===================== Modules and keywords ===================== */

    fn import(&mut self, instr: &Instruction<'_>, ctx: &ExecContext) -> RedResult<()> {
        let (path, name) = match instr.path_and_rest() {
            Some((path, rest)) => {
                let name = rest.split(' ').next().filter(|t| !t.is_empty()).ok_or_else(|| {
                    RedError::InvalidSyntax("IMPORT expects a module name".to_string())
                })?;
                (path, name)
            }
            None => (instr.operand(0)?, instr.operand(1)?),
        };

        let source = self.host.read_module(path)?;
        let module = ModuleLoader::parse(&source, self.stacks[ctx.stack].values())?;
        debug!(
            module = name,
            path,
            functions = module.functions.len(),
            exports = module.exports.len(),
            "imported module"
        );
        self.modules.link(name, module);
        Ok(())
    }

    /// Route an unrecognized opcode to the matching keyword case
    fn expand_keyword(&mut self, instr: &Instruction<'_>, ctx: &ExecContext) -> RedResult<()> {
        let unknown = || RedError::UnknownOperation(instr.op.to_string());
        let case = instr.operands.first().ok_or_else(unknown)?;
        let template = self
            .keywords
            .lookup(instr.op, case)
            .ok_or_else(unknown)?
            .to_vec();
        let args = bind_arguments(&instr.operands[1..])?;

        debug!(prefix = instr.op, case = %case, args = args.len(), "expanding keyword");
        let mut expansion = ctx.for_expansion(args);
        self.nested(|this| this.execute_block(&template, &mut expansion))
    }
}

/// Keep this much native stack free before entering a nested block
const RED_ZONE: usize = 128 * 1024;

/// Native stack added each time the red zone is reached
const STACK_GROWTH: usize = 1024 * 1024;

/// Run `f`, first growing the native stack when it is nearly exhausted
#[cfg(not(target_arch = "wasm32"))]
fn with_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_GROWTH, f)
}

#[cfg(target_arch = "wasm32")]
fn with_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

/// Convert a numeric index, rejecting negative and fractional values
pub(super) fn as_index(n: f64) -> RedResult<usize> {
    if n < 0.0 || n.fract() != 0.0 || !n.is_finite() {
        return Err(RedError::IndexError(format!("invalid index {}", n)));
    }
    Ok(n as usize)
}
