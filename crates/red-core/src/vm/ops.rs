//! Value operations
//!
//! Arithmetic, comparison, logic, array, text and random-number instructions.
//! Binary operations pop the top value first; the top value is the left-hand
//! operand.

use std::cmp::Ordering;
use std::mem;
use std::time::Duration;

use crate::error::{RedError, RedResult};
use crate::host::Host;
use crate::instruction::line::Instruction;
use crate::instruction::opcode::OpCode;

use super::interpreter::{as_index, Interpreter};
use super::scope::ExecContext;
use super::value::Value;

impl<H: Host> Interpreter<H> {
    /* ===================== Arithmetic ===================== */

    pub(super) fn arithmetic(&mut self, op: OpCode, ctx: &ExecContext) -> RedResult<()> {
        let (top, below) = self.pop_pair(ctx)?;
        let (a, b) = match (&top, &below) {
            (Value::Number(a), Value::Number(b)) => (*a, *b),
            _ => {
                return Err(RedError::TypeError(format!(
                    "{:?} needs two numbers, got {} and {}",
                    op,
                    top.type_name(),
                    below.type_name()
                )))
            }
        };

        let result = match op {
            OpCode::Add => a + b,
            OpCode::Sub => a - b,
            OpCode::Mult => a * b,
            OpCode::Div => {
                if b == 0.0 {
                    return Err(RedError::DivideByZero);
                }
                a / b
            }
            other => return Err(RedError::UnknownOperation(format!("{:?}", other))),
        };

        self.push(ctx, Value::Number(result))
    }

    pub(super) fn concat(&mut self, ctx: &ExecContext) -> RedResult<()> {
        let (top, below) = self.pop_pair(ctx)?;
        if !matches!(top, Value::Text(_)) && !matches!(below, Value::Text(_)) {
            return Err(RedError::TypeError(format!(
                "STRCAT needs a string operand, got {} and {}",
                top.type_name(),
                below.type_name()
            )));
        }
        self.push(ctx, Value::Text(format!("{}{}", top, below)))
    }

    /* ===================== Comparison and logic ===================== */

    pub(super) fn compare(&mut self, op: OpCode, ctx: &ExecContext) -> RedResult<()> {
        let (top, below) = self.pop_pair(ctx)?;
        if mem::discriminant(&top) != mem::discriminant(&below) {
            return Err(RedError::TypeError(format!(
                "cannot compare {} with {}",
                top.type_name(),
                below.type_name()
            )));
        }

        let result = match op {
            OpCode::Eq => top == below,
            OpCode::Neq => top != below,
            _ => {
                let ordering = match (&top, &below) {
                    (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
                    (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
                    _ => {
                        return Err(RedError::TypeError(format!(
                            "cannot order {} values",
                            top.type_name()
                        )))
                    }
                };
                // NaN compares false under every ordering
                match ordering {
                    None => false,
                    Some(ordering) => match op {
                        OpCode::Gt => ordering == Ordering::Greater,
                        OpCode::Gte => ordering != Ordering::Less,
                        OpCode::Lt => ordering == Ordering::Less,
                        OpCode::Lte => ordering != Ordering::Greater,
                        other => {
                            return Err(RedError::UnknownOperation(format!("{:?}", other)))
                        }
                    },
                }
            }
        };

        self.push(ctx, Value::Boolean(result))
    }

    pub(super) fn logic(&mut self, op: OpCode, ctx: &ExecContext) -> RedResult<()> {
        let result = if op == OpCode::Not {
            !expect_bool(&self.pop(ctx)?, op)?
        } else {
            let (top, below) = self.pop_pair(ctx)?;
            let (a, b) = (expect_bool(&top, op)?, expect_bool(&below, op)?);
            if op == OpCode::And {
                a && b
            } else {
                a || b
            }
        };
        self.push(ctx, Value::Boolean(result))
    }

    /* ===================== Arrays and text ===================== */

    pub(super) fn split(&mut self, instr: &Instruction<'_>, ctx: &ExecContext) -> RedResult<()> {
        let sep = instr
            .text_operand(0)
            .ok_or_else(|| RedError::InvalidSyntax("SPLIT expects a separator".to_string()))?;
        let text = match self.pop(ctx)? {
            Value::Text(text) => text,
            other => {
                return Err(RedError::TypeError(format!(
                    "SPLIT needs a string, got {}",
                    other.type_name()
                )))
            }
        };

        let parts = if sep.is_empty() {
            text.chars().map(|c| Value::Text(c.to_string())).collect()
        } else {
            text.split(sep.as_str())
                .map(|part| Value::Text(part.to_string()))
                .collect()
        };
        self.push(ctx, Value::Array(parts))
    }

    pub(super) fn join(&mut self, instr: &Instruction<'_>, ctx: &ExecContext) -> RedResult<()> {
        let sep = instr.text_operand(0).unwrap_or_default();
        let items = self.pop_array(ctx, "JOIN")?;

        let mut parts = Vec::with_capacity(items.len());
        for item in items {
            match item {
                Value::Text(text) => parts.push(text),
                other => {
                    return Err(RedError::TypeError(format!(
                        "JOIN needs string elements, found {}",
                        other.type_name()
                    )))
                }
            }
        }
        self.push(ctx, Value::Text(parts.join(&sep)))
    }

    pub(super) fn append(&mut self, ctx: &ExecContext) -> RedResult<()> {
        let (top, below) = self.pop_pair(ctx)?;
        let mut items = match below {
            Value::Array(items) => items,
            other => {
                return Err(RedError::TypeError(format!(
                    "APPEND needs an array beneath the top value, got {}",
                    other.type_name()
                )))
            }
        };
        match top {
            Value::Array(more) => items.extend(more),
            scalar => items.push(scalar),
        }
        self.push(ctx, Value::Array(items))
    }

    pub(super) fn array_len(&mut self, ctx: &ExecContext) -> RedResult<()> {
        let items = self.pop_array(ctx, "LEN")?;
        self.push(ctx, Value::Number(items.len() as f64))
    }

    pub(super) fn remove(&mut self, ctx: &ExecContext) -> RedResult<()> {
        let (top, below) = self.pop_pair(ctx)?;
        let (index, mut items) = match (top, below) {
            (Value::Number(index), Value::Array(items)) => (index, items),
            (top, below) => {
                return Err(RedError::TypeError(format!(
                    "REMOVE needs an array and a number index, got {} and {}",
                    below.type_name(),
                    top.type_name()
                )))
            }
        };

        let index = as_index(index)?;
        if index >= items.len() {
            return Err(RedError::IndexError(format!(
                "index {} out of bounds for array of length {}",
                index,
                items.len()
            )));
        }
        items.remove(index);
        self.push(ctx, Value::Array(items))
    }

    fn pop_array(&mut self, ctx: &ExecContext, op: &str) -> RedResult<Vec<Value>> {
        match self.pop(ctx)? {
            Value::Array(items) => Ok(items),
            other => Err(RedError::TypeError(format!(
                "{} needs an array, got {}",
                op,
                other.type_name()
            ))),
        }
    }

    /* ===================== Random numbers ===================== */

    pub(super) fn rand_int(&mut self, instr: &Instruction<'_>, ctx: &ExecContext) -> RedResult<()> {
        let min = parse_bound::<i64>(instr.operand(0)?, "RANDINT")?;
        let max = parse_bound::<i64>(instr.operand(1)?, "RANDINT")?;
        if min >= max {
            return Err(RedError::InvalidArgument(format!(
                "RANDINT range {}..{} is empty",
                min, max
            )));
        }
        let n = self.rng.i64(min..max);
        self.push(ctx, Value::Number(n as f64))
    }

    pub(super) fn rand_float(
        &mut self,
        instr: &Instruction<'_>,
        ctx: &ExecContext,
    ) -> RedResult<()> {
        let min = parse_bound::<f64>(instr.operand(0)?, "RANDFLOAT")?;
        let max = parse_bound::<f64>(instr.operand(1)?, "RANDFLOAT")?;
        if !min.is_finite() || !max.is_finite() || min >= max || !(max - min).is_finite() {
            return Err(RedError::InvalidArgument(format!(
                "RANDFLOAT range {}..{} is empty or not finite",
                min, max
            )));
        }
        let n = min + self.rng.f64() * (max - min);
        self.push(ctx, Value::Number(n))
    }

    /* ===================== Host ===================== */

    pub(super) fn delay(&mut self, ctx: &ExecContext) -> RedResult<()> {
        let millis = match self.pop(ctx)? {
            Value::Number(n) => n.max(0.0),
            other => {
                return Err(RedError::TypeError(format!(
                    "DELAYST needs a number of milliseconds, got {}",
                    other.type_name()
                )))
            }
        };
        self.host.sleep(Duration::from_millis(millis as u64));
        Ok(())
    }
}

fn expect_bool(value: &Value, op: OpCode) -> RedResult<bool> {
    match value {
        Value::Boolean(b) => Ok(*b),
        other => Err(RedError::TypeError(format!(
            "{:?} needs bool operands, got {}",
            op,
            other.type_name()
        ))),
    }
}

fn parse_bound<T: std::str::FromStr>(token: &str, op: &str) -> RedResult<T> {
    token
        .parse::<T>()
        .map_err(|_| RedError::InvalidArgument(format!("{} bound {} is not valid", op, token)))
}
