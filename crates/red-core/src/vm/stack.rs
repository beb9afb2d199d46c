//! Operand stack
//!
//! Each execution context pushes to one of these: the program has its own,
//! and every `MODRUN` gets a fresh one that is dropped when the run ends.
//! Capacity comes from `RedConfig::max_stack_size`.

use crate::error::{RedError, RedResult};
use super::value::Value;

/// Bounded LIFO of values, bottom first
#[derive(Debug, Clone)]
pub struct Stack {
    values: Vec<Value>,
    max_size: usize,
}

impl Stack {
    /// Empty stack holding at most `max_size` values
    pub fn new(max_size: usize) -> Self {
        Stack {
            values: Vec::new(),
            max_size,
        }
    }

    /// `StackOverflow` once `max_size` values are held
    pub fn push(&mut self, value: Value) -> RedResult<()> {
        if self.values.len() >= self.max_size {
            return Err(RedError::StackOverflow);
        }
        self.values.push(value);
        Ok(())
    }

    pub fn pop(&mut self) -> RedResult<Value> {
        self.values.pop().ok_or(RedError::StackUnderflow)
    }

    /// Pop the top value and the one beneath it, in that order.
    /// Nothing is removed when fewer than two values are held.
    pub fn pop_pair(&mut self) -> RedResult<(Value, Value)> {
        if self.values.len() < 2 {
            return Err(RedError::StackUnderflow);
        }
        let top = self.pop()?;
        let below = self.pop()?;
        Ok((top, below))
    }

    /// `MAKEARRAY`: take every value, bottom first
    pub fn drain(&mut self) -> Vec<Value> {
        std::mem::take(&mut self.values)
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn size(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `CLEAR`
    pub fn clear(&mut self) {
        self.values.clear();
    }
}
