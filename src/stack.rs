//! # Call Stack
//!
//! A fixed array of 16 return addresses and a stack pointer. `2NNN` pushes the
//! address of the instruction after the call, `00EE` pops it. The stack lives
//! outside addressable memory, so a program cannot corrupt it directly; it can
//! only overflow or underflow it.

use crate::ExecutionError;

/// Maximum nesting depth of subroutine calls.
pub const STACK_CAPACITY: usize = 16;

/// Return-address stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallStack {
    entries: [u16; STACK_CAPACITY],
    sp: usize,
}

impl CallStack {
    pub fn new() -> Self {
        Self {
            entries: [0; STACK_CAPACITY],
            sp: 0,
        }
    }

    /// Pushes a return address.
    ///
    /// Fails with [`ExecutionError::StackOverflow`] when all slots are in use.
    pub fn push(&mut self, address: u16) -> Result<(), ExecutionError> {
        if self.sp >= STACK_CAPACITY {
            return Err(ExecutionError::StackOverflow);
        }
        self.entries[self.sp] = address;
        self.sp += 1;
        Ok(())
    }

    /// Pops the most recent return address.
    ///
    /// Fails with [`ExecutionError::StackUnderflow`] when the stack is empty.
    pub fn pop(&mut self) -> Result<u16, ExecutionError> {
        if self.sp == 0 {
            return Err(ExecutionError::StackUnderflow);
        }
        self.sp -= 1;
        Ok(self.entries[self.sp])
    }

    /// Number of addresses currently on the stack.
    pub fn depth(&self) -> usize {
        self.sp
    }

    pub fn is_empty(&self) -> bool {
        self.sp == 0
    }
}

impl Default for CallStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop_is_lifo() {
        let mut stack = CallStack::new();
        stack.push(0x202).unwrap();
        stack.push(0x30A).unwrap();

        assert_eq!(stack.depth(), 2);
        assert_eq!(stack.pop().unwrap(), 0x30A);
        assert_eq!(stack.pop().unwrap(), 0x202);
        assert!(stack.is_empty());
    }

    #[test]
    fn test_sixteen_pushes_fit_seventeenth_overflows() {
        let mut stack = CallStack::new();
        for n in 0..STACK_CAPACITY {
            stack.push(0x200 + 2 * n as u16).unwrap();
        }
        assert_eq!(stack.depth(), STACK_CAPACITY);

        assert_eq!(stack.push(0x400), Err(ExecutionError::StackOverflow));
        // Failed push leaves the stack intact
        assert_eq!(stack.depth(), STACK_CAPACITY);
        assert_eq!(stack.pop().unwrap(), 0x21E);
    }

    #[test]
    fn test_pop_empty_underflows() {
        let mut stack = CallStack::new();
        assert_eq!(stack.pop(), Err(ExecutionError::StackUnderflow));

        stack.push(0x222).unwrap();
        stack.pop().unwrap();
        assert_eq!(stack.pop(), Err(ExecutionError::StackUnderflow));
    }
}
