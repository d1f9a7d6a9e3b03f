//! # Error Types
//!
//! Two families of errors exist:
//!
//! - [`LoadError`]: the program image could not be placed in memory. Reported
//!   once, at startup, before any instruction runs.
//! - [`ExecutionError`]: an integrity violation raised while executing an
//!   instruction. [`CPU::step`](crate::CPU::step) wraps it in a [`CpuFault`]
//!   together with the PC and opcode that caused it, and the CPU halts.
//!
//! None of these are retried. The only recoverable condition in the machine,
//! waiting on `FX0A` for a key, is a stall and not an error.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading a program into memory.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The program file could not be read.
    #[error("unable to read program file {}", path.display())]
    Io {
        /// Path that was being read
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// The program does not fit between the load address and the end of memory.
    #[error("program is {size} bytes, but only {max} bytes fit in the program region")]
    TooLarge {
        /// Size of the rejected program
        size: usize,
        /// Capacity of the program region
        max: usize,
    },
}

/// Integrity errors that can occur while executing an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ExecutionError {
    /// A call was made with all 16 stack slots in use.
    #[error("call stack overflow")]
    StackOverflow,

    /// A return was made with an empty call stack.
    #[error("call stack underflow")]
    StackUnderflow,

    /// Memory access outside the 4 KiB address space.
    #[error("memory access out of bounds at 0x{addr:04X}")]
    OutOfBounds {
        /// Offending address
        addr: usize,
    },

    /// Write into the built-in glyph table.
    #[error("write to read-only glyph table at 0x{addr:04X}")]
    ReadOnlyAddress {
        /// Offending address
        addr: usize,
    },

    /// Register index outside V0..VF.
    #[error("register index {0} is out of range")]
    InvalidRegister(usize),

    /// A register named a key outside the 16-key pad.
    #[error("key index 0x{0:02X} is out of range")]
    InvalidKey(u8),

    /// The opcode does not decode to any instruction.
    #[error("unknown opcode 0x{0:04X}")]
    UnknownOpcode(u16),
}

/// A fatal fault: the error together with where it happened.
///
/// Returned by [`CPU::step`](crate::CPU::step). Once a fault has been raised
/// the CPU stays halted and returns the same fault until it is reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{error} (opcode 0x{opcode:04X} at PC 0x{pc:03X})")]
pub struct CpuFault {
    /// Address the faulting instruction was fetched from
    pub pc: u16,
    /// Raw opcode, or 0 if the fetch itself failed
    pub opcode: u16,
    /// What went wrong
    #[source]
    pub error: ExecutionError,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fault_message_names_opcode_and_pc() {
        let fault = CpuFault {
            pc: 0x202,
            opcode: 0x00EE,
            error: ExecutionError::StackUnderflow,
        };

        assert_eq!(
            fault.to_string(),
            "call stack underflow (opcode 0x00EE at PC 0x202)"
        );
    }

    #[test]
    fn test_too_large_message() {
        let err = LoadError::TooLarge {
            size: 4000,
            max: 3584,
        };
        assert_eq!(
            err.to_string(),
            "program is 4000 bytes, but only 3584 bytes fit in the program region"
        );
    }
}
