//! # Register File
//!
//! - **V0..VE**: general-purpose 8-bit registers
//! - **VF**: flag register (carry, NOT-borrow, shifted-out bit, sprite collision).
//!   Programs can read and write it like any other register, but arithmetic
//!   instructions always overwrite it with their flag after storing the result.
//! - **I**: 16-bit index register, used as a memory address
//! - **PC**: 16-bit program counter

use crate::memory::PROGRAM_START;
use crate::ExecutionError;

/// Number of V registers.
pub const NUM_REGISTERS: usize = 16;

/// Index of the flag register VF.
pub const FLAG_REGISTER: usize = 0xF;

/// CPU register file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registers {
    v: [u8; NUM_REGISTERS],
    i: u16,
    pc: u16,
}

impl Registers {
    /// Creates a register file with everything zeroed and PC at the load address.
    pub fn new() -> Self {
        Self {
            v: [0; NUM_REGISTERS],
            i: 0,
            pc: PROGRAM_START,
        }
    }

    /// Returns the value of register `Vindex`.
    pub fn get(&self, index: usize) -> Result<u8, ExecutionError> {
        self.v
            .get(index)
            .copied()
            .ok_or(ExecutionError::InvalidRegister(index))
    }

    /// Sets register `Vindex` to `value`.
    pub fn set(&mut self, index: usize, value: u8) -> Result<(), ExecutionError> {
        let slot = self
            .v
            .get_mut(index)
            .ok_or(ExecutionError::InvalidRegister(index))?;
        *slot = value;
        Ok(())
    }

    /// Returns VF.
    pub fn flag(&self) -> u8 {
        self.v[FLAG_REGISTER]
    }

    /// Sets VF to 1 if `set`, else 0.
    pub fn set_flag(&mut self, set: bool) {
        self.v[FLAG_REGISTER] = set as u8;
    }

    /// Returns all sixteen V registers.
    pub fn v(&self) -> &[u8; NUM_REGISTERS] {
        &self.v
    }

    pub fn v_mut(&mut self) -> &mut [u8; NUM_REGISTERS] {
        &mut self.v
    }

    /// Returns the index register.
    pub fn i(&self) -> u16 {
        self.i
    }

    pub fn set_i(&mut self, value: u16) {
        self.i = value;
    }

    /// Returns the program counter.
    pub fn pc(&self) -> u16 {
        self.pc
    }

    pub fn set_pc(&mut self, value: u16) {
        self.pc = value;
    }

    /// Moves PC past one 2-byte instruction.
    pub(crate) fn skip(&mut self) {
        self.pc = self.pc.wrapping_add(2);
    }
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}
