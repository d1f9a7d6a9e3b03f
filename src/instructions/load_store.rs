//! # Load and Store Instructions
//!
//! This module implements transfers between registers, the index register and
//! memory:
//! - LD Vx, byte (6XNN)
//! - LD I, addr (ANNN)
//! - ADD I, Vx (FX1E)
//! - LD F, Vx (FX29): point I at a digit glyph
//! - LD B, Vx (FX33): store decimal digits
//! - LD [I], Vx (FX55) / LD Vx, [I] (FX65): register range dump and load
//!
//! Memory is addressed through I with bounds-checked accesses; writes that
//! would land in the glyph table fault. Multi-byte transfers check the whole
//! range first, so a faulting transfer changes nothing.

use crate::devices::{Display, Keypad};
use crate::memory::GLYPH_SIZE;
use crate::{ExecutionError, CPU};

/// Executes LD Vx, byte (6XNN).
pub(crate) fn execute_ld_imm<D: Display, K: Keypad>(
    cpu: &mut CPU<D, K>,
    x: u8,
    byte: u8,
) -> Result<(), ExecutionError> {
    cpu.set_reg(x, byte)
}

/// Executes LD I, addr (ANNN).
pub(crate) fn execute_ld_i<D: Display, K: Keypad>(
    cpu: &mut CPU<D, K>,
    addr: u16,
) -> Result<(), ExecutionError> {
    cpu.registers.set_i(addr);
    Ok(())
}

/// Executes ADD I, Vx (FX1E).
///
/// I = I + VX with 16-bit wraparound. VF is not affected.
pub(crate) fn execute_add_i<D: Display, K: Keypad>(
    cpu: &mut CPU<D, K>,
    x: u8,
) -> Result<(), ExecutionError> {
    let i = cpu.registers.i().wrapping_add(cpu.reg(x)? as u16);
    cpu.registers.set_i(i);
    Ok(())
}

/// Executes LD F, Vx (FX29).
///
/// Points I at the glyph for the low nibble of VX.
pub(crate) fn execute_ld_glyph<D: Display, K: Keypad>(
    cpu: &mut CPU<D, K>,
    x: u8,
) -> Result<(), ExecutionError> {
    let digit = cpu.reg(x)? & 0x0F;
    cpu.registers.set_i(digit as u16 * GLYPH_SIZE as u16);
    Ok(())
}

/// Executes LD B, Vx (FX33).
///
/// Stores the hundreds, tens and ones digits of VX at I, I+1 and I+2.
///
/// # Examples
///
/// VX = 254 stores `[2, 5, 4]`.
pub(crate) fn execute_bcd<D: Display, K: Keypad>(
    cpu: &mut CPU<D, K>,
    x: u8,
) -> Result<(), ExecutionError> {
    let value = cpu.reg(x)?;
    let base = cpu.registers.i() as usize;

    cpu.memory
        .write_range(base, &[value / 100, (value / 10) % 10, value % 10])
}

/// Executes LD [I], Vx (FX55).
///
/// Stores V0 through VX inclusive at I onwards. I is unchanged unless the
/// `load_store_increments_index` quirk is on.
pub(crate) fn execute_store_registers<D: Display, K: Keypad>(
    cpu: &mut CPU<D, K>,
    x: u8,
) -> Result<(), ExecutionError> {
    let base = cpu.registers.i() as usize;
    let count = x as usize + 1;
    let values = cpu
        .registers
        .v()
        .get(..count)
        .ok_or(ExecutionError::InvalidRegister(x as usize))?;

    cpu.memory.write_range(base, values)?;

    advance_index(cpu, x);
    Ok(())
}

/// Executes LD Vx, [I] (FX65).
///
/// Loads V0 through VX inclusive from I onwards. I is unchanged unless the
/// `load_store_increments_index` quirk is on.
pub(crate) fn execute_load_registers<D: Display, K: Keypad>(
    cpu: &mut CPU<D, K>,
    x: u8,
) -> Result<(), ExecutionError> {
    let base = cpu.registers.i() as usize;
    let count = x as usize + 1;
    let values = cpu.memory.read_range(base, count)?;
    let registers = cpu
        .registers
        .v_mut()
        .get_mut(..count)
        .ok_or(ExecutionError::InvalidRegister(x as usize))?;

    registers.copy_from_slice(values);

    advance_index(cpu, x);
    Ok(())
}

fn advance_index<D: Display, K: Keypad>(cpu: &mut CPU<D, K>, x: u8) {
    if cpu.config.quirks.load_store_increments_index {
        let i = cpu.registers.i().wrapping_add(x as u16 + 1);
        cpu.registers.set_i(i);
    }
}
