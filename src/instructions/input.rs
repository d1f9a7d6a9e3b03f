//! # Keypad Instructions
//!
//! - SKP Vx (EX9E): skip if key VX is down
//! - SKNP Vx (EXA1): skip if key VX is up
//! - LD Vx, K (FX0A): wait for a key press
//!
//! A register naming a key outside 0x0..=0xF is an
//! [`ExecutionError::InvalidKey`] fault.

use log::debug;

use crate::devices::{Display, Keypad, NUM_KEYS};
use crate::{ExecutionError, CPU};

fn key_in<D: Display, K: Keypad>(cpu: &CPU<D, K>, x: u8) -> Result<u8, ExecutionError> {
    let key = cpu.reg(x)?;
    if key as usize >= NUM_KEYS {
        return Err(ExecutionError::InvalidKey(key));
    }
    Ok(key)
}

/// Executes SKP Vx (EX9E).
pub(crate) fn execute_skp<D: Display, K: Keypad>(
    cpu: &mut CPU<D, K>,
    x: u8,
) -> Result<(), ExecutionError> {
    let key = key_in(cpu, x)?;
    if cpu.keypad.is_key_down(key) {
        cpu.registers.skip();
    }
    Ok(())
}

/// Executes SKNP Vx (EXA1).
pub(crate) fn execute_sknp<D: Display, K: Keypad>(
    cpu: &mut CPU<D, K>,
    x: u8,
) -> Result<(), ExecutionError> {
    let key = key_in(cpu, x)?;
    if !cpu.keypad.is_key_down(key) {
        cpu.registers.skip();
    }
    Ok(())
}

/// Executes LD Vx, K (FX0A).
///
/// Waits for a key press event. The keys held when the wait begins do not
/// count until they have been released, so a key still held from an earlier
/// `FX0A` cannot satisfy this one. Once a key goes down during the wait, the
/// lowest-numbered such key is stored in VX and execution continues.
/// Otherwise PC is moved back onto this instruction so the next step tries
/// again; nothing else changes while waiting.
pub(crate) fn execute_wait_key<D: Display, K: Keypad>(
    cpu: &mut CPU<D, K>,
    x: u8,
) -> Result<(), ExecutionError> {
    let held = cpu.keypad.held_keys();

    if cpu.waiting_for_key {
        // Released keys become eligible again
        cpu.held_at_wait &= held;
    } else {
        cpu.held_at_wait = held;
    }

    let pressed = held & !cpu.held_at_wait;
    if pressed != 0 {
        cpu.set_reg(x, pressed.trailing_zeros() as u8)?;
        cpu.waiting_for_key = false;
        cpu.held_at_wait = 0;
        return Ok(());
    }

    if !cpu.waiting_for_key {
        debug!("waiting for key into V{:X}", x);
    }
    cpu.waiting_for_key = true;
    let pc = cpu.registers.pc();
    cpu.registers.set_pc(pc.wrapping_sub(2));
    Ok(())
}
