//! # Skip Instructions
//!
//! Conditional execution is done by skipping the next instruction:
//! - SE Vx, byte (3XNN) / SNE Vx, byte (4XNN)
//! - SE Vx, Vy (5XY0) / SNE Vx, Vy (9XY0)
//!
//! PC has already moved past the skip itself, so a taken skip adds 2 more:
//! 4 in total when the condition holds, 2 when it does not.

use crate::devices::{Display, Keypad};
use crate::{ExecutionError, CPU};

fn skip_if<D: Display, K: Keypad>(cpu: &mut CPU<D, K>, condition: bool) {
    if condition {
        cpu.registers.skip();
    }
}

/// Executes SE Vx, byte (3XNN).
pub(crate) fn execute_se_imm<D: Display, K: Keypad>(
    cpu: &mut CPU<D, K>,
    x: u8,
    byte: u8,
) -> Result<(), ExecutionError> {
    let vx = cpu.reg(x)?;
    skip_if(cpu, vx == byte);
    Ok(())
}

/// Executes SNE Vx, byte (4XNN).
pub(crate) fn execute_sne_imm<D: Display, K: Keypad>(
    cpu: &mut CPU<D, K>,
    x: u8,
    byte: u8,
) -> Result<(), ExecutionError> {
    let vx = cpu.reg(x)?;
    skip_if(cpu, vx != byte);
    Ok(())
}

/// Executes SE Vx, Vy (5XY0).
pub(crate) fn execute_se_reg<D: Display, K: Keypad>(
    cpu: &mut CPU<D, K>,
    x: u8,
    y: u8,
) -> Result<(), ExecutionError> {
    let equal = cpu.reg(x)? == cpu.reg(y)?;
    skip_if(cpu, equal);
    Ok(())
}

/// Executes SNE Vx, Vy (9XY0).
pub(crate) fn execute_sne_reg<D: Display, K: Keypad>(
    cpu: &mut CPU<D, K>,
    x: u8,
    y: u8,
) -> Result<(), ExecutionError> {
    let equal = cpu.reg(x)? == cpu.reg(y)?;
    skip_if(cpu, !equal);
    Ok(())
}
