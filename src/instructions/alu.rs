//! # ALU (Arithmetic Logic Unit) Instructions
//!
//! This module implements arithmetic and logical operations:
//! - ADD Vx, byte (7XNN): no flag side effect
//! - Register-register operations (8XYN): LD, OR, AND, XOR, ADD, SUB, SHR, SUBN, SHL
//! - RND (CXNN)
//!
//! All results are 8 bits wide. Where an operation produces a flag, the result
//! is written to VX first and VF second, so VF always ends up holding the flag
//! even when X is F.

use rand::Rng;

use crate::devices::{Display, Keypad};
use crate::instruction::AluOp;
use crate::{ExecutionError, CPU};

/// Executes ADD Vx, byte (7XNN).
///
/// VX = (VX + NN) mod 256. VF is not touched, carry or not.
pub(crate) fn execute_add_imm<D: Display, K: Keypad>(
    cpu: &mut CPU<D, K>,
    x: u8,
    byte: u8,
) -> Result<(), ExecutionError> {
    let value = cpu.reg(x)?.wrapping_add(byte);
    cpu.set_reg(x, value)
}

/// Executes a register-register operation (8XYN).
///
/// Flag conventions:
/// - ADD: VF = 1 if the unsigned sum exceeds 255 (carry out)
/// - SUB: VF = 1 if VX >= VY (no borrow)
/// - SUBN: VF = 1 if VY >= VX (no borrow)
/// - SHR: VF = bit 0 of the operand before the shift
/// - SHL: VF = bit 7 of the operand before the shift
///
/// The shift operand is VX, or VY when the `shift_reads_vy` quirk is on.
/// LD, OR, AND and XOR leave VF alone.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU
/// * `op` - Operation selected by the low nibble
/// * `x` - Destination and first operand register
/// * `y` - Second operand register
pub(crate) fn execute_alu<D: Display, K: Keypad>(
    cpu: &mut CPU<D, K>,
    op: AluOp,
    x: u8,
    y: u8,
) -> Result<(), ExecutionError> {
    let vx = cpu.reg(x)?;
    let vy = cpu.reg(y)?;
    let shift_source = if cpu.config.quirks.shift_reads_vy {
        vy
    } else {
        vx
    };

    let (result, flag) = match op {
        AluOp::Assign => (vy, None),
        AluOp::Or => (vx | vy, None),
        AluOp::And => (vx & vy, None),
        AluOp::Xor => (vx ^ vy, None),
        AluOp::Add => {
            let sum = vx as u16 + vy as u16;
            ((sum % 256) as u8, Some(sum > 0xFF))
        }
        AluOp::Sub => (vx.wrapping_sub(vy), Some(vx >= vy)),
        AluOp::SubN => (vy.wrapping_sub(vx), Some(vy >= vx)),
        AluOp::Shr => (shift_source >> 1, Some(shift_source & 0x01 != 0)),
        AluOp::Shl => (shift_source << 1, Some(shift_source & 0x80 != 0)),
    };

    cpu.set_reg(x, result)?;
    if let Some(flag) = flag {
        cpu.registers.set_flag(flag);
    }

    Ok(())
}

/// Executes RND Vx, byte (CXNN).
///
/// VX = random byte AND NN.
pub(crate) fn execute_rnd<D: Display, K: Keypad>(
    cpu: &mut CPU<D, K>,
    x: u8,
    mask: u8,
) -> Result<(), ExecutionError> {
    let value: u8 = cpu.rng.gen();
    cpu.set_reg(x, value & mask)
}
