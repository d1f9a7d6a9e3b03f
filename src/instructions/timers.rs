//! # Timer Instructions
//!
//! - LD Vx, DT (FX07)
//! - LD DT, Vx (FX15)
//! - LD ST, Vx (FX18)

use crate::devices::{Display, Keypad};
use crate::{ExecutionError, CPU};

/// Executes LD Vx, DT (FX07).
pub(crate) fn execute_ld_delay<D: Display, K: Keypad>(
    cpu: &mut CPU<D, K>,
    x: u8,
) -> Result<(), ExecutionError> {
    let delay = cpu.timers.delay();
    cpu.set_reg(x, delay)
}

/// Executes LD DT, Vx (FX15).
pub(crate) fn execute_set_delay<D: Display, K: Keypad>(
    cpu: &mut CPU<D, K>,
    x: u8,
) -> Result<(), ExecutionError> {
    let value = cpu.reg(x)?;
    cpu.timers.set_delay(value);
    Ok(())
}

/// Executes LD ST, Vx (FX18).
pub(crate) fn execute_set_sound<D: Display, K: Keypad>(
    cpu: &mut CPU<D, K>,
    x: u8,
) -> Result<(), ExecutionError> {
    let value = cpu.reg(x)?;
    cpu.timers.set_sound(value);
    Ok(())
}
