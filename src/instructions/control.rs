//! # Control Flow Instructions
//!
//! This module implements control flow operations:
//! - RET (00EE): return from subroutine
//! - SYS addr (0NNN): machine routine call, ignored
//! - JP addr (1NNN): jump
//! - CALL addr (2NNN): call subroutine
//! - JP V0, addr (BNNN): jump with offset
//!
//! Calls push the already-advanced PC, i.e. the address of the instruction
//! after the call, so RET resumes right after it.

use log::warn;

use crate::devices::{Display, Keypad};
use crate::{ExecutionError, CPU};

/// Executes RET (00EE).
///
/// Pops the return address into PC. Fails with
/// [`ExecutionError::StackUnderflow`] on an empty stack.
pub(crate) fn execute_ret<D: Display, K: Keypad>(
    cpu: &mut CPU<D, K>,
) -> Result<(), ExecutionError> {
    let addr = cpu.stack.pop()?;
    cpu.registers.set_pc(addr);
    Ok(())
}

/// Executes SYS addr (0NNN).
///
/// Jumped to native code on the original hardware. There is nothing to run,
/// so the instruction is skipped.
pub(crate) fn execute_sys<D: Display, K: Keypad>(
    _cpu: &mut CPU<D, K>,
    addr: u16,
) -> Result<(), ExecutionError> {
    warn!("ignoring machine routine call to 0x{:03X}", addr);
    Ok(())
}

/// Executes JP addr (1NNN).
pub(crate) fn execute_jp<D: Display, K: Keypad>(
    cpu: &mut CPU<D, K>,
    addr: u16,
) -> Result<(), ExecutionError> {
    cpu.registers.set_pc(addr);
    Ok(())
}

/// Executes CALL addr (2NNN).
///
/// Pushes the return address and jumps. Fails with
/// [`ExecutionError::StackOverflow`] when 16 calls are already nested; PC is
/// not changed in that case.
pub(crate) fn execute_call<D: Display, K: Keypad>(
    cpu: &mut CPU<D, K>,
    addr: u16,
) -> Result<(), ExecutionError> {
    cpu.stack.push(cpu.registers.pc())?;
    cpu.registers.set_pc(addr);
    Ok(())
}

/// Executes JP V0, addr (BNNN).
///
/// PC = NNN + V0. A target past the end of memory faults on the next fetch.
pub(crate) fn execute_jp_v0<D: Display, K: Keypad>(
    cpu: &mut CPU<D, K>,
    addr: u16,
) -> Result<(), ExecutionError> {
    let target = addr + cpu.reg(0)? as u16;
    cpu.registers.set_pc(target);
    Ok(())
}
