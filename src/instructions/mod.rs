//! # Instruction Implementations
//!
//! Execution of every instruction, organized by category. Each instruction is
//! a standalone function taking the CPU and the decoded operand fields. PC has
//! already been advanced past the instruction when these run.
//!
//! ## Categories
//!
//! - **alu**: Arithmetic and logic (7XNN, 8XY0-8XYE, CXNN)
//! - **branches**: Conditional skips on register values (3XNN, 4XNN, 5XY0, 9XY0)
//! - **control**: Jumps, calls and returns (00EE, 0NNN, 1NNN, 2NNN, BNNN)
//! - **graphics**: Display operations (00E0, DXYN)
//! - **input**: Keypad queries (EX9E, EXA1, FX0A)
//! - **load_store**: Register, index and memory transfers (6XNN, ANNN, FX1E, FX29, FX33, FX55, FX65)
//! - **timers**: Delay and sound timers (FX07, FX15, FX18)

pub mod alu;
pub mod branches;
pub mod control;
pub mod graphics;
pub mod input;
pub mod load_store;
pub mod timers;
