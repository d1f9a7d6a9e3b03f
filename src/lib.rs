//! # CHIP-8 Interpreter Core
//!
//! The fetch-decode-execute engine for the CHIP-8 instruction set: 4 KiB of
//! memory, sixteen 8-bit registers, a 16-level call stack, two 60 Hz timers and
//! a monochrome framebuffer.
//!
//! The crate is the "CPU" only. Rendering the framebuffer, polling input and
//! pacing execution belong to the host, which drives the core through
//! [`CPU::step`] / [`CPU::run_instructions`] and [`CPU::tick_timers`].
//!
//! ## Quick Start
//!
//! ```rust
//! use libchip8::{CPU, Config, Framebuffer, KeyState};
//!
//! let config = Config::default().with_rng_seed(1);
//! let mut cpu = CPU::with_config(Framebuffer::new(), KeyState::new(), config);
//!
//! // LD I, 0x000 (glyph "0"); DRW V0, V0, 5
//! cpu.load_program(&[0xA0, 0x00, 0xD0, 0x05]).unwrap();
//!
//! let redraw = cpu.run_instructions(2).unwrap();
//! assert!(redraw);
//! assert_eq!(cpu.display().lit_pixels(), 14);
//! ```
//!
//! ## Architecture
//!
//! - **Owned state**: one [`CPU`] value owns memory, registers, stack and
//!   timers. There is no global state; instances are independent.
//! - **Decode, then execute**: [`Instruction::decode`] turns an opcode into an
//!   enum, which the CPU executes with a single exhaustive match.
//! - **Checked access**: memory and register accesses return `Result`;
//!   integrity failures halt the CPU with a [`CpuFault`].
//! - **Pluggable peripherals**: the display and keypad are traits.
//!
//! ## Modules
//!
//! - `cpu` - CPU state and execution loop
//! - `memory` - Address space and glyph table
//! - `registers` - V0..VF, I and PC
//! - `stack` - Call stack
//! - `timers` - Delay and sound timers
//! - `instruction` - Opcode decoding
//! - `devices` - Display and keypad interfaces
//! - `disassembler` - Program listings

pub mod config;
pub mod cpu;
pub mod devices;
pub mod disassembler;
pub mod error;
pub mod instruction;
pub mod memory;
pub mod registers;
pub mod stack;
pub mod timers;

// Internal instruction implementations (not part of public API)
mod instructions;

// WebAssembly bindings (only compiled with wasm feature)
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export public API
pub use config::{Config, Quirks};
pub use cpu::CPU;
pub use devices::{Display, Framebuffer, KeyState, Keypad, DISPLAY_HEIGHT, DISPLAY_WIDTH, NUM_KEYS};
pub use disassembler::{disassemble, DisassembledLine};
pub use error::{CpuFault, ExecutionError, LoadError};
pub use instruction::{AluOp, Instruction};
pub use memory::{
    Memory, FONT_SET, FONT_SET_SIZE, GLYPH_SIZE, MAX_PROGRAM_SIZE, MEMORY_SIZE, PROGRAM_START,
};
pub use registers::{Registers, FLAG_REGISTER, NUM_REGISTERS};
pub use stack::{CallStack, STACK_CAPACITY};
pub use timers::Timers;
