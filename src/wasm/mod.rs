//! WebAssembly bindings for the CHIP-8 interpreter.
//!
//! This module provides JavaScript-callable interfaces to the interpreter
//! core, enabling browser-based execution of CHIP-8 programs.

pub mod api;

pub use api::Chip8Emulator;
