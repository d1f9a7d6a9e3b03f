//! WASM API for the CHIP-8 interpreter.
//!
//! Provides JavaScript-callable interfaces for CPU control, keypad input,
//! framebuffer access and disassembly. The page owns rendering and timing:
//! it calls `run_frame` and `tick_timers` from `requestAnimationFrame` and
//! blits `framebuffer()` when a frame reports a redraw.

use crate::{disassemble, Config, Framebuffer, KeyState, MEMORY_SIZE, CPU};
use wasm_bindgen::prelude::*;

/// JavaScript-compatible error wrapper
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsError {
    message: String,
}

#[wasm_bindgen]
impl JsError {
    #[wasm_bindgen(constructor)]
    pub fn new(message: &str) -> JsError {
        JsError {
            message: message.to_string(),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn message(&self) -> String {
        self.message.clone()
    }
}

/// One line of a disassembly listing
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct DisassemblyLine {
    address: u16,
    bytes: Vec<u8>,
    text: String,
}

#[wasm_bindgen]
impl DisassemblyLine {
    #[wasm_bindgen(getter)]
    pub fn address(&self) -> u16 {
        self.address
    }

    #[wasm_bindgen(getter)]
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn text(&self) -> String {
        self.text.clone()
    }
}

/// Main emulator interface for JavaScript
#[wasm_bindgen]
pub struct Chip8Emulator {
    cpu: CPU<Framebuffer, KeyState>,
}

#[wasm_bindgen]
impl Chip8Emulator {
    /// Create a new emulator. Without a seed, `Math.random()` supplies one.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: Option<f64>) -> Self {
        let seed = seed.unwrap_or_else(|| js_sys::Math::random() * u32::MAX as f64) as u64;
        let config = Config::default().with_rng_seed(seed);

        Chip8Emulator {
            cpu: CPU::with_config(Framebuffer::new(), KeyState::new(), config),
        }
    }

    /// Copy a ROM image into memory at 0x200
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<(), JsError> {
        self.cpu
            .load_program(rom)
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Execute a single instruction; returns whether the screen changed
    pub fn step(&mut self) -> Result<bool, JsError> {
        self.cpu.step().map_err(|e| JsError::new(&e.to_string()))
    }

    /// Execute one frame's worth of instructions; returns whether the screen changed
    pub fn run_frame(&mut self, instructions: u32) -> Result<bool, JsError> {
        self.cpu
            .run_instructions(instructions as usize)
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Advance the delay and sound timers (call at 60 Hz)
    pub fn tick_timers(&mut self) {
        self.cpu.tick_timers();
    }

    /// Reset the machine; the ROM must be loaded again
    pub fn reset(&mut self) {
        self.cpu.reset();
    }

    // Keypad

    pub fn key_down(&mut self, key: u8) {
        self.cpu.keypad_mut().press(key);
    }

    pub fn key_up(&mut self, key: u8) {
        self.cpu.keypad_mut().release(key);
    }

    // State inspection

    /// One byte per pixel (1 = lit), 64x32 row-major
    pub fn framebuffer(&self) -> Vec<u8> {
        self.cpu.display().to_bytes()
    }

    #[wasm_bindgen(getter)]
    pub fn pc(&self) -> u16 {
        self.cpu.pc()
    }

    #[wasm_bindgen(getter)]
    pub fn index(&self) -> u16 {
        self.cpu.i()
    }

    /// V0..VF
    pub fn registers(&self) -> Vec<u8> {
        self.cpu.registers().v().to_vec()
    }

    #[wasm_bindgen(getter)]
    pub fn delay_timer(&self) -> u8 {
        self.cpu.timers().delay()
    }

    #[wasm_bindgen(getter)]
    pub fn sound_active(&self) -> bool {
        self.cpu.sound_active()
    }

    #[wasm_bindgen(getter)]
    pub fn waiting_for_key(&self) -> bool {
        self.cpu.is_waiting_for_key()
    }

    /// Disassemble memory starting at an address
    pub fn disassemble(&self, start_addr: u16, num_instructions: u32) -> Vec<JsValue> {
        let start = (start_addr as usize).min(MEMORY_SIZE);
        let memory = &self.cpu.memory().as_slice()[start..];

        disassemble(memory, start_addr)
            .into_iter()
            .take(num_instructions as usize)
            .map(|line| {
                JsValue::from(DisassemblyLine {
                    address: line.address,
                    text: line.text(),
                    bytes: line.bytes,
                })
            })
            .collect()
    }
}
