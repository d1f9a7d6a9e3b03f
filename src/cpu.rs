//! # CPU State and Execution
//!
//! This module contains the CPU struct that owns all machine state and the
//! fetch-decode-execute step.
//!
//! ## CPU State
//!
//! The CPU maintains:
//! - **Memory**: 4 KiB, glyph table at the bottom, program from 0x200
//! - **Registers**: V0..VF, index register I, program counter
//! - **Call stack**: 16 return addresses
//! - **Timers**: delay and sound, decremented by the host at 60 Hz
//! - **Peripherals**: a [`Display`] and a [`Keypad`] supplied by the host
//!
//! ## Execution Model
//!
//! - `step()`: execute one instruction, report whether the display changed
//! - `run_instructions()`: execute a batch, typically one display frame's worth
//! - `tick_timers()`: advance the 60 Hz timers
//!
//! A failed step halts the CPU. The fault records the PC and opcode, is logged,
//! and is returned again by every later `step` until [`CPU::reset`].

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use log::{debug, error, trace};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::devices::{Display, Framebuffer, KeyState, Keypad};
use crate::instruction::Instruction;
use crate::instructions::{alu, branches, control, graphics, input, load_store, timers};
use crate::{
    CallStack, Config, CpuFault, ExecutionError, LoadError, Memory, Registers, Timers,
    PROGRAM_START,
};

/// Interpreter state and execution context.
///
/// Generic over the display and keypad so hosts can supply their own; the
/// default pairing is [`Framebuffer`] and [`KeyState`].
///
/// # Examples
///
/// ```
/// use libchip8::{CPU, Framebuffer, KeyState};
///
/// let mut cpu = CPU::new(Framebuffer::new(), KeyState::new());
/// cpu.load_program(&[0x60, 0x05, 0x00, 0xEE]).unwrap();
///
/// // LD V0, 0x05
/// assert_eq!(cpu.step(), Ok(false));
/// assert_eq!(cpu.v(0), 5);
/// assert_eq!(cpu.pc(), 0x202);
///
/// // RET with nothing on the stack halts the CPU
/// let fault = cpu.step().unwrap_err();
/// assert_eq!(fault.pc, 0x202);
/// assert_eq!(fault.opcode, 0x00EE);
/// ```
pub struct CPU<D: Display, K: Keypad> {
    /// Main memory
    pub(crate) memory: Memory,

    /// V0..VF, I and PC
    pub(crate) registers: Registers,

    /// Subroutine return addresses
    pub(crate) stack: CallStack,

    /// Delay and sound timers
    pub(crate) timers: Timers,

    /// Display collaborator
    pub(crate) display: D,

    /// Keypad collaborator
    pub(crate) keypad: K,

    /// Source for `CXNN`
    pub(crate) rng: StdRng,

    /// Seed `rng` was built from, reused on reset
    pub(crate) seed: u64,

    pub(crate) config: Config,

    /// Set by instructions that change the display during the current step
    pub(crate) redraw: bool,

    /// `FX0A` is stalled waiting for a key
    pub(crate) waiting_for_key: bool,

    /// Keys held when the current `FX0A` wait began and not yet released
    pub(crate) held_at_wait: u16,

    /// Steps completed without a fault
    pub(crate) executed: u64,

    /// Fault that halted the CPU, if any
    pub(crate) fault: Option<CpuFault>,
}

impl<D: Display, K: Keypad> CPU<D, K> {
    /// Creates a CPU in its reset state with the default [`Config`].
    pub fn new(display: D, keypad: K) -> Self {
        Self::with_config(display, keypad, Config::default())
    }

    /// Creates a CPU in its reset state.
    ///
    /// Memory is zeroed with the glyph table loaded, all registers and the
    /// stack are empty, and PC points at [`PROGRAM_START`].
    pub fn with_config(display: D, keypad: K, config: Config) -> Self {
        let seed = config.rng_seed.unwrap_or_else(clock_seed);

        Self {
            memory: Memory::new(),
            registers: Registers::new(),
            stack: CallStack::new(),
            timers: Timers::new(),
            display,
            keypad,
            rng: StdRng::seed_from_u64(seed),
            seed,
            config,
            redraw: false,
            waiting_for_key: false,
            held_at_wait: 0,
            executed: 0,
            fault: None,
        }
    }

    /// Returns the machine to its power-on state.
    ///
    /// Memory is cleared (which also removes any loaded program), the glyph
    /// table is reloaded, registers, stack and timers are zeroed, PC is set to
    /// [`PROGRAM_START`], the display is cleared and any fault is forgotten.
    /// The random source is reseeded, so a seeded run replays identically.
    pub fn reset(&mut self) {
        self.memory.reset();
        self.rng = StdRng::seed_from_u64(self.seed);
        self.registers = Registers::new();
        self.stack = CallStack::new();
        self.timers = Timers::new();
        self.display.clear();
        self.redraw = false;
        self.waiting_for_key = false;
        self.held_at_wait = 0;
        self.executed = 0;
        self.fault = None;
        debug!("cpu reset");
    }

    /// Copies a program image into memory at [`PROGRAM_START`].
    pub fn load_program(&mut self, program: &[u8]) -> Result<(), LoadError> {
        self.memory.load(program)
    }

    /// Reads a program image from disk into memory at [`PROGRAM_START`].
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<(), LoadError> {
        self.memory.load_file(path)
    }

    /// Executes one instruction.
    ///
    /// 1. Fetch the big-endian word at PC
    /// 2. Advance PC by 2
    /// 3. Decode the word into an [`Instruction`]
    /// 4. Execute it
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if the display changed and should be re-presented
    /// - `Ok(false)` otherwise, including while `FX0A` is waiting for a key
    /// - `Err(fault)` if the instruction could not be executed; the CPU is
    ///   halted and PC is left at the faulting instruction
    pub fn step(&mut self) -> Result<bool, CpuFault> {
        if let Some(fault) = self.fault {
            return Err(fault);
        }

        let pc = self.registers.pc();
        let opcode = match self.memory.read_word(pc as usize) {
            Ok(opcode) => opcode,
            Err(err) => return Err(self.halt(pc, 0, err)),
        };
        self.registers.set_pc(pc.wrapping_add(2));
        self.redraw = false;

        match self.execute(pc, opcode) {
            Ok(()) => {
                self.executed += 1;
                Ok(self.redraw)
            }
            Err(err) => Err(self.halt(pc, opcode, err)),
        }
    }

    /// Executes up to `count` instructions.
    ///
    /// Stops early if `FX0A` stalls, so a key wait is retried once per call.
    /// Returns whether any of the executed instructions changed the display.
    pub fn run_instructions(&mut self, count: usize) -> Result<bool, CpuFault> {
        let mut redraw = false;

        for _ in 0..count {
            redraw |= self.step()?;
            if self.waiting_for_key {
                break;
            }
        }

        Ok(redraw)
    }

    /// Decrements the delay and sound timers. Call at 60 Hz.
    pub fn tick_timers(&mut self) {
        self.timers.tick();
    }

    fn execute(&mut self, pc: u16, opcode: u16) -> Result<(), ExecutionError> {
        use Instruction::*;

        let instr = Instruction::decode(opcode)?;
        trace!("{:03X}: {:04X}  {}", pc, opcode, instr);

        match instr {
            Clear => graphics::execute_cls(self),
            Draw { x, y, height } => graphics::execute_drw(self, x, y, height),

            Return => control::execute_ret(self),
            Sys { addr } => control::execute_sys(self, addr),
            Jump { addr } => control::execute_jp(self, addr),
            Call { addr } => control::execute_call(self, addr),
            JumpV0 { addr } => control::execute_jp_v0(self, addr),

            SkipEqImm { x, byte } => branches::execute_se_imm(self, x, byte),
            SkipNeImm { x, byte } => branches::execute_sne_imm(self, x, byte),
            SkipEqReg { x, y } => branches::execute_se_reg(self, x, y),
            SkipNeReg { x, y } => branches::execute_sne_reg(self, x, y),

            AddImm { x, byte } => alu::execute_add_imm(self, x, byte),
            Alu { op, x, y } => alu::execute_alu(self, op, x, y),
            Random { x, mask } => alu::execute_rnd(self, x, mask),

            LoadImm { x, byte } => load_store::execute_ld_imm(self, x, byte),
            LoadIndex { addr } => load_store::execute_ld_i(self, addr),
            AddIndex { x } => load_store::execute_add_i(self, x),
            LoadGlyph { x } => load_store::execute_ld_glyph(self, x),
            StoreBcd { x } => load_store::execute_bcd(self, x),
            StoreRegisters { x } => load_store::execute_store_registers(self, x),
            LoadRegisters { x } => load_store::execute_load_registers(self, x),

            SkipKeyDown { x } => input::execute_skp(self, x),
            SkipKeyUp { x } => input::execute_sknp(self, x),
            WaitKey { x } => input::execute_wait_key(self, x),

            LoadDelay { x } => timers::execute_ld_delay(self, x),
            SetDelay { x } => timers::execute_set_delay(self, x),
            SetSound { x } => timers::execute_set_sound(self, x),
        }
    }

    fn halt(&mut self, pc: u16, opcode: u16, err: ExecutionError) -> CpuFault {
        let fault = CpuFault {
            pc,
            opcode,
            error: err,
        };
        error!("cpu halted: {}", fault);
        self.registers.set_pc(pc);
        self.fault = Some(fault);
        fault
    }

    // ========== Operand Helpers ==========

    /// Reads register VX named by a decoded operand.
    pub(crate) fn reg(&self, x: u8) -> Result<u8, ExecutionError> {
        self.registers.get(x as usize)
    }

    /// Writes register VX named by a decoded operand.
    pub(crate) fn set_reg(&mut self, x: u8, value: u8) -> Result<(), ExecutionError> {
        self.registers.set(x as usize, value)
    }

    // ========== State Accessors ==========

    /// Returns the program counter.
    pub fn pc(&self) -> u16 {
        self.registers.pc()
    }

    pub fn set_pc(&mut self, value: u16) {
        self.registers.set_pc(value);
    }

    /// Returns the index register.
    pub fn i(&self) -> u16 {
        self.registers.i()
    }

    pub fn set_i(&mut self, value: u16) {
        self.registers.set_i(value);
    }

    /// Returns register V`index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is greater than 15.
    pub fn v(&self, index: usize) -> u8 {
        self.registers.v()[index]
    }

    /// Sets register V`index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is greater than 15.
    pub fn set_v(&mut self, index: usize, value: u8) {
        self.registers.v_mut()[index] = value;
    }

    pub fn registers(&self) -> &Registers {
        &self.registers
    }

    pub fn registers_mut(&mut self) -> &mut Registers {
        &mut self.registers
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    pub fn stack(&self) -> &CallStack {
        &self.stack
    }

    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    pub fn timers_mut(&mut self) -> &mut Timers {
        &mut self.timers
    }

    /// Returns true while the sound timer is non-zero.
    pub fn sound_active(&self) -> bool {
        self.timers.sound() > 0
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn keypad(&self) -> &K {
        &self.keypad
    }

    pub fn keypad_mut(&mut self) -> &mut K {
        &mut self.keypad
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns true while `FX0A` is stalled waiting for a key press.
    pub fn is_waiting_for_key(&self) -> bool {
        self.waiting_for_key
    }

    /// Number of steps completed without a fault since the last reset.
    pub fn executed(&self) -> u64 {
        self.executed
    }

    /// The fault that halted the CPU, if any.
    pub fn fault(&self) -> Option<&CpuFault> {
        self.fault.as_ref()
    }
}

impl Default for CPU<Framebuffer, KeyState> {
    fn default() -> Self {
        Self::new(Framebuffer::new(), KeyState::new())
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or(0)
}
