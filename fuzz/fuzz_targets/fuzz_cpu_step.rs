//! Fuzz target for CPU step execution.
//!
//! This target creates arbitrary register, timer and keypad state plus a
//! program image, then runs a batch of instructions looking for panics.

#![no_main]

use arbitrary::Arbitrary;
use libchip8::{Config, Framebuffer, KeyState, Quirks, CPU, MAX_PROGRAM_SIZE, PROGRAM_START};
use libfuzzer_sys::fuzz_target;

/// Arbitrary CPU initial state for fuzzing
#[derive(Debug, Arbitrary)]
struct FuzzCpuState {
    /// V0..VF
    v: [u8; 16],
    /// Index register
    i: u16,
    delay: u8,
    sound: u8,
    /// Bitmask of held keys
    keys: u16,
    shift_reads_vy: bool,
    load_store_increments_index: bool,
    seed: u64,
}

/// Complete fuzz input
#[derive(Debug, Arbitrary)]
struct FuzzInput {
    cpu_state: FuzzCpuState,
    program: Vec<u8>,
    /// Instructions to run
    steps: u8,
}

fuzz_target!(|input: FuzzInput| {
    if input.program.len() > MAX_PROGRAM_SIZE {
        return;
    }

    let state = &input.cpu_state;
    let config = Config::default()
        .with_rng_seed(state.seed)
        .with_quirks(Quirks {
            shift_reads_vy: state.shift_reads_vy,
            load_store_increments_index: state.load_store_increments_index,
        });
    let mut cpu = CPU::with_config(Framebuffer::new(), KeyState::new(), config);
    cpu.load_program(&input.program).unwrap();

    for (index, value) in state.v.iter().enumerate() {
        cpu.set_v(index, *value);
    }
    cpu.set_i(state.i);
    cpu.timers_mut().set_delay(state.delay);
    cpu.timers_mut().set_sound(state.sound);
    for key in 0..16u8 {
        if state.keys & (1 << key) != 0 {
            cpu.keypad_mut().press(key);
        }
    }

    // Faults are expected; panics are bugs
    let result = cpu.run_instructions(input.steps as usize);

    match result {
        Ok(_) => assert!(cpu.fault().is_none()),
        Err(fault) => {
            assert_eq!(cpu.pc(), fault.pc);
            assert_eq!(cpu.step(), Err(fault));
        }
    }
    assert!(cpu.stack().depth() <= 16);

    cpu.reset();
    assert_eq!(cpu.pc(), PROGRAM_START);
    assert!(cpu.fault().is_none());
});
