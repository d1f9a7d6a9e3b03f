//! Tests for the keypad instructions (EX9E, EXA1, FX0A).

use libchip8::{ExecutionError, Framebuffer, KeyState, CPU};

/// Helper function to create a CPU with `program` at 0x200
fn setup_cpu(program: &[u8]) -> CPU<Framebuffer, KeyState> {
    let mut cpu = CPU::default();
    cpu.load_program(program).unwrap();
    cpu
}

// ========== EX9E / EXA1 ==========

#[test]
fn test_skp_key_down() {
    let mut cpu = setup_cpu(&[0xE3, 0x9E]); // SKP V3
    cpu.set_v(3, 0xA);
    cpu.keypad_mut().press(0xA);

    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x204);
}

#[test]
fn test_skp_key_up() {
    let mut cpu = setup_cpu(&[0xE3, 0x9E]);
    cpu.set_v(3, 0xA);
    cpu.keypad_mut().press(0xB);

    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x202);
}

#[test]
fn test_sknp() {
    let mut cpu = setup_cpu(&[0xE3, 0xA1]); // SKNP V3
    cpu.set_v(3, 0x1);
    cpu.step().unwrap();
    assert_eq!(cpu.pc(), 0x204);

    let mut cpu = setup_cpu(&[0xE3, 0xA1]);
    cpu.set_v(3, 0x1);
    cpu.keypad_mut().press(0x1);
    cpu.step().unwrap();
    assert_eq!(cpu.pc(), 0x202);
}

#[test]
fn test_key_index_out_of_range_faults() {
    let mut cpu = setup_cpu(&[0xE3, 0x9E]);
    cpu.set_v(3, 0x10);

    let fault = cpu.step().unwrap_err();

    assert_eq!(fault.error, ExecutionError::InvalidKey(0x10));
    assert_eq!(fault.pc, 0x200);
    assert_eq!(fault.opcode, 0xE39E);
}

#[test]
fn test_sknp_key_index_out_of_range_faults() {
    let mut cpu = setup_cpu(&[0xE3, 0xA1]);
    cpu.set_v(3, 0xFF);

    assert_eq!(
        cpu.step().unwrap_err().error,
        ExecutionError::InvalidKey(0xFF)
    );
}

// ========== FX0A ==========

#[test]
fn test_wait_key_stalls_until_press() {
    // LD V5, K; LD V6, 0x01
    let mut cpu = setup_cpu(&[0xF5, 0x0A, 0x66, 0x01]);

    for _ in 0..3 {
        assert_eq!(cpu.step(), Ok(false));
        assert_eq!(cpu.pc(), 0x200, "PC stays on the wait instruction");
        assert!(cpu.is_waiting_for_key());
    }
    assert_eq!(cpu.v(5), 0);

    cpu.keypad_mut().press(0x9);
    cpu.step().unwrap();

    assert_eq!(cpu.v(5), 0x9);
    assert_eq!(cpu.pc(), 0x202);
    assert!(!cpu.is_waiting_for_key());

    cpu.step().unwrap();
    assert_eq!(cpu.v(6), 0x01);
}

#[test]
fn test_wait_key_takes_lowest_key() {
    let mut cpu = setup_cpu(&[0xF0, 0x0A]);
    cpu.step().unwrap();

    cpu.keypad_mut().press(0xE);
    cpu.keypad_mut().press(0x4);
    cpu.step().unwrap();

    assert_eq!(cpu.v(0), 0x4);
}

#[test]
fn test_wait_key_ignores_key_held_before_wait() {
    let mut cpu = setup_cpu(&[0xF0, 0x0A]);
    cpu.keypad_mut().press(0x7);

    cpu.step().unwrap();
    cpu.step().unwrap();
    assert!(cpu.is_waiting_for_key(), "a key already down is not a press");
    assert_eq!(cpu.pc(), 0x200);

    cpu.keypad_mut().release(0x7);
    cpu.step().unwrap();
    assert!(cpu.is_waiting_for_key());

    cpu.keypad_mut().press(0x7);
    cpu.step().unwrap();

    assert_eq!(cpu.v(0), 0x7);
    assert_eq!(cpu.pc(), 0x202);
}

#[test]
fn test_wait_key_new_press_while_other_key_held() {
    let mut cpu = setup_cpu(&[0xF0, 0x0A]);
    cpu.keypad_mut().press(0x1);
    cpu.step().unwrap();

    cpu.keypad_mut().press(0xC);
    cpu.step().unwrap();

    assert_eq!(cpu.v(0), 0xC, "the held key 0x1 is lower but not new");
}

#[test]
fn test_consecutive_waits_need_separate_presses() {
    // LD V0, K; LD V1, K
    let mut cpu = setup_cpu(&[0xF0, 0x0A, 0xF1, 0x0A]);
    cpu.step().unwrap();
    cpu.keypad_mut().press(0x5);
    cpu.step().unwrap();
    assert_eq!(cpu.v(0), 0x5);

    // 0x5 is still held when the second wait begins
    cpu.step().unwrap();
    cpu.step().unwrap();
    assert!(cpu.is_waiting_for_key());
    assert_eq!(cpu.pc(), 0x202);

    cpu.keypad_mut().release(0x5);
    cpu.step().unwrap();
    cpu.keypad_mut().press(0x5);
    cpu.step().unwrap();

    assert_eq!(cpu.v(1), 0x5);
    assert_eq!(cpu.pc(), 0x204);
}

#[test]
fn test_wait_key_leaves_timers_to_the_host() {
    let mut cpu = setup_cpu(&[0xF0, 0x0A]);
    cpu.timers_mut().set_delay(3);

    cpu.step().unwrap();
    cpu.tick_timers();
    cpu.step().unwrap();

    assert_eq!(cpu.timers().delay(), 2);
    assert!(cpu.is_waiting_for_key());
}

#[test]
fn test_run_instructions_resumes_after_key() {
    // LD V0, K; ADD V1, 1; ADD V1, 1
    let mut cpu = setup_cpu(&[0xF0, 0x0A, 0x71, 0x01, 0x71, 0x01]);

    cpu.run_instructions(10).unwrap();
    assert_eq!(cpu.pc(), 0x200);

    cpu.keypad_mut().press(0x2);
    cpu.run_instructions(3).unwrap();

    assert_eq!(cpu.v(0), 0x2);
    assert_eq!(cpu.v(1), 2);
    assert_eq!(cpu.pc(), 0x206);
}
