//! End-to-end scenarios: small programs run through the public API.

use libchip8::{Config, CpuFault, ExecutionError, Framebuffer, KeyState, LoadError, CPU};

fn setup_cpu(program: &[u8]) -> CPU<Framebuffer, KeyState> {
    let config = Config::default().with_rng_seed(0xC8);
    let mut cpu = CPU::with_config(Framebuffer::new(), KeyState::new(), config);
    cpu.load_program(program).unwrap();
    cpu
}

#[test]
fn test_load_then_return_underflows() {
    // LD V0, 0x05; RET
    let mut cpu = setup_cpu(&[0x60, 0x05, 0x00, 0xEE]);

    assert_eq!(cpu.step(), Ok(false));
    assert_eq!(cpu.v(0), 5);
    assert_eq!(cpu.pc(), 0x202);

    assert_eq!(
        cpu.step(),
        Err(CpuFault {
            pc: 0x202,
            opcode: 0x00EE,
            error: ExecutionError::StackUnderflow,
        })
    );
}

#[test]
fn test_countdown_loop() {
    // 200: LD V0, 0x03
    // 202: ADD V1, 0x02
    // 204: ADD V0, 0xFF     (V0 -= 1)
    // 206: SE V0, 0x00
    // 208: JP 0x202
    // 20A: JP 0x20A         (halt loop)
    let program = [
        0x60, 0x03, 0x71, 0x02, 0x70, 0xFF, 0x30, 0x00, 0x12, 0x02, 0x12, 0x0A,
    ];
    let mut cpu = setup_cpu(&program);

    cpu.run_instructions(100).unwrap();

    assert_eq!(cpu.v(0), 0);
    assert_eq!(cpu.v(1), 6);
    assert_eq!(cpu.pc(), 0x20A);
    // ADD immediate never touches VF
    assert_eq!(cpu.v(0xF), 0);
}

#[test]
fn test_subroutine_draws_digit() {
    // 200: LD V0, 0x07
    // 202: CALL 0x300
    // 204: JP 0x204
    // 300: LD F, V0
    // 302: DRW V1, V1, 5
    // 304: RET
    let mut program = vec![0u8; 0x106];
    program[..6].copy_from_slice(&[0x60, 0x07, 0x23, 0x00, 0x12, 0x04]);
    program[0x100..0x106].copy_from_slice(&[0xF0, 0x29, 0xD1, 0x15, 0x00, 0xEE]);
    let mut cpu = setup_cpu(&program);

    let redraw = cpu.run_instructions(5).unwrap();

    assert!(redraw);
    assert_eq!(cpu.pc(), 0x204);
    assert!(cpu.stack().is_empty());
    assert_eq!(cpu.i(), 7 * 5);
    // Glyph "7": F0 10 20 40 40 -> 4 + 1 + 1 + 1 + 1 pixels
    assert_eq!(cpu.display().lit_pixels(), 8);
    assert!(cpu.display().pixel(0, 0));
    assert!(cpu.display().pixel(3, 1));
    assert!(cpu.display().pixel(1, 4));
}

#[test]
fn test_unknown_opcode_reports_raw_value() {
    let mut cpu = setup_cpu(&[0x60, 0x01, 0xFF, 0xFF]);

    cpu.step().unwrap();
    let fault = cpu.step().unwrap_err();

    assert_eq!(fault.pc, 0x202);
    assert_eq!(fault.opcode, 0xFFFF);
    assert_eq!(fault.error, ExecutionError::UnknownOpcode(0xFFFF));
    assert_eq!(
        fault.to_string(),
        "unknown opcode 0xFFFF (opcode 0xFFFF at PC 0x202)"
    );
}

#[test]
fn test_running_off_the_end_of_memory_faults() {
    // JP 0xFFE; the word at 0xFFE is 0x0000 (SYS, ignored), then PC = 0x1000
    let mut cpu = setup_cpu(&[0x1F, 0xFE]);

    cpu.step().unwrap();
    cpu.step().unwrap();
    let fault = cpu.step().unwrap_err();

    assert_eq!(fault.pc, 0x1000);
    assert_eq!(fault.error, ExecutionError::OutOfBounds { addr: 0x1000 });
}

#[test]
fn test_load_file_too_large() {
    let path = std::env::temp_dir().join(format!("libchip8-big-{}.ch8", std::process::id()));
    std::fs::write(&path, vec![0u8; 4096]).unwrap();

    let mut cpu = CPU::default();
    let result = cpu.load_file(&path);
    std::fs::remove_file(&path).unwrap();

    match result {
        Err(LoadError::TooLarge { size, max }) => {
            assert_eq!(size, 4096);
            assert_eq!(max, 0xE00);
        }
        other => panic!("expected TooLarge, got {:?}", other),
    }
}
