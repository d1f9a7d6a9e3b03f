//! Fuzz target for the disassembler.
//!
//! This target feeds arbitrary byte sequences to the disassembler
//! to find edge cases and crashes in instruction decoding.

#![no_main]

use arbitrary::Arbitrary;
use libchip8::disassemble;
use libfuzzer_sys::fuzz_target;

/// Complete fuzz input
#[derive(Debug, Arbitrary)]
struct FuzzInput {
    bytes: Vec<u8>,
    start_address: u16,
}

fuzz_target!(|input: FuzzInput| {
    // Limit input size to prevent OOM
    if input.bytes.len() > 65536 {
        return;
    }

    let lines = disassemble(&input.bytes, input.start_address);

    let mut total_size: usize = 0;
    let mut expected_address = input.start_address;

    for line in &lines {
        assert_eq!(line.address, expected_address);

        // Whole words, except possibly one trailing byte
        assert!(line.bytes.len() == 2 || line.bytes.len() == 1);
        if line.bytes.len() == 1 {
            assert!(line.instruction.is_none());
        }

        // Rendering never panics and never comes out empty
        assert!(!line.text().is_empty());
        let _ = line.to_string();

        total_size += line.bytes.len();
        expected_address = expected_address.wrapping_add(line.bytes.len() as u16);
    }

    assert_eq!(total_size, input.bytes.len());
});
