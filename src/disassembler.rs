//! Disassembler
//!
//! Converts a program image into an assembly listing using the same decoder
//! the CPU executes with.

use std::fmt;

use crate::instruction::Instruction;

/// One line of a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisassembledLine {
    /// Address of the first byte of this line
    pub address: u16,

    /// Raw bytes covered by this line (2 for instructions, 1 for a trailing byte)
    pub bytes: Vec<u8>,

    /// Decoded instruction, or `None` for data
    pub instruction: Option<Instruction>,
}

impl DisassembledLine {
    /// Assembly text for this line: the mnemonic, or a `.word`/`.byte`
    /// directive for data.
    pub fn text(&self) -> String {
        match (&self.instruction, self.bytes.as_slice()) {
            (Some(instr), _) => instr.to_string(),
            (None, [hi, lo]) => format!(".word 0x{:02X}{:02X}", hi, lo),
            (None, bytes) => bytes
                .iter()
                .map(|b| format!(".byte 0x{:02X}", b))
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

impl fmt::Display for DisassembledLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex: Vec<String> = self.bytes.iter().map(|b| format!("{:02X}", b)).collect();
        write!(f, "{:03X}  {:<5}  {}", self.address, hex.join(""), self.text())
    }
}

/// Disassemble a byte slice into listing lines.
///
/// Bytes are taken two at a time as big-endian words starting at
/// `start_address`. Words that do not decode become `.word` data lines and an
/// odd trailing byte becomes a `.byte` line.
///
/// # Examples
///
/// ```
/// use libchip8::disassemble;
///
/// let lines = disassemble(&[0x60, 0x05, 0x00, 0xEE], 0x200);
/// assert_eq!(lines[0].text(), "LD V0, 0x05");
/// assert_eq!(lines[1].to_string(), "202  00EE   RET");
/// ```
pub fn disassemble(bytes: &[u8], start_address: u16) -> Vec<DisassembledLine> {
    let mut address = start_address;

    bytes
        .chunks(2)
        .map(|chunk| {
            let instruction = match chunk {
                [hi, lo] => Instruction::decode(u16::from_be_bytes([*hi, *lo])).ok(),
                _ => None,
            };
            let line = DisassembledLine {
                address,
                bytes: chunk.to_vec(),
                instruction,
            };
            address = address.wrapping_add(chunk.len() as u16);
            line
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disassemble_empty() {
        assert!(disassemble(&[], 0x200).is_empty());
    }

    #[test]
    fn test_disassemble_addresses_advance_by_two() {
        let lines = disassemble(&[0x00, 0xE0, 0x12, 0x00, 0xA2, 0x2A], 0x200);

        let addresses: Vec<u16> = lines.iter().map(|l| l.address).collect();
        assert_eq!(addresses, vec![0x200, 0x202, 0x204]);
        assert_eq!(lines[0].text(), "CLS");
        assert_eq!(lines[1].text(), "JP 0x200");
        assert_eq!(lines[2].text(), "LD I, 0x22A");
    }

    #[test]
    fn test_undecodable_word_is_data() {
        let lines = disassemble(&[0xFF, 0xFF], 0x300);
        assert_eq!(lines[0].instruction, None);
        assert_eq!(lines[0].text(), ".word 0xFFFF");
    }

    #[test]
    fn test_trailing_byte() {
        let lines = disassemble(&[0x60, 0x01, 0xAB], 0x200);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].address, 0x202);
        assert_eq!(lines[1].bytes, vec![0xAB]);
        assert_eq!(lines[1].text(), ".byte 0xAB");
    }

    #[test]
    fn test_listing_format() {
        let lines = disassemble(&[0xD0, 0x15], 0x20A);
        assert_eq!(lines[0].to_string(), "20A  D015   DRW V0, V1, 5");
    }
}
