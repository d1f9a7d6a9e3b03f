//! # Instruction Decoding
//!
//! Every instruction is one big-endian 16-bit word. The high nibble selects
//! the family; the remaining nibbles are operands named after the usual
//! notation:
//!
//! | Field | Bits       | Meaning                    |
//! |-------|------------|----------------------------|
//! | `X`   | `0x0F00`   | first register operand     |
//! | `Y`   | `0x00F0`   | second register operand    |
//! | `N`   | `0x000F`   | 4-bit immediate / sub-op   |
//! | `NN`  | `0x00FF`   | 8-bit immediate            |
//! | `NNN` | `0x0FFF`   | 12-bit address             |
//!
//! [`Instruction::decode`] turns a word into an [`Instruction`] value; the CPU
//! executes that value with one exhaustive match. Decoding has no side effects,
//! which lets the disassembler share it.

use std::fmt;

use crate::ExecutionError;

/// Register-to-register operations of family 8, selected by the low nibble.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AluOp {
    /// `8XY0`: VX = VY
    Assign,
    /// `8XY1`: VX |= VY
    Or,
    /// `8XY2`: VX &= VY
    And,
    /// `8XY3`: VX ^= VY
    Xor,
    /// `8XY4`: VX += VY, VF = carry
    Add,
    /// `8XY5`: VX -= VY, VF = NOT borrow
    Sub,
    /// `8XY6`: VX >>= 1, VF = bit shifted out
    Shr,
    /// `8XY7`: VX = VY - VX, VF = NOT borrow
    SubN,
    /// `8XYE`: VX <<= 1, VF = bit shifted out
    Shl,
}

impl AluOp {
    fn from_nibble(n: u8) -> Option<Self> {
        match n {
            0x0 => Some(AluOp::Assign),
            0x1 => Some(AluOp::Or),
            0x2 => Some(AluOp::And),
            0x3 => Some(AluOp::Xor),
            0x4 => Some(AluOp::Add),
            0x5 => Some(AluOp::Sub),
            0x6 => Some(AluOp::Shr),
            0x7 => Some(AluOp::SubN),
            0xE => Some(AluOp::Shl),
            _ => None,
        }
    }

    fn mnemonic(self) -> &'static str {
        match self {
            AluOp::Assign => "LD",
            AluOp::Or => "OR",
            AluOp::And => "AND",
            AluOp::Xor => "XOR",
            AluOp::Add => "ADD",
            AluOp::Sub => "SUB",
            AluOp::Shr => "SHR",
            AluOp::SubN => "SUBN",
            AluOp::Shl => "SHL",
        }
    }
}

/// A decoded instruction with its operand fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// `00E0`: clear the display
    Clear,
    /// `00EE`: return from subroutine
    Return,
    /// `0NNN`: call machine routine (legacy, ignored)
    Sys { addr: u16 },
    /// `1NNN`: jump
    Jump { addr: u16 },
    /// `2NNN`: call subroutine
    Call { addr: u16 },
    /// `3XNN`: skip if VX == NN
    SkipEqImm { x: u8, byte: u8 },
    /// `4XNN`: skip if VX != NN
    SkipNeImm { x: u8, byte: u8 },
    /// `5XY0`: skip if VX == VY
    SkipEqReg { x: u8, y: u8 },
    /// `6XNN`: VX = NN
    LoadImm { x: u8, byte: u8 },
    /// `7XNN`: VX += NN, no flag
    AddImm { x: u8, byte: u8 },
    /// `8XYN`: register ALU operation
    Alu { op: AluOp, x: u8, y: u8 },
    /// `9XY0`: skip if VX != VY
    SkipNeReg { x: u8, y: u8 },
    /// `ANNN`: I = NNN
    LoadIndex { addr: u16 },
    /// `BNNN`: jump to NNN + V0
    JumpV0 { addr: u16 },
    /// `CXNN`: VX = random & NN
    Random { x: u8, mask: u8 },
    /// `DXYN`: draw N-row sprite from [I] at (VX, VY)
    Draw { x: u8, y: u8, height: u8 },
    /// `EX9E`: skip if key VX is down
    SkipKeyDown { x: u8 },
    /// `EXA1`: skip if key VX is up
    SkipKeyUp { x: u8 },
    /// `FX07`: VX = delay timer
    LoadDelay { x: u8 },
    /// `FX0A`: wait for a key, store it in VX
    WaitKey { x: u8 },
    /// `FX15`: delay timer = VX
    SetDelay { x: u8 },
    /// `FX18`: sound timer = VX
    SetSound { x: u8 },
    /// `FX1E`: I += VX
    AddIndex { x: u8 },
    /// `FX29`: I = glyph address of digit VX
    LoadGlyph { x: u8 },
    /// `FX33`: BCD of VX into [I], [I+1], [I+2]
    StoreBcd { x: u8 },
    /// `FX55`: store V0..=VX at [I]
    StoreRegisters { x: u8 },
    /// `FX65`: load V0..=VX from [I]
    LoadRegisters { x: u8 },
}

/// Splits an opcode into its four nibbles, most significant first.
pub fn nibbles(opcode: u16) -> [u8; 4] {
    [
        ((opcode >> 12) & 0xF) as u8,
        ((opcode >> 8) & 0xF) as u8,
        ((opcode >> 4) & 0xF) as u8,
        (opcode & 0xF) as u8,
    ]
}

impl Instruction {
    /// Decodes a raw opcode.
    ///
    /// Returns [`ExecutionError::UnknownOpcode`] for encodings that do not name
    /// an instruction.
    ///
    /// # Examples
    ///
    /// ```
    /// use libchip8::Instruction;
    ///
    /// let instr = Instruction::decode(0x6005).unwrap();
    /// assert_eq!(instr, Instruction::LoadImm { x: 0, byte: 0x05 });
    /// assert_eq!(instr.to_string(), "LD V0, 0x05");
    /// ```
    pub fn decode(opcode: u16) -> Result<Self, ExecutionError> {
        let [family, x, y, n] = nibbles(opcode);
        let addr = opcode & 0x0FFF;
        let byte = (opcode & 0x00FF) as u8;
        let unknown = ExecutionError::UnknownOpcode(opcode);

        let instr = match family {
            0x0 => match opcode {
                0x00E0 => Instruction::Clear,
                0x00EE => Instruction::Return,
                _ => Instruction::Sys { addr },
            },
            0x1 => Instruction::Jump { addr },
            0x2 => Instruction::Call { addr },
            0x3 => Instruction::SkipEqImm { x, byte },
            0x4 => Instruction::SkipNeImm { x, byte },
            0x5 if n == 0 => Instruction::SkipEqReg { x, y },
            0x6 => Instruction::LoadImm { x, byte },
            0x7 => Instruction::AddImm { x, byte },
            0x8 => {
                let op = AluOp::from_nibble(n).ok_or(unknown)?;
                Instruction::Alu { op, x, y }
            }
            0x9 if n == 0 => Instruction::SkipNeReg { x, y },
            0xA => Instruction::LoadIndex { addr },
            0xB => Instruction::JumpV0 { addr },
            0xC => Instruction::Random { x, mask: byte },
            0xD => Instruction::Draw { x, y, height: n },
            0xE => match byte {
                0x9E => Instruction::SkipKeyDown { x },
                0xA1 => Instruction::SkipKeyUp { x },
                _ => return Err(unknown),
            },
            0xF => match byte {
                0x07 => Instruction::LoadDelay { x },
                0x0A => Instruction::WaitKey { x },
                0x15 => Instruction::SetDelay { x },
                0x18 => Instruction::SetSound { x },
                0x1E => Instruction::AddIndex { x },
                0x29 => Instruction::LoadGlyph { x },
                0x33 => Instruction::StoreBcd { x },
                0x55 => Instruction::StoreRegisters { x },
                0x65 => Instruction::LoadRegisters { x },
                _ => return Err(unknown),
            },
            _ => return Err(unknown),
        };

        Ok(instr)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Instruction::*;

        match *self {
            Clear => write!(f, "CLS"),
            Return => write!(f, "RET"),
            Sys { addr } => write!(f, "SYS 0x{:03X}", addr),
            Jump { addr } => write!(f, "JP 0x{:03X}", addr),
            Call { addr } => write!(f, "CALL 0x{:03X}", addr),
            SkipEqImm { x, byte } => write!(f, "SE V{:X}, 0x{:02X}", x, byte),
            SkipNeImm { x, byte } => write!(f, "SNE V{:X}, 0x{:02X}", x, byte),
            SkipEqReg { x, y } => write!(f, "SE V{:X}, V{:X}", x, y),
            LoadImm { x, byte } => write!(f, "LD V{:X}, 0x{:02X}", x, byte),
            AddImm { x, byte } => write!(f, "ADD V{:X}, 0x{:02X}", x, byte),
            Alu { op, x, y } => write!(f, "{} V{:X}, V{:X}", op.mnemonic(), x, y),
            SkipNeReg { x, y } => write!(f, "SNE V{:X}, V{:X}", x, y),
            LoadIndex { addr } => write!(f, "LD I, 0x{:03X}", addr),
            JumpV0 { addr } => write!(f, "JP V0, 0x{:03X}", addr),
            Random { x, mask } => write!(f, "RND V{:X}, 0x{:02X}", x, mask),
            Draw { x, y, height } => write!(f, "DRW V{:X}, V{:X}, {}", x, y, height),
            SkipKeyDown { x } => write!(f, "SKP V{:X}", x),
            SkipKeyUp { x } => write!(f, "SKNP V{:X}", x),
            LoadDelay { x } => write!(f, "LD V{:X}, DT", x),
            WaitKey { x } => write!(f, "LD V{:X}, K", x),
            SetDelay { x } => write!(f, "LD DT, V{:X}", x),
            SetSound { x } => write!(f, "LD ST, V{:X}", x),
            AddIndex { x } => write!(f, "ADD I, V{:X}", x),
            LoadGlyph { x } => write!(f, "LD F, V{:X}", x),
            StoreBcd { x } => write!(f, "LD B, V{:X}", x),
            StoreRegisters { x } => write!(f, "LD [I], V{:X}", x),
            LoadRegisters { x } => write!(f, "LD V{:X}, [I]", x),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nibbles() {
        assert_eq!(nibbles(0xD12F), [0xD, 0x1, 0x2, 0xF]);
    }

    #[test]
    fn test_decode_family_zero() {
        assert_eq!(Instruction::decode(0x00E0).unwrap(), Instruction::Clear);
        assert_eq!(Instruction::decode(0x00EE).unwrap(), Instruction::Return);
        assert_eq!(
            Instruction::decode(0x0123).unwrap(),
            Instruction::Sys { addr: 0x123 }
        );
    }

    #[test]
    fn test_decode_operand_fields() {
        assert_eq!(
            Instruction::decode(0x2ABC).unwrap(),
            Instruction::Call { addr: 0xABC }
        );
        assert_eq!(
            Instruction::decode(0x8AB4).unwrap(),
            Instruction::Alu {
                op: AluOp::Add,
                x: 0xA,
                y: 0xB
            }
        );
        assert_eq!(
            Instruction::decode(0xD125).unwrap(),
            Instruction::Draw {
                x: 1,
                y: 2,
                height: 5
            }
        );
        assert_eq!(
            Instruction::decode(0xC30F).unwrap(),
            Instruction::Random { x: 3, mask: 0x0F }
        );
        assert_eq!(
            Instruction::decode(0xF533).unwrap(),
            Instruction::StoreBcd { x: 5 }
        );
    }

    #[test]
    fn test_decode_all_alu_sub_opcodes() {
        let expected = [
            (0x0, AluOp::Assign),
            (0x1, AluOp::Or),
            (0x2, AluOp::And),
            (0x3, AluOp::Xor),
            (0x4, AluOp::Add),
            (0x5, AluOp::Sub),
            (0x6, AluOp::Shr),
            (0x7, AluOp::SubN),
            (0xE, AluOp::Shl),
        ];
        for (n, op) in expected {
            let opcode = 0x8120 | n;
            assert_eq!(
                Instruction::decode(opcode).unwrap(),
                Instruction::Alu { op, x: 1, y: 2 }
            );
        }
    }

    #[test]
    fn test_decode_rejects_unassigned_encodings() {
        for opcode in [
            0x5121, 0x912F, 0x8128, 0x812D, 0x812F, 0xE1FF, 0xE19F, 0xF100, 0xF1FF,
        ] {
            assert_eq!(
                Instruction::decode(opcode),
                Err(ExecutionError::UnknownOpcode(opcode)),
                "0x{:04X} should not decode",
                opcode
            );
        }
    }

    #[test]
    fn test_mnemonics() {
        let cases = [
            (0x00E0, "CLS"),
            (0x00EE, "RET"),
            (0x1234, "JP 0x234"),
            (0x3A7F, "SE VA, 0x7F"),
            (0x5AB0, "SE VA, VB"),
            (0x8126, "SHR V1, V2"),
            (0xA050, "LD I, 0x050"),
            (0xB300, "JP V0, 0x300"),
            (0xE39E, "SKP V3"),
            (0xF00A, "LD V0, K"),
            (0xF255, "LD [I], V2"),
            (0xF265, "LD V2, [I]"),
        ];
        for (opcode, text) in cases {
            assert_eq!(Instruction::decode(opcode).unwrap().to_string(), text);
        }
    }
}
