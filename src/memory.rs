//! # Memory
//!
//! The machine has a flat 4 KiB address space:
//!
//! - `0x000..0x050`: built-in hexadecimal glyph table (16 glyphs, 5 bytes each).
//!   Written on reset and never modified afterwards.
//! - `0x050..0x200`: unused, zero.
//! - `0x200..0x1000`: program region. The loader copies the program image here
//!   and the program is free to use whatever it does not occupy as scratch.
//!
//! Every access goes through [`Memory::read`] / [`Memory::write`], which are
//! bounds-checked. An out-of-range access means the program counter or an
//! operand is corrupt and is reported as [`ExecutionError::OutOfBounds`].

use std::path::Path;

use log::debug;

use crate::{ExecutionError, LoadError};

/// Size of the address space in bytes.
pub const MEMORY_SIZE: usize = 4096;

/// Address where programs are loaded and execution begins.
pub const PROGRAM_START: u16 = 0x200;

/// Largest program image that fits in memory.
pub const MAX_PROGRAM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

/// Bytes per glyph in the font table.
pub const GLYPH_SIZE: usize = 5;

/// Size of the font table in bytes.
pub const FONT_SET_SIZE: usize = 80;

/// Built-in 4x5 glyphs for the hex digits 0-F, one byte per row.
pub const FONT_SET: [u8; FONT_SET_SIZE] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

/// The 4 KiB main memory with the glyph table preloaded.
///
/// # Examples
///
/// ```
/// use libchip8::{Memory, FONT_SET, PROGRAM_START};
///
/// let mut mem = Memory::new();
/// assert_eq!(mem.read(0).unwrap(), FONT_SET[0]);
///
/// mem.load(&[0x60, 0x05]).unwrap();
/// assert_eq!(mem.read(PROGRAM_START as usize).unwrap(), 0x60);
/// ```
#[derive(Clone)]
pub struct Memory {
    data: Box<[u8; MEMORY_SIZE]>,
}

impl Memory {
    /// Creates memory in its reset state: zeroed, glyph table loaded.
    pub fn new() -> Self {
        let mut memory = Self {
            data: Box::new([0; MEMORY_SIZE]),
        };
        memory.reset();
        memory
    }

    /// Zeroes every byte, then writes the glyph table into the lowest addresses.
    pub fn reset(&mut self) {
        self.data.fill(0);
        self.data[..FONT_SET_SIZE].copy_from_slice(&FONT_SET);
    }

    /// Copies a program image into the program region at [`PROGRAM_START`].
    ///
    /// Images larger than [`MAX_PROGRAM_SIZE`] are rejected; nothing is written
    /// in that case. Bytes past the end of the image are left as they were.
    pub fn load(&mut self, program: &[u8]) -> Result<(), LoadError> {
        if program.len() > MAX_PROGRAM_SIZE {
            return Err(LoadError::TooLarge {
                size: program.len(),
                max: MAX_PROGRAM_SIZE,
            });
        }

        let start = PROGRAM_START as usize;
        self.data[start..start + program.len()].copy_from_slice(program);
        debug!("loaded {} byte program at 0x{:03X}", program.len(), start);
        Ok(())
    }

    /// Reads a program image from disk and loads it with [`Memory::load`].
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<(), LoadError> {
        let path = path.as_ref();
        let program = std::fs::read(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("read {} bytes from {}", program.len(), path.display());
        self.load(&program)
    }

    /// Reads the byte at `addr`.
    pub fn read(&self, addr: usize) -> Result<u8, ExecutionError> {
        self.data
            .get(addr)
            .copied()
            .ok_or(ExecutionError::OutOfBounds { addr })
    }

    /// Writes `value` at `addr`.
    ///
    /// Writes into the glyph table are refused with
    /// [`ExecutionError::ReadOnlyAddress`].
    pub fn write(&mut self, addr: usize, value: u8) -> Result<(), ExecutionError> {
        if addr < FONT_SET_SIZE {
            return Err(ExecutionError::ReadOnlyAddress { addr });
        }
        let slot = self
            .data
            .get_mut(addr)
            .ok_or(ExecutionError::OutOfBounds { addr })?;
        *slot = value;
        Ok(())
    }

    /// Borrows `len` bytes starting at `addr`.
    ///
    /// The whole range is checked up front. On failure the error names the
    /// first address past the end of memory.
    pub fn read_range(&self, addr: usize, len: usize) -> Result<&[u8], ExecutionError> {
        self.data
            .get(addr..addr + len)
            .ok_or(ExecutionError::OutOfBounds {
                addr: addr.max(MEMORY_SIZE),
            })
    }

    /// Writes `bytes` starting at `addr`, all or nothing.
    ///
    /// Fails without writing anything if any byte of the range would land in
    /// the glyph table or past the end of memory.
    pub fn write_range(&mut self, addr: usize, bytes: &[u8]) -> Result<(), ExecutionError> {
        if addr < FONT_SET_SIZE {
            return Err(ExecutionError::ReadOnlyAddress { addr });
        }
        let slots = self
            .data
            .get_mut(addr..addr + bytes.len())
            .ok_or(ExecutionError::OutOfBounds {
                addr: addr.max(MEMORY_SIZE),
            })?;
        slots.copy_from_slice(bytes);
        Ok(())
    }

    /// Reads the big-endian 16-bit word at `addr`.
    pub fn read_word(&self, addr: usize) -> Result<u16, ExecutionError> {
        let hi = self.read(addr)? as u16;
        let lo = self.read(addr + 1)? as u16;
        Ok((hi << 8) | lo)
    }

    /// Returns the whole address space as a slice.
    pub fn as_slice(&self) -> &[u8] {
        &self.data[..]
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}
