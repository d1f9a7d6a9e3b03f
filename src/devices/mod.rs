//! Peripheral interfaces for the interpreter core.
//!
//! The CPU does not own a screen or a keyboard. It talks to two collaborators
//! through traits, so a host can plug in whatever backs them (a terminal, a
//! canvas, a test double):
//!
//! - **Display**: a monochrome bit grid with XOR drawing and collision reporting
//! - **Keypad**: the state of the 16-key hex pad
//!
//! Reference implementations are provided: [`Framebuffer`] (64x32) and
//! [`KeyState`].
//!
//! # Example
//!
//! ```rust
//! use libchip8::{CPU, Framebuffer, KeyState, Keypad};
//!
//! let mut cpu = CPU::new(Framebuffer::new(), KeyState::new());
//! cpu.keypad_mut().press(0xA);
//! assert!(cpu.keypad().is_key_down(0xA));
//! ```

pub mod framebuffer;
pub mod keypad;

pub use framebuffer::{Framebuffer, DISPLAY_HEIGHT, DISPLAY_WIDTH};
pub use keypad::{KeyState, NUM_KEYS};

/// A monochrome display the CPU draws sprites onto.
///
/// Coordinates passed to [`Display::set_pixel`] are always in range; the CPU
/// wraps them with [`Display::width`] and [`Display::height`] before calling.
/// A display reporting a zero width or height is treated as having nowhere to
/// draw: sprites are still read and VF is cleared, but no pixel is set.
pub trait Display {
    /// Turns every pixel off.
    fn clear(&mut self);

    /// Flips the pixel at (`x`, `y`).
    ///
    /// Returns `true` if the pixel was on and is now off (a collision).
    fn set_pixel(&mut self, x: usize, y: usize) -> bool;

    /// Width in pixels.
    fn width(&self) -> usize;

    /// Height in pixels.
    fn height(&self) -> usize;
}

/// The 16-key input pad, keys `0x0..=0xF`.
pub trait Keypad {
    /// Returns `true` while `key` is held down.
    fn is_key_down(&self, key: u8) -> bool;

    /// Bitmask of the keys currently held down, bit `n` for key `n`.
    fn held_keys(&self) -> u16 {
        (0..NUM_KEYS as u8)
            .filter(|&key| self.is_key_down(key))
            .fold(0, |mask, key| mask | (1 << key))
    }
}
