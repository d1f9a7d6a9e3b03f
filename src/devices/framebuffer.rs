//! 64x32 monochrome framebuffer.

use std::fmt;

use super::Display;

/// Display width in pixels.
pub const DISPLAY_WIDTH: usize = 64;

/// Display height in pixels.
pub const DISPLAY_HEIGHT: usize = 32;

/// Bit grid backing the standard 64x32 display.
///
/// Rendering is left to the host. `to_bytes` gives one byte per pixel in
/// row-major order, and the `fmt::Display` impl draws `#` for lit and `.` for
/// dark pixels, one line per row.
///
/// # Examples
///
/// ```rust
/// use libchip8::{Display, Framebuffer};
///
/// let mut fb = Framebuffer::new();
/// assert!(!fb.set_pixel(3, 4)); // off -> on
/// assert!(fb.pixel(3, 4));
/// assert!(fb.set_pixel(3, 4)); // on -> off: collision
/// assert!(!fb.pixel(3, 4));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Framebuffer {
    pixels: [[bool; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
}

impl Framebuffer {
    /// Creates a blank framebuffer.
    pub fn new() -> Self {
        Self {
            pixels: [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
        }
    }

    /// Returns whether the pixel at (`x`, `y`) is lit. Out-of-range is dark.
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.pixels
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(false)
    }

    /// Number of lit pixels.
    pub fn lit_pixels(&self) -> usize {
        self.pixels.iter().flatten().filter(|&&on| on).count()
    }

    /// One byte per pixel (1 = lit), row-major.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flatten().map(|&on| on as u8).collect()
    }
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for Framebuffer {
    fn clear(&mut self) {
        self.pixels = [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
    }

    fn set_pixel(&mut self, x: usize, y: usize) -> bool {
        let pixel = &mut self.pixels[y % DISPLAY_HEIGHT][x % DISPLAY_WIDTH];
        let collided = *pixel;
        *pixel = !*pixel;
        collided
    }

    fn width(&self) -> usize {
        DISPLAY_WIDTH
    }

    fn height(&self) -> usize {
        DISPLAY_HEIGHT
    }
}

impl fmt::Display for Framebuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.pixels {
            let line: String = row.iter().map(|&on| if on { '#' } else { '.' }).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Framebuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Framebuffer")
            .field("lit_pixels", &self.lit_pixels())
            .finish()
    }
}
