//! # Display Instructions
//!
//! - CLS (00E0): clear the display
//! - DRW Vx, Vy, nibble (DXYN): draw a sprite
//!
//! Sprites are 8 pixels wide and N rows tall, one byte per row read from
//! memory at I, most significant bit leftmost. Pixels are XORed onto the
//! display. Both instructions request a redraw.

use crate::devices::{Display, Keypad};
use crate::{ExecutionError, CPU};

/// Width of every sprite row in pixels.
const SPRITE_WIDTH: usize = 8;


/// Executes CLS (00E0).
pub(crate) fn execute_cls<D: Display, K: Keypad>(
    cpu: &mut CPU<D, K>,
) -> Result<(), ExecutionError> {
    cpu.display.clear();
    cpu.redraw = true;
    Ok(())
}

/// Executes DRW Vx, Vy, nibble (DXYN).
///
/// Draws the sprite at (VX, VY). Coordinates wrap at the display edges, both
/// for the origin and for pixels running off the right or bottom.
///
/// VF is set to 1 if any lit pixel was turned off (a collision), 0 otherwise.
/// Every sprite row is read before anything is drawn, so a sprite that runs
/// past the end of memory faults with the display and VF untouched.
pub(crate) fn execute_drw<D: Display, K: Keypad>(
    cpu: &mut CPU<D, K>,
    x: u8,
    y: u8,
    height: u8,
) -> Result<(), ExecutionError> {
    let vx = cpu.reg(x)? as usize;
    let vy = cpu.reg(y)? as usize;
    let base = cpu.registers.i() as usize;

    let sprite = cpu.memory.read_range(base, height as usize)?;

    let width = cpu.display.width();
    let rows = cpu.display.height();
    let mut collided = false;

    if width > 0 && rows > 0 {
        let (origin_x, origin_y) = (vx % width, vy % rows);
        for (row, bits) in sprite.iter().enumerate() {
            for col in 0..SPRITE_WIDTH {
                if bits & (0x80 >> col) != 0 {
                    let px = (origin_x + col) % width;
                    let py = (origin_y + row) % rows;
                    collided |= cpu.display.set_pixel(px, py);
                }
            }
        }
    }

    cpu.registers.set_flag(collided);
    cpu.redraw = true;
    Ok(())
}
