//! Display read-back abstractions
//!
//! Drawing goes through `embedded-graphics` draw targets. This module only
//! covers what the graphics stack has no notion of: reading pixels back out
//! of the panel so they can be serialized.

/// Errors from display read-back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Requested strip lies outside the panel
    OutOfBounds,
    /// Caller buffer cannot hold the requested strip
    BufferTooSmall,
    /// Bus transfer with the panel failed
    Communication,
}

/// Number of bytes per pixel returned by [`Framebuffer::read_rgb`]
pub const BYTES_PER_PIXEL: usize = 3;

/// Panel that can read its own pixels back
///
/// Coordinates have their origin at the top-left corner; rows grow
/// downwards.
pub trait Framebuffer {
    /// Panel size as `(width, height)` in pixels
    fn size(&self) -> (u16, u16);

    /// Read a horizontal strip starting at `(x, y)`
    ///
    /// The strip is `out.len() / 3` pixels long. Each pixel is written as
    /// three bytes in R, G, B order. Trailing bytes that do not form a whole
    /// pixel are left untouched.
    fn read_rgb(&mut self, x: u16, y: u16, out: &mut [u8]) -> Result<(), DisplayError>;

    /// Read the whole row `y` into the first `3 * width` bytes of `out`
    fn read_line(&mut self, y: u16, out: &mut [u8]) -> Result<(), DisplayError> {
        let (width, height) = self.size();
        if y >= height {
            return Err(DisplayError::OutOfBounds);
        }
        let len = usize::from(width) * BYTES_PER_PIXEL;
        let line = out.get_mut(..len).ok_or(DisplayError::BufferTooSmall)?;
        self.read_rgb(0, y, line)
    }
}

/// Backlight control
pub trait Backlight {
    /// Set brightness (0 = off, 255 = full)
    fn set_brightness(&mut self, level: u8);
}
