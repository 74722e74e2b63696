//! In-memory RGB565 framebuffer
//!
//! Stands in for the panel's own video memory: everything is drawn here
//! and read back from here. The buffer is borrowed so the caller decides
//! where the ~150 KiB of a 320x240 panel live.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::{Rgb565, Rgb888};
use embedded_graphics::prelude::*;
use screencap_hal::{Backlight, DisplayError, Framebuffer, BYTES_PER_PIXEL};

/// RGB565 pixels in row-major order
pub struct MemoryFramebuffer<'a> {
    pixels: &'a mut [Rgb565],
    width: u16,
    height: u16,
    brightness: u8,
}

impl<'a> MemoryFramebuffer<'a> {
    /// Wrap `pixels` as a `width` x `height` panel
    ///
    /// Extra pixels past `width * height` are ignored.
    pub fn new(pixels: &'a mut [Rgb565], width: u16, height: u16) -> Result<Self, DisplayError> {
        let needed = usize::from(width) * usize::from(height);
        let pixels = pixels
            .get_mut(..needed)
            .ok_or(DisplayError::BufferTooSmall)?;
        Ok(Self {
            pixels,
            width,
            height,
            brightness: 0,
        })
    }

    /// Color at `point`, or `None` outside the panel
    pub fn pixel(&self, point: Point) -> Option<Rgb565> {
        self.index(point).map(|i| self.pixels[i])
    }

    pub fn pixels(&self) -> &[Rgb565] {
        self.pixels
    }

    /// Last level set through [`Backlight`]
    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    fn index(&self, point: Point) -> Option<usize> {
        let x = usize::try_from(point.x).ok()?;
        let y = usize::try_from(point.y).ok()?;
        (x < usize::from(self.width) && y < usize::from(self.height))
            .then(|| y * usize::from(self.width) + x)
    }
}

impl OriginDimensions for MemoryFramebuffer<'_> {
    fn size(&self) -> Size {
        Size::new(u32::from(self.width), u32::from(self.height))
    }
}

impl DrawTarget for MemoryFramebuffer<'_> {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let Some(i) = self.index(point) {
                self.pixels[i] = color;
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.pixels.fill(color);
        Ok(())
    }
}

impl Framebuffer for MemoryFramebuffer<'_> {
    fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn read_rgb(&mut self, x: u16, y: u16, out: &mut [u8]) -> Result<(), DisplayError> {
        let count = out.len() / BYTES_PER_PIXEL;
        if y >= self.height || usize::from(x) + count > usize::from(self.width) {
            return Err(DisplayError::OutOfBounds);
        }

        let start = usize::from(y) * usize::from(self.width) + usize::from(x);
        let row = &self.pixels[start..start + count];
        for (color, rgb) in row.iter().zip(out.chunks_exact_mut(BYTES_PER_PIXEL)) {
            let wide = Rgb888::from(*color);
            rgb.copy_from_slice(&[wide.r(), wide.g(), wide.b()]);
        }
        Ok(())
    }
}

impl Backlight for MemoryFramebuffer<'_> {
    fn set_brightness(&mut self, level: u8) {
        self.brightness = level;
    }
}
