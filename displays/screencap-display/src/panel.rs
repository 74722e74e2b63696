//! Gauge panel: a draw target plus the artwork drawn on it

use embedded_graphics::image::ImageRaw;
use embedded_graphics::pixelcolor::{BinaryColor, Rgb565};
use embedded_graphics::prelude::*;
use screencap_core::GaugeView;
use screencap_hal::{Backlight, DisplayError, Framebuffer};

use crate::boot;
use crate::gauge::{self, GaugeFace};

/// Renders the application screens onto `T`
///
/// `T` draws through `embedded-graphics` and reads back through
/// [`Framebuffer`]; screenshots therefore show exactly what was drawn.
pub struct GaugePanel<'a, T> {
    target: T,
    face: GaugeFace<'a>,
    logo: Option<ImageRaw<'a, BinaryColor>>,
}

impl<'a, T> GaugePanel<'a, T> {
    /// Panel with the drawn face and no logo
    pub fn new(target: T) -> Self {
        Self {
            target,
            face: GaugeFace::Drawn,
            logo: None,
        }
    }

    pub fn with_face(mut self, face: GaugeFace<'a>) -> Self {
        self.face = face;
        self
    }

    /// Use a 1-bit logo (MSB first, rows padded to a byte) on the boot screen
    pub fn with_logo(mut self, logo: ImageRaw<'a, BinaryColor>) -> Self {
        self.logo = Some(logo);
        self
    }

    pub fn target(&self) -> &T {
        &self.target
    }
}

impl<T: Framebuffer> Framebuffer for GaugePanel<'_, T> {
    fn size(&self) -> (u16, u16) {
        self.target.size()
    }

    fn read_rgb(&mut self, x: u16, y: u16, out: &mut [u8]) -> Result<(), DisplayError> {
        self.target.read_rgb(x, y, out)
    }
}

impl<T: Backlight> Backlight for GaugePanel<'_, T> {
    fn set_brightness(&mut self, level: u8) {
        self.target.set_brightness(level);
    }
}

impl<T> GaugeView for GaugePanel<'_, T>
where
    T: DrawTarget<Color = Rgb565> + Framebuffer,
{
    fn draw_gauge(&mut self, value: f32, reference: Option<f32>) -> Result<(), DisplayError> {
        gauge::draw_gauge(&mut self.target, &self.face, value, reference)
            .map_err(|_| DisplayError::Communication)
    }

    fn draw_splash(&mut self, title: &str) -> Result<(), DisplayError> {
        boot::draw_splash(&mut self.target, self.logo.as_ref(), title)
            .map_err(|_| DisplayError::Communication)
    }

    fn draw_status(&mut self, text: &str) -> Result<(), DisplayError> {
        boot::draw_status(&mut self.target, text).map_err(|_| DisplayError::Communication)
    }
}
