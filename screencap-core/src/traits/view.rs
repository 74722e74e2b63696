//! Gauge view trait

use screencap_hal::{DisplayError, Framebuffer};

/// A panel that can draw the two application screens and read them back
///
/// Values outside 0..=100 hide the corresponding needle.
pub trait GaugeView: Framebuffer {
    /// Draw the gauge face with the red arrow at `value` and, if given,
    /// the green needle at `reference`
    fn draw_gauge(&mut self, value: f32, reference: Option<f32>) -> Result<(), DisplayError>;

    /// Draw the boot screen: logo and `title`
    fn draw_splash(&mut self, title: &str) -> Result<(), DisplayError>;

    /// Draw a one-line status near the bottom of the boot screen
    fn draw_status(&mut self, text: &str) -> Result<(), DisplayError>;
}
