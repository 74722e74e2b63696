//! Loop configuration
//!
//! Defaults reproduce the device behaviour. The firmware overrides them
//! from its embedded `device.toml`.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::wifi::ReconnectPolicy;

/// Gauge animation settings
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GaugeConfig {
    /// Value of the green reference needle; negative hides it
    pub reference: f32,
    /// Interval between random-walk steps (ms)
    pub tick_ms: u64,
    /// How long the boot screen stays up before the first step (ms)
    pub boot_hold_ms: u64,
    /// Largest random-walk step in either direction
    pub step: u8,
}

impl Default for GaugeConfig {
    fn default() -> Self {
        Self {
            reference: 50.0,
            tick_ms: 1000,
            boot_hold_ms: 20_000,
            step: 5,
        }
    }
}

impl GaugeConfig {
    /// Reference needle value, if it should be drawn
    pub fn reference_needle(&self) -> Option<f32> {
        (self.reference >= 0.0).then_some(self.reference)
    }
}

/// Everything the event loop needs to know besides its peripherals
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LoopConfig {
    pub gauge: GaugeConfig,
    /// Hard limit on one HTTP connection, measured from accept (ms)
    pub http_timeout_ms: u64,
    /// Sleep at the end of every tick (ms); debounces the buttons
    pub delay_ms: u32,
    /// Backlight level set at boot
    pub brightness: u8,
    pub reconnect: ReconnectPolicy,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            gauge: GaugeConfig::default(),
            http_timeout_ms: 2000,
            delay_ms: 20,
            brightness: 100,
            reconnect: ReconnectPolicy::default(),
        }
    }
}
