//! Remote control latches and gauge presets

use screencap_hal::Button;

/// What a button does: jump the gauge to a value and dump the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Preset {
    pub value: u8,
    /// Storage path the resulting screen is saved to
    pub path: &'static str,
}

/// Presets for A, B and C, in that order
pub const PRESETS: [Preset; 3] = [
    Preset {
        value: 0,
        path: "/gauge_0.bmp",
    },
    Preset {
        value: 50,
        path: "/gauge_50.bmp",
    },
    Preset {
        value: 100,
        path: "/gauge_100.bmp",
    },
];

/// Preset bound to `button`
pub fn preset(button: Button) -> Preset {
    PRESETS[button.index()]
}

/// Three latched "pressed remotely" flags
///
/// Set from the HTTP path, consumed once by the loop. Setting a flag that
/// is already set does nothing, so repeated requests between two ticks
/// coalesce into one action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlLatches {
    flags: [bool; 3],
}

impl ControlLatches {
    pub const fn new() -> Self {
        Self { flags: [false; 3] }
    }

    pub fn set(&mut self, button: Button) {
        self.flags[button.index()] = true;
    }

    pub fn is_set(&self, button: Button) -> bool {
        self.flags[button.index()]
    }

    /// Read and clear the flag for `button`
    pub fn take(&mut self, button: Button) -> bool {
        core::mem::take(&mut self.flags[button.index()])
    }
}
