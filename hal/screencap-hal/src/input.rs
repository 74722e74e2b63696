//! Front button abstractions

/// The three front buttons, left to right
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    A,
    B,
    C,
}

impl Button {
    /// All buttons in service order
    pub const ALL: [Button; 3] = [Button::A, Button::B, Button::C];

    /// Zero-based position of the button
    pub const fn index(self) -> usize {
        match self {
            Button::A => 0,
            Button::B => 1,
            Button::C => 2,
        }
    }
}

/// Edge-triggered button input
///
/// The driver samples and debounces the pins in `update`. A press edge is
/// reported by `was_pressed` for exactly one `update` cycle.
pub trait Buttons {
    /// Sample the inputs and refresh edge state
    fn update(&mut self);

    /// Whether `button` went down during the last `update`
    fn was_pressed(&self, button: Button) -> bool;
}
