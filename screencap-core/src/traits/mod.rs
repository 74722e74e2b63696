//! Traits the core needs on top of the HAL
//!
//! The HAL covers raw hardware capabilities; these describe what the
//! application draws, leaving the pixels to a renderer crate.

pub mod view;

pub use view::GaugeView;
