//! Board-agnostic core logic for the Screen Capture firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Framebuffer-to-image streaming (BMP and PPM)
//! - Remote control latches and gauge presets
//! - Animation cadence and random walk
//! - WiFi reconnect policy
//! - HTTP request servicing
//! - The cooperative event loop tying it all together

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod assets;
pub mod capture;
pub mod config;
pub mod control;
pub mod event_loop;
pub mod rng;
pub mod server;
pub mod timer;
pub mod traits;
pub mod wifi;

#[cfg(test)]
mod mock;

pub use assets::Assets;
pub use capture::{CaptureError, ImageFormat, SaveError};
pub use config::LoopConfig;
pub use event_loop::{Board, EventLoop, Peripherals, TickReport};
pub use traits::GaugeView;
