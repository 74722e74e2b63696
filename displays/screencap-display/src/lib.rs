//! Gauge and boot screen rendering for the Screen Capture firmware
//!
//! This crate provides:
//! - Needle geometry for the 0-100 gauge
//! - Gauge face and needle drawing on any `embedded-graphics` target
//! - The boot screen (logo, title, IP line)
//! - `MemoryFramebuffer`, an RGB565 draw target that can read itself back
//! - `GaugePanel`, which ties a target to the core's `GaugeView` trait
//!
//! # Architecture
//!
//! Drawing goes through `embedded-graphics` so the same code drives a real
//! TFT or an in-memory buffer. Reading pixels back for screenshots is the
//! one thing `embedded-graphics` cannot do, so the target must also
//! implement `screencap_hal::Framebuffer`.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod boot;
pub mod framebuffer;
pub mod gauge;
pub mod geometry;
pub mod panel;

pub use framebuffer::MemoryFramebuffer;
pub use gauge::GaugeFace;
pub use panel::GaugePanel;
