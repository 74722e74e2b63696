//! Screen Capture Hardware Abstraction Layer
//!
//! This crate defines the hardware traits the capture firmware is written
//! against. Board crates implement them for real peripherals (TFT, SD card,
//! WiFi radio, push buttons); the host build implements them on top of `std`.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  screencap-firmware                     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  screencap-core / screencap-display     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  screencap-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ screencap-hal-│       │  board HALs   │
//! │     std       │       │  (external)   │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`display::Framebuffer`], [`display::Backlight`] - Display read-back
//! - [`storage::Storage`] - Removable storage (files are byte sinks)
//! - [`net::NetworkAdapter`], [`net::NetClient`] - TCP server plumbing
//! - [`wifi::WifiLink`] - Station-mode link control
//! - [`input::Buttons`] - Edge-triggered front buttons
//! - [`clock::Clock`] - Millisecond time base
//!
//! Byte sinks are [`embedded_io::Write`] implementations: a sink either
//! accepts every byte handed to `write_all` or reports an error.

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod display;
pub mod input;
pub mod net;
pub mod storage;
pub mod wifi;

pub use embedded_io;

// Re-export key traits at crate root for convenience
pub use clock::Clock;
pub use display::{Backlight, DisplayError, Framebuffer, BYTES_PER_PIXEL};
pub use input::{Button, Buttons};
pub use net::{NetClient, NetworkAdapter};
pub use storage::{Storage, StorageError};
pub use wifi::{LinkStatus, WifiLink};
