//! Host implementation of the Screen Capture HAL
//!
//! This crate provides std-backed implementations of the shared
//! `screencap-hal` traits so the firmware runs as a regular process:
//!
//! - `TcpAdapter` / `TcpClient`: non-blocking listener, one client at a time
//! - `DirStorage`: a directory standing in for the SD card root
//! - `ConsoleButtons`: keys `a`, `b`, `c` on stdin act as the three buttons
//! - `StdClock`: monotonic clock on `Instant`
//! - `HostLink`: the host network, always associated once started

pub mod clock;
pub mod input;
pub mod net;
pub mod storage;
pub mod wifi;

pub use clock::StdClock;
pub use input::ConsoleButtons;
pub use net::{TcpAdapter, TcpClient};
pub use storage::{DirStorage, HostFile};
pub use wifi::HostLink;
