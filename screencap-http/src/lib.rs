//! HTTP surface of the Screen Capture firmware
//!
//! The device speaks just enough HTTP to serve a status page, a handful of
//! static images and a live screenshot, and to accept remote button presses.
//!
//! # Request handling
//!
//! ```text
//! bytes ──► RequestParser ──► Line (request line classified against ROUTES)
//!                         └─► Complete(Route) on the blank line
//! ```
//!
//! Requests are parsed one byte at a time so the server never needs more
//! than one short line buffer per connection. Only the request target is
//! inspected; headers are accepted and ignored. Every response is followed
//! by closing the connection.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod parser;
pub mod response;
pub mod route;

pub use parser::{Line, Parsed, RequestParser, MAX_LINE_LEN};
pub use response::{write_head, write_trailer, ContentType, Status, NOT_FOUND_BODY};
pub use route::{classify, Request, Route, ROUTES};
