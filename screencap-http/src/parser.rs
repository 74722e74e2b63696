//! Line-oriented request parser
//!
//! The parser is fed one byte at a time. Carriage returns are dropped, a
//! line feed ends the current line. The first blank line ends the request
//! head and yields the classification of the last `GET` line seen.

use heapless::Vec;

use crate::route::{classify, Request, Route};

/// Longest line kept in full
///
/// Only the request-line prefix matters for classification; bytes past
/// this length are dropped.
pub const MAX_LINE_LEN: usize = 128;

/// Output of [`RequestParser::feed`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parsed<'a> {
    /// A non-empty line was completed
    Line(Line<'a>),
    /// The blank line ending the request head was received
    Complete(Route),
}

/// A completed, non-empty line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// Line text without the terminator (lossy: non UTF-8 lines are empty)
    pub text: &'a str,
    /// Classification when the line is a `GET` request line
    pub request: Option<Request>,
}

/// State machine for parsing one request head
#[derive(Debug, Clone)]
pub struct RequestParser {
    line: Vec<u8, MAX_LINE_LEN>,
    route: Route,
    /// The previous call handed out a borrow of `line`
    line_done: bool,
}

impl Default for RequestParser {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestParser {
    /// Create a parser for a freshly accepted connection
    pub fn new() -> Self {
        Self {
            line: Vec::new(),
            route: Route::Unknown,
            line_done: false,
        }
    }

    /// Reset the parser for a new connection
    pub fn reset(&mut self) {
        self.line.clear();
        self.route = Route::Unknown;
        self.line_done = false;
    }

    /// Classification so far
    pub fn route(&self) -> Route {
        self.route
    }

    /// Feed a single byte
    ///
    /// Returns `Some` when a line was completed or the head ended,
    /// `None` while more bytes are needed.
    pub fn feed(&mut self, byte: u8) -> Option<Parsed<'_>> {
        if self.line_done {
            self.line.clear();
            self.line_done = false;
        }

        match byte {
            b'\r' => None,
            b'\n' if self.line.is_empty() => Some(Parsed::Complete(self.route)),
            b'\n' => {
                let request = classify(&self.line);
                if let Some(request) = request {
                    self.route = request.route;
                }
                self.line_done = true;
                Some(Parsed::Line(Line {
                    text: core::str::from_utf8(&self.line).unwrap_or(""),
                    request,
                }))
            }
            _ => {
                // Overlong lines are truncated; the prefix is what matters
                let _ = self.line.push(byte);
                None
            }
        }
    }

    /// Feed multiple bytes, stopping at the end of the request head
    ///
    /// Returns the route and the number of bytes consumed once the blank
    /// line was seen.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Option<(Route, usize)> {
        for (i, &byte) in bytes.iter().enumerate() {
            if let Some(Parsed::Complete(route)) = self.feed(byte) {
                return Some((route, i + 1));
            }
        }
        None
    }
}
