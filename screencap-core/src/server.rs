//! Servicing one HTTP client
//!
//! A connection is read byte by byte until the blank line ending the
//! request head, then answered according to the route classified from the
//! request line, then closed. `/button-X` requests only set a latch; the
//! loop acts on it on its next tick, after the client already has its
//! index page.

use embedded_io::{Error as _, ErrorKind, Write};
use heapless::String;
use screencap_hal::{Clock, NetClient};
use screencap_http::{
    write_head, write_trailer, Parsed, RequestParser, Route, MAX_LINE_LEN, NOT_FOUND_BODY,
};

use crate::assets::Assets;
use crate::capture::{CaptureError, ImageFormat};
use crate::control::ControlLatches;
use crate::traits::GaugeView;

/// Poll interval while waiting for request bytes (ms)
pub const POLL_INTERVAL_MS: u32 = 1;

/// How a client was dealt with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClientOutcome {
    /// Full response written
    Served { route: Route, body_bytes: usize },
    /// Response aborted part way; the client sees a short body
    Truncated {
        route: Route,
        error: CaptureError<ErrorKind>,
    },
    /// No complete request within the timeout; nothing was sent
    TimedOut,
    /// Peer went away before finishing the request
    Disconnected,
}

/// Record of one client for the platform to log
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClientReport {
    pub outcome: ClientOutcome,
    /// The `GET` line, if one was received
    pub request_line: Option<String<MAX_LINE_LEN>>,
    /// Number of non-empty lines received, request line included
    pub lines: u16,
}

/// Per-connection HTTP handling
#[derive(Debug, Clone)]
pub struct Server<'a> {
    parser: RequestParser,
    assets: Assets<'a>,
    timeout_ms: u64,
}

impl<'a> Server<'a> {
    pub fn new(assets: Assets<'a>, timeout_ms: u64) -> Self {
        Self {
            parser: RequestParser::new(),
            assets,
            timeout_ms,
        }
    }

    /// Read one request from `client`, answer it and close the connection
    ///
    /// Blocks at most `timeout_ms` waiting for the request head. Remote
    /// button presses are recorded in `latches`.
    pub fn serve<C, K, D>(
        &mut self,
        client: &mut C,
        clock: &mut K,
        display: &mut D,
        latches: &mut ControlLatches,
    ) -> ClientReport
    where
        C: NetClient,
        K: Clock + ?Sized,
        D: GaugeView + ?Sized,
    {
        let deadline = clock.now_ms().saturating_add(self.timeout_ms);
        let mut report = ClientReport {
            outcome: ClientOutcome::Disconnected,
            request_line: None,
            lines: 0,
        };

        // Classification never carries over from a previous client
        self.parser.reset();

        let route = loop {
            if !client.is_connected() {
                break None;
            }
            if clock.now_ms() > deadline {
                report.outcome = ClientOutcome::TimedOut;
                break None;
            }
            match client.read_ready() {
                Ok(true) => {}
                Ok(false) => {
                    clock.delay_ms(POLL_INTERVAL_MS);
                    continue;
                }
                Err(_) => break None,
            }
            let byte = match client.read_byte() {
                Ok(Some(byte)) => byte,
                Ok(None) | Err(_) => break None,
            };

            match self.parser.feed(byte) {
                Some(Parsed::Line(line)) => {
                    report.lines = report.lines.saturating_add(1);
                    if let Some(request) = line.request {
                        let mut text = String::new();
                        // Fits: the parser never holds more than MAX_LINE_LEN bytes
                        let _ = text.push_str(line.text);
                        report.request_line = Some(text);
                        if let Some(button) = request.press {
                            latches.set(button);
                        }
                    }
                }
                Some(Parsed::Complete(route)) => break Some(route),
                None => {}
            }
        };

        if let Some(route) = route {
            report.outcome = match self.respond(route, client, display) {
                Ok(body_bytes) => ClientOutcome::Served { route, body_bytes },
                Err(error) => ClientOutcome::Truncated { route, error },
            };
        }

        client.close();
        report
    }

    /// Write the full response for `route`, returning the body length
    fn respond<C, D>(
        &self,
        route: Route,
        client: &mut C,
        display: &mut D,
    ) -> Result<usize, CaptureError<ErrorKind>>
    where
        C: Write,
        D: GaugeView + ?Sized,
    {
        let sink_error = |e: C::Error| CaptureError::Sink(e.kind());

        let (status, content_type) = route.response_head();
        write_head(client, status, content_type).map_err(sink_error)?;

        let body_bytes = match route {
            Route::Screenshot => ImageFormat::Bmp
                .encode(display, client)
                .map_err(|e| e.map_sink(|e| e.kind()))?,
            Route::Unknown => {
                client.write_all(NOT_FOUND_BODY).map_err(sink_error)?;
                NOT_FOUND_BODY.len()
            }
            _ => {
                let body = self.assets.body(route).unwrap_or_default();
                client.write_all(body).map_err(sink_error)?;
                body.len()
            }
        };

        write_trailer(client).map_err(sink_error)?;
        client.flush().map_err(sink_error)?;
        Ok(body_bytes)
    }
}
