//! TCP server abstractions
//!
//! A single listening socket hands out at most one client at a time. The
//! client is a plain byte stream built on the `embedded-io` traits.

use embedded_io::{Read, ReadReady, Write};

/// Listening socket bound to the HTTP port
pub trait NetworkAdapter {
    /// Accepted connection type
    type Client: NetClient;

    /// Accept one pending connection, if any
    ///
    /// Must not block when no client is waiting.
    fn accept(&mut self) -> Option<Self::Client>;
}

/// Accepted TCP connection
///
/// `read_ready` tells whether at least one byte can be read without
/// blocking. Writes go through `write_all`; a partial send surfaces as an
/// error, never as a silent short write.
pub trait NetClient: Read + Write + ReadReady {
    /// Whether the peer is still connected or unread data remains
    fn is_connected(&mut self) -> bool;

    /// Close the connection
    fn close(&mut self);

    /// Read a single byte
    fn read_byte(&mut self) -> Result<Option<u8>, Self::Error> {
        let mut byte = [0u8; 1];
        match self.read(&mut byte)? {
            0 => Ok(None),
            _ => Ok(Some(byte[0])),
        }
    }
}
