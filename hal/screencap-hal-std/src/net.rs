//! TCP listener and client
//!
//! The listener is non-blocking so `accept` can be polled once per tick.
//! Accepted sockets are blocking with a write timeout; readiness is probed
//! with a one-byte non-blocking read that is kept as lookahead.

use std::io;
use std::net::{Shutdown, SocketAddr, TcpListener, TcpStream, ToSocketAddrs};
use std::time::Duration;

use embedded_io::{ErrorType, Read, ReadReady, Write};
use screencap_hal::{NetClient, NetworkAdapter};

/// Upper bound on a single blocking send or receive
pub const IO_TIMEOUT: Duration = Duration::from_secs(2);

/// Listening socket handing out one client at a time
#[derive(Debug)]
pub struct TcpAdapter {
    listener: TcpListener,
}

impl TcpAdapter {
    /// Bind and listen on `addr`
    pub fn bind(addr: impl ToSocketAddrs) -> io::Result<Self> {
        let listener = TcpListener::bind(addr)?;
        listener.set_nonblocking(true)?;
        Ok(Self { listener })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

impl NetworkAdapter for TcpAdapter {
    type Client = TcpClient;

    fn accept(&mut self) -> Option<Self::Client> {
        match self.listener.accept() {
            Ok((stream, peer)) => match TcpClient::new(stream) {
                Ok(client) => {
                    tracing::trace!("accepted {}", peer);
                    Some(client)
                }
                Err(e) => {
                    tracing::warn!("failed to set up client {}: {}", peer, e);
                    None
                }
            },
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => None,
            Err(e) => {
                tracing::warn!("accept failed: {}", e);
                None
            }
        }
    }
}

/// One accepted connection
#[derive(Debug)]
pub struct TcpClient {
    stream: TcpStream,
    lookahead: Option<u8>,
    peer_closed: bool,
    closed: bool,
}

impl TcpClient {
    fn new(stream: TcpStream) -> io::Result<Self> {
        // Some platforms hand out sockets inheriting the listener's mode
        stream.set_nonblocking(false)?;
        stream.set_read_timeout(Some(IO_TIMEOUT))?;
        stream.set_write_timeout(Some(IO_TIMEOUT))?;
        stream.set_nodelay(true)?;
        Ok(Self {
            stream,
            lookahead: None,
            peer_closed: false,
            closed: false,
        })
    }

    /// Try to pull one byte without blocking
    fn poll_byte(&mut self) -> io::Result<bool> {
        if self.lookahead.is_some() {
            return Ok(true);
        }
        if self.closed || self.peer_closed {
            return Ok(false);
        }

        let mut byte = [0u8; 1];
        self.stream.set_nonblocking(true)?;
        let result = io::Read::read(&mut self.stream, &mut byte);
        self.stream.set_nonblocking(false)?;

        match result {
            Ok(0) => {
                self.peer_closed = true;
                Ok(false)
            }
            Ok(_) => {
                self.lookahead = Some(byte[0]);
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => Ok(false),
            Err(e) => Err(e),
        }
    }
}

impl ErrorType for TcpClient {
    type Error = io::Error;
}

impl Read for TcpClient {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        if buf.is_empty() {
            return Ok(0);
        }
        if let Some(byte) = self.lookahead.take() {
            buf[0] = byte;
            return Ok(1);
        }
        if self.closed {
            return Ok(0);
        }
        io::Read::read(&mut self.stream, buf)
    }
}

impl ReadReady for TcpClient {
    fn read_ready(&mut self) -> Result<bool, Self::Error> {
        self.poll_byte()
    }
}

impl Write for TcpClient {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        if self.closed {
            return Err(io::ErrorKind::NotConnected.into());
        }
        match io::Write::write(&mut self.stream, buf)? {
            0 if !buf.is_empty() => Err(io::ErrorKind::WriteZero.into()),
            n => Ok(n),
        }
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        io::Write::flush(&mut self.stream)
    }
}

impl NetClient for TcpClient {
    /// Open from our side, and either the peer has not hung up or there is
    /// still unread data
    fn is_connected(&mut self) -> bool {
        if self.closed {
            return false;
        }
        match self.poll_byte() {
            Ok(ready) => ready || !self.peer_closed,
            Err(_) => false,
        }
    }

    fn close(&mut self) {
        if !self.closed {
            let _ = io::Write::flush(&mut self.stream);
            let _ = self.stream.shutdown(Shutdown::Both);
            self.closed = true;
        }
    }
}

impl Drop for TcpClient {
    fn drop(&mut self) {
        self.close();
    }
}
