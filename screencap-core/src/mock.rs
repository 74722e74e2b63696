//! Mock HAL implementations for host tests

use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::rc::Rc;

use embedded_io::{ErrorKind, ErrorType, Read, ReadReady, Write};
use screencap_hal::{
    Backlight, Button, Buttons, Clock, DisplayError, Framebuffer, LinkStatus, NetClient,
    NetworkAdapter, Storage, StorageError, WifiLink,
};

use crate::event_loop::Board;
use crate::traits::GaugeView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockIoError;

impl embedded_io::Error for MockIoError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Framebuffer backed by a vector, recording what was drawn
#[derive(Debug, Clone, Default)]
pub struct MockFramebuffer {
    width: u16,
    height: u16,
    pixels: Vec<[u8; 3]>,
    pub fail_reads: bool,
    pub fail_draws: bool,
    pub gauges: Vec<(f32, Option<f32>)>,
    pub splash: Option<String>,
    pub status: Option<String>,
    pub brightness: Option<u8>,
}

impl MockFramebuffer {
    pub fn from_pixels(width: u16, height: u16, pixels: &[[u8; 3]]) -> Self {
        assert_eq!(pixels.len(), usize::from(width) * usize::from(height));
        Self {
            width,
            height,
            pixels: pixels.to_vec(),
            ..Self::default()
        }
    }

    /// Every pixel distinct enough to catch row and channel mix-ups
    pub fn gradient(width: u16, height: u16) -> Self {
        let mut pixels = Vec::new();
        for y in 0..height {
            for x in 0..width {
                pixels.push([x as u8, y as u8, (x as u8).wrapping_mul(3) ^ y as u8]);
            }
        }
        Self {
            width,
            height,
            pixels,
            ..Self::default()
        }
    }

    pub fn pixel(&self, x: u16, y: u16) -> [u8; 3] {
        self.pixels[usize::from(y) * usize::from(self.width) + usize::from(x)]
    }

    fn fill(&mut self, color: [u8; 3]) {
        self.pixels.iter_mut().for_each(|p| *p = color);
    }
}

impl Framebuffer for MockFramebuffer {
    fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn read_rgb(&mut self, x: u16, y: u16, out: &mut [u8]) -> Result<(), DisplayError> {
        if self.fail_reads {
            return Err(DisplayError::Communication);
        }
        let count = out.len() / 3;
        if y >= self.height || usize::from(x) + count > usize::from(self.width) {
            return Err(DisplayError::OutOfBounds);
        }
        for (i, chunk) in out.chunks_exact_mut(3).enumerate() {
            chunk.copy_from_slice(&self.pixel(x + i as u16, y));
        }
        Ok(())
    }
}

impl GaugeView for MockFramebuffer {
    fn draw_gauge(&mut self, value: f32, reference: Option<f32>) -> Result<(), DisplayError> {
        if self.fail_draws {
            return Err(DisplayError::Communication);
        }
        self.gauges.push((value, reference));
        self.fill([value as u8, 0, 0]);
        Ok(())
    }

    fn draw_splash(&mut self, title: &str) -> Result<(), DisplayError> {
        self.splash = Some(title.to_string());
        self.fill([0, 0, 0]);
        Ok(())
    }

    fn draw_status(&mut self, text: &str) -> Result<(), DisplayError> {
        self.status = Some(text.to_string());
        Ok(())
    }
}

impl Backlight for MockFramebuffer {
    fn set_brightness(&mut self, level: u8) {
        self.brightness = Some(level);
    }
}

/// Growable sink that can be told to fail once it would exceed a size
#[derive(Debug, Default)]
pub struct VecSink {
    pub data: Vec<u8>,
    limit: Option<usize>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_after(limit: usize) -> Self {
        Self {
            data: Vec::new(),
            limit: Some(limit),
        }
    }
}

impl ErrorType for VecSink {
    type Error = MockIoError;
}

impl Write for VecSink {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        if self.limit.is_some_and(|limit| self.data.len() + buf.len() > limit) {
            return Err(MockIoError);
        }
        self.data.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// In-memory file system
#[derive(Debug, Default)]
pub struct MockStorage {
    files: BTreeMap<String, Vec<u8>>,
    pub fail_open: bool,
    pub flushes: usize,
}

impl MockStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&mut self, path: &str, contents: impl Into<Vec<u8>>) {
        self.files.insert(path.to_string(), contents.into());
    }

    pub fn file(&self, path: &str) -> Option<&[u8]> {
        self.files.get(path).map(Vec::as_slice)
    }

    pub fn paths(&self) -> Vec<&str> {
        self.files.keys().map(String::as_str).collect()
    }
}

pub struct MockFile<'a> {
    buf: &'a mut Vec<u8>,
    flushes: &'a mut usize,
}

impl ErrorType for MockFile<'_> {
    type Error = MockIoError;
}

impl Write for MockFile<'_> {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        *self.flushes += 1;
        Ok(())
    }
}

impl Storage for MockStorage {
    type File<'a> = MockFile<'a>;

    fn create(&mut self, path: &str) -> Result<Self::File<'_>, StorageError> {
        if self.fail_open {
            return Err(StorageError::OpenFailed);
        }
        let buf = self.files.entry(path.to_string()).or_default();
        buf.clear();
        Ok(MockFile {
            buf,
            flushes: &mut self.flushes,
        })
    }
}

/// What a client saw, shared so it survives the client being consumed
#[derive(Debug, Default)]
pub struct ClientLog {
    pub output: Vec<u8>,
    pub closed: bool,
}

/// Network client fed from a fixed request
#[derive(Debug)]
pub struct MockClient {
    input: VecDeque<u8>,
    log: Rc<RefCell<ClientLog>>,
    hang_up_when_drained: bool,
    write_limit: Option<usize>,
}

impl MockClient {
    pub fn new(request: &[u8]) -> Self {
        Self {
            input: request.iter().copied().collect(),
            log: Rc::default(),
            hang_up_when_drained: false,
            write_limit: None,
        }
    }

    /// Connected, never sends anything
    pub fn silent() -> Self {
        Self::new(b"")
    }

    pub fn hang_up_when_drained(&mut self) {
        self.hang_up_when_drained = true;
    }

    pub fn fail_writes_after(&mut self, limit: usize) {
        self.write_limit = Some(limit);
    }

    pub fn log(&self) -> Rc<RefCell<ClientLog>> {
        Rc::clone(&self.log)
    }

    pub fn output(&self) -> Vec<u8> {
        self.log.borrow().output.clone()
    }

    pub fn was_closed(&self) -> bool {
        self.log.borrow().closed
    }
}

impl ErrorType for MockClient {
    type Error = MockIoError;
}

impl Read for MockClient {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let mut n = 0;
        while n < buf.len() {
            match self.input.pop_front() {
                Some(byte) => {
                    buf[n] = byte;
                    n += 1;
                }
                None => break,
            }
        }
        Ok(n)
    }
}

impl ReadReady for MockClient {
    fn read_ready(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.input.is_empty())
    }
}

impl Write for MockClient {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        let mut log = self.log.borrow_mut();
        if log.closed {
            return Err(MockIoError);
        }
        if self.write_limit.is_some_and(|limit| log.output.len() + buf.len() > limit) {
            return Err(MockIoError);
        }
        log.output.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl NetClient for MockClient {
    fn is_connected(&mut self) -> bool {
        !self.log.borrow().closed && !(self.hang_up_when_drained && self.input.is_empty())
    }

    fn close(&mut self) {
        self.log.borrow_mut().closed = true;
    }
}

/// Listener handing out queued clients
#[derive(Debug, Default)]
pub struct MockNet {
    pub pending: VecDeque<MockClient>,
    pub accepts: usize,
}

impl MockNet {
    pub fn push(&mut self, client: MockClient) {
        self.pending.push_back(client);
    }
}

impl NetworkAdapter for MockNet {
    type Client = MockClient;

    fn accept(&mut self) -> Option<Self::Client> {
        let client = self.pending.pop_front()?;
        self.accepts += 1;
        Some(client)
    }
}

/// WiFi link replaying a status script; the last entry repeats
#[derive(Debug, Default)]
pub struct MockWifi {
    script: VecDeque<LinkStatus>,
    pub begins: usize,
    pub disconnects: usize,
    pub last_ssid: Option<String>,
    pub ip: Option<[u8; 4]>,
}

impl MockWifi {
    pub fn connected() -> Self {
        let mut link = Self::scripted(&[LinkStatus::Connected]);
        link.ip = Some([192, 168, 1, 42]);
        link
    }

    pub fn scripted(statuses: &[LinkStatus]) -> Self {
        Self {
            script: statuses.iter().copied().collect(),
            ..Self::default()
        }
    }
}

impl WifiLink for MockWifi {
    fn status(&mut self) -> LinkStatus {
        if self.script.len() > 1 {
            self.script.pop_front().unwrap_or(LinkStatus::Idle)
        } else {
            self.script.front().copied().unwrap_or(LinkStatus::Idle)
        }
    }

    fn begin(&mut self, ssid: &str, _passphrase: &str) {
        self.begins += 1;
        self.last_ssid = Some(ssid.to_string());
    }

    fn disconnect(&mut self) {
        self.disconnects += 1;
    }

    fn local_ip(&self) -> Option<[u8; 4]> {
        self.ip
    }
}

/// Buttons replaying one frame of edges per update
#[derive(Debug, Default)]
pub struct MockButtons {
    frames: VecDeque<[bool; 3]>,
    current: [bool; 3],
}

impl MockButtons {
    /// Queue one update in which `buttons` were pressed
    pub fn queue(&mut self, buttons: &[Button]) {
        let mut frame = [false; 3];
        for button in buttons {
            frame[button.index()] = true;
        }
        self.frames.push_back(frame);
    }
}

impl Buttons for MockButtons {
    fn update(&mut self) {
        self.current = self.frames.pop_front().unwrap_or_default();
    }

    fn was_pressed(&self, button: Button) -> bool {
        self.current[button.index()]
    }
}

/// Clock that only moves when something waits on it
#[derive(Debug, Default)]
pub struct MockClock {
    now: u64,
}

impl MockClock {
    pub fn new(now: u64) -> Self {
        Self { now }
    }

    pub fn advance(&mut self, ms: u64) {
        self.now += ms;
    }
}

impl Clock for MockClock {
    fn now_ms(&self) -> u64 {
        self.now
    }

    fn delay_ms(&mut self, ms: u32) {
        self.now += u64::from(ms);
    }
}

pub struct MockBoard;

impl Board for MockBoard {
    type Display = MockFramebuffer;
    type Storage = MockStorage;
    type Net = MockNet;
    type Wifi = MockWifi;
    type Buttons = MockButtons;
    type Clock = MockClock;
}
