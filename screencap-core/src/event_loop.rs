//! Cooperative event loop
//!
//! One tick, in order:
//!
//! 1. refresh button edges
//! 2. service A, B, C: physical edge or remote latch jumps the gauge to
//!    its preset, redraws and dumps the screen to storage
//! 3. step the random walk when the cadence is due
//! 4. bring WiFi back if it dropped
//! 5. serve at most one HTTP client
//! 6. sleep for the debounce delay
//!
//! Nothing in a tick fails. Every error ends up in the [`TickReport`] for
//! the platform to log.

use core::fmt::Write as _;

use heapless::{String, Vec};
use screencap_hal::{
    Backlight, Button, Buttons, Clock, DisplayError, NetworkAdapter, Storage, WifiLink,
};

use crate::assets::Assets;
use crate::capture::{self, ImageFormat, SaveError};
use crate::config::LoopConfig;
use crate::control::{preset, ControlLatches};
use crate::rng::Rng;
use crate::server::{ClientReport, Server};
use crate::timer::Cadence;
use crate::traits::GaugeView;
use crate::wifi::{self, Credentials, WifiOutcome};

/// Title shown on the boot screen
pub const TITLE: &str = "Screen Capture";

/// Gauge range
pub const GAUGE_MIN: i16 = 0;
pub const GAUGE_MAX: i16 = 100;

/// The set of peripherals a platform provides
pub trait Board {
    type Display: GaugeView + Backlight;
    type Storage: Storage;
    type Net: NetworkAdapter;
    type Wifi: WifiLink;
    type Buttons: Buttons;
    type Clock: Clock;
}

/// Owned peripherals of a [`Board`]
pub struct Peripherals<B: Board> {
    pub display: B::Display,
    pub storage: B::Storage,
    pub net: B::Net,
    pub wifi: B::Wifi,
    pub buttons: B::Buttons,
    pub clock: B::Clock,
}

/// Where a button action came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PressSource {
    Local,
    Remote,
    Both,
}

/// Result of saving a screen to storage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SaveOutcome {
    Saved { bytes: usize },
    /// File could not be created; the redraw still happened
    OpenFailed(screencap_hal::StorageError),
    /// File is truncated
    WriteFailed(capture::CaptureError<embedded_io::ErrorKind>),
}

impl From<Result<usize, SaveError>> for SaveOutcome {
    fn from(result: Result<usize, SaveError>) -> Self {
        match result {
            Ok(bytes) => SaveOutcome::Saved { bytes },
            Err(SaveError::Open(e)) => SaveOutcome::OpenFailed(e),
            Err(SaveError::Capture(e)) => SaveOutcome::WriteFailed(e),
        }
    }
}

/// One serviced button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonAction {
    pub button: Button,
    pub source: PressSource,
    pub value: u8,
    pub path: &'static str,
    pub save: SaveOutcome,
}

/// One random-walk step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AnimationStep {
    pub delta: i16,
    pub value: u8,
}

/// Everything that happened during one tick
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickReport {
    pub actions: Vec<ButtonAction, 3>,
    pub animation: Option<AnimationStep>,
    /// Last redraw failure, if any
    pub redraw_error: Option<DisplayError>,
    /// Present when the link was down and a reconnect was attempted
    pub wifi: Option<WifiOutcome>,
    pub client: Option<ClientReport>,
}

/// What happened during boot
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BootReport {
    pub wifi: WifiOutcome,
    pub ip: [u8; 4],
    pub redraw_error: Option<DisplayError>,
}

/// Application state plus the peripherals it drives
pub struct EventLoop<'a, B: Board> {
    periph: Peripherals<B>,
    config: LoopConfig,
    credentials: Credentials<'a>,
    server: Server<'a>,
    latches: ControlLatches,
    gauge: i16,
    cadence: Cadence,
    rng: Rng,
}

impl<'a, B: Board> EventLoop<'a, B> {
    pub fn new(
        periph: Peripherals<B>,
        config: LoopConfig,
        credentials: Credentials<'a>,
        assets: Assets<'a>,
        seed: u32,
    ) -> Self {
        let now = periph.clock.now_ms();
        Self {
            cadence: Cadence::new(now, config.gauge.boot_hold_ms, config.gauge.tick_ms),
            server: Server::new(assets, config.http_timeout_ms),
            periph,
            config,
            credentials,
            latches: ControlLatches::new(),
            gauge: GAUGE_MIN,
            rng: Rng::new(seed),
        }
    }

    /// Show the boot screen and join the network
    ///
    /// The gauge takes over `boot_hold_ms` after this returns, or earlier
    /// if a button is pressed.
    pub fn boot(&mut self) -> BootReport {
        let mut redraw_error = None;
        self.periph.display.set_brightness(self.config.brightness);
        if let Err(e) = self.periph.display.draw_splash(TITLE) {
            redraw_error = Some(e);
        }

        let wifi = wifi::reconnect(
            &mut self.periph.wifi,
            &mut self.periph.clock,
            &self.credentials,
            &self.config.reconnect,
        );
        let ip = self.periph.wifi.local_ip().unwrap_or([0; 4]);

        let mut status: String<24> = String::new();
        // Cannot overflow: "IP: 255.255.255.255" is 19 bytes
        let _ = write!(status, "IP: {}.{}.{}.{}", ip[0], ip[1], ip[2], ip[3]);
        if let Err(e) = self.periph.display.draw_status(&status) {
            redraw_error = Some(e);
        }

        self.cadence = Cadence::new(
            self.periph.clock.now_ms(),
            self.config.gauge.boot_hold_ms,
            self.config.gauge.tick_ms,
        );

        BootReport {
            wifi,
            ip,
            redraw_error,
        }
    }

    /// Run one pass of the loop
    pub fn tick(&mut self) -> TickReport {
        let mut report = TickReport::default();

        self.periph.buttons.update();
        let now = self.periph.clock.now_ms();

        for button in Button::ALL {
            let local = self.periph.buttons.was_pressed(button);
            let remote = self.latches.take(button);
            let source = match (local, remote) {
                (true, true) => PressSource::Both,
                (true, false) => PressSource::Local,
                (false, true) => PressSource::Remote,
                (false, false) => continue,
            };

            let preset = preset(button);
            self.gauge = i16::from(preset.value);
            self.redraw(&mut report);
            let save = self.save(preset.path, ImageFormat::Bmp).into();
            self.cadence.restart(self.periph.clock.now_ms());

            // Cannot overflow: one entry per button
            let _ = report.actions.push(ButtonAction {
                button,
                source,
                value: preset.value,
                path: preset.path,
                save,
            });
        }

        if self.cadence.after(now) {
            let delta = self.rng.step(self.config.gauge.step);
            self.gauge = (self.gauge + delta).clamp(GAUGE_MIN, GAUGE_MAX);
            self.redraw(&mut report);
            self.cadence.restart(self.periph.clock.now_ms());
            report.animation = Some(AnimationStep {
                delta,
                value: self.gauge_value(),
            });
        }

        report.wifi = wifi::ensure_connected(
            &mut self.periph.wifi,
            &mut self.periph.clock,
            &self.credentials,
            &self.config.reconnect,
        );

        if self.periph.wifi.status().is_connected() {
            if let Some(mut client) = self.periph.net.accept() {
                report.client = Some(self.server.serve(
                    &mut client,
                    &mut self.periph.clock,
                    &mut self.periph.display,
                    &mut self.latches,
                ));
            }
        }

        self.periph.clock.delay_ms(self.config.delay_ms);
        report
    }

    /// Save the current screen as PPM
    pub fn capture_ppm(&mut self, path: &str) -> Result<usize, SaveError> {
        self.save(path, ImageFormat::Ppm)
    }

    /// Save the current screen as BMP
    pub fn capture_bmp(&mut self, path: &str) -> Result<usize, SaveError> {
        self.save(path, ImageFormat::Bmp)
    }

    /// Current gauge value, always within 0..=100
    pub fn gauge_value(&self) -> u8 {
        self.gauge.clamp(GAUGE_MIN, GAUGE_MAX) as u8
    }

    pub fn latches(&self) -> &ControlLatches {
        &self.latches
    }

    pub fn next_tick_ms(&self) -> u64 {
        self.cadence.next_ms()
    }

    pub fn peripherals(&self) -> &Peripherals<B> {
        &self.periph
    }

    pub fn peripherals_mut(&mut self) -> &mut Peripherals<B> {
        &mut self.periph
    }

    fn redraw(&mut self, report: &mut TickReport) {
        self.gauge = self.gauge.clamp(GAUGE_MIN, GAUGE_MAX);
        let reference = self.config.gauge.reference_needle();
        if let Err(e) = self
            .periph
            .display
            .draw_gauge(f32::from(self.gauge), reference)
        {
            report.redraw_error = Some(e);
        }
    }

    fn save(&mut self, path: &str, format: ImageFormat) -> Result<usize, SaveError> {
        capture::save(
            &mut self.periph.storage,
            &mut self.periph.display,
            path,
            format,
        )
    }
}
