//! Screen Capture - host firmware
//!
//! Runs the device application as a regular process: the gauge is drawn
//! into an in-memory panel, the web page is served on a TCP port, the SD
//! card is a directory and the three buttons are the keys `a`, `b`, `c`.
//!
//! Other console keys:
//! - `p`: save the screen as `/screen.ppm`
//! - `s`: save the screen as `/screen.bmp`
//! - `q`: quit

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use embedded_graphics::image::{ImageRaw, ImageRawLE};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use screencap_core::{EventLoop, ImageFormat, Peripherals, SaveError};
use screencap_display::{GaugeFace, GaugePanel, MemoryFramebuffer};
use screencap_hal_std::{ConsoleButtons, DirStorage, HostLink, StdClock, TcpAdapter};

use crate::assets::{AssetStore, LOGO_SIZE};
use crate::board::HostBoard;
use crate::config::DeviceConfig;

mod assets;
mod board;
mod config;
mod report;
#[cfg(test)]
mod text;

#[derive(Parser)]
#[command(name = "screencap-firmware")]
#[command(about = "Gauge demo with web remote control and screenshots")]
struct Cli {
    /// HTTP port (defaults to [http] port in device.toml)
    #[arg(short, long)]
    port: Option<u16>,

    /// Directory standing in for the SD card root
    #[arg(short, long, default_value = "sdcard")]
    storage: PathBuf,

    /// Directory with replacement web assets and artwork
    #[arg(short, long)]
    assets: Option<PathBuf>,

    /// Seed for the gauge random walk (defaults to the current time)
    #[arg(long)]
    seed: Option<u32>,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).with_target(false).try_init();

    let cli = Cli::parse();

    let config = DeviceConfig::embedded()?;
    let store = AssetStore::load(cli.assets.as_deref()).context("loading assets")?;
    let (width, height) = (config.display.width, config.display.height);

    std::fs::create_dir_all(&cli.storage)
        .with_context(|| format!("creating {}", cli.storage.display()))?;

    let port = cli.port.unwrap_or(config.http.port);
    let net = TcpAdapter::bind(("0.0.0.0", port))
        .with_context(|| format!("binding HTTP port {} (try --port)", port))?;
    info!("HTTP server on {}", net.local_addr()?);

    let mut pixels = vec![Rgb565::BLACK; usize::from(width) * usize::from(height)];
    let framebuffer = MemoryFramebuffer::new(&mut pixels, width, height)
        .map_err(|e| anyhow!("framebuffer: {:?}", e))?;

    let mut panel = GaugePanel::new(framebuffer);
    match store.logo_bitmap() {
        Some(logo) => panel = panel.with_logo(ImageRaw::new(logo, LOGO_SIZE)),
        None => warn!("logo bitmap has the wrong size, boot screen shows the title only"),
    }
    if let Some(face) = store.gauge_face_for(width, height) {
        info!("using bitmap gauge face");
        panel = panel.with_face(GaugeFace::Bitmap(ImageRawLE::new(face, u32::from(width))));
    }

    let periph = Peripherals::<HostBoard<'_>> {
        display: panel,
        storage: DirStorage::new(&cli.storage),
        net,
        wifi: HostLink::detect(),
        buttons: ConsoleButtons::stdin(),
        clock: StdClock::new(),
    };

    let seed = cli.seed.unwrap_or_else(time_seed);
    let mut app = EventLoop::new(
        periph,
        config.loop_config(),
        config.credentials(),
        store.as_assets(),
        seed,
    );

    info!("keys: a/b/c buttons, p = PPM, s = BMP, q = quit");
    let boot = app.boot();
    report::log_boot(&boot);

    let mut console_open = true;
    loop {
        let tick = app.tick();
        report::log_tick(&tick);

        while let Some(key) = app.peripherals_mut().buttons.take_command() {
            match key {
                'p' => {
                    let path = screen_path(ImageFormat::Ppm);
                    log_capture(&path, app.capture_ppm(&path));
                }
                's' => {
                    let path = screen_path(ImageFormat::Bmp);
                    log_capture(&path, app.capture_bmp(&path));
                }
                'q' => {
                    info!("bye");
                    return Ok(());
                }
                other => warn!("unknown key {:?}", other),
            }
        }

        if console_open && app.peripherals().buttons.is_closed() {
            info!("console closed; buttons are still available from the web page");
            console_open = false;
        }
    }
}

fn screen_path(format: ImageFormat) -> String {
    format!("/screen.{}", format.extension())
}

fn log_capture(path: &str, result: Result<usize, SaveError>) {
    match result {
        Ok(bytes) => info!("saved {} ({} bytes)", path, bytes),
        Err(e) => error!("saving {} failed: {:?}", path, e),
    }
}

/// Sub-second clock bits; enough to vary the walk between runs
fn time_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
