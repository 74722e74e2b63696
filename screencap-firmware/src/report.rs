//! Console log of what the event loop did

use screencap_core::event_loop::{BootReport, PressSource, SaveOutcome};
use screencap_core::server::{ClientOutcome, ClientReport};
use screencap_core::wifi::WifiOutcome;
use screencap_core::TickReport;
use tracing::{debug, error, info, warn};

pub fn log_boot(report: &BootReport) {
    log_wifi(&report.wifi, true);
    let [a, b, c, d] = report.ip;
    info!("IP: {}.{}.{}.{}", a, b, c, d);
    if let Some(e) = report.redraw_error {
        error!("boot screen draw failed: {:?}", e);
    }
}

pub fn log_tick(report: &TickReport) {
    for action in &report.actions {
        let source = match action.source {
            PressSource::Local => "button",
            PressSource::Remote => "web",
            PressSource::Both => "button+web",
        };
        info!("{:?} ({}) -> gauge {}", action.button, source, action.value);
        match action.save {
            SaveOutcome::Saved { bytes } => info!("saved {} ({} bytes)", action.path, bytes),
            SaveOutcome::OpenFailed(e) => error!("cannot open {}: {:?}", action.path, e),
            SaveOutcome::WriteFailed(e) => error!("{} truncated: {:?}", action.path, e),
        }
    }

    if let Some(step) = report.animation {
        debug!("gauge {:+} -> {}", step.delta, step.value);
    }

    if let Some(e) = report.redraw_error {
        error!("gauge redraw failed: {:?}", e);
    }

    if let Some(wifi) = &report.wifi {
        warn!("[ERR] Lost WiFi connection, reconnecting...");
        log_wifi(wifi, false);
    }

    if let Some(client) = &report.client {
        log_client(client);
    }
}

fn log_wifi(outcome: &WifiOutcome, boot: bool) {
    for (trial, status) in outcome.statuses.iter().enumerate() {
        if status.is_error() {
            warn!("wifi trial {}: {:?}", trial + 1, status);
        } else {
            debug!("wifi trial {}: {:?}", trial + 1, status);
        }
    }
    match (outcome.connected, boot) {
        (true, true) => info!("WiFi connected"),
        (true, false) => info!("[OK] WiFi reconnected"),
        (false, _) => error!("[ERR] unable to reconnect"),
    }
}

fn log_client(client: &ClientReport) {
    info!("New Client.");
    if let Some(line) = &client.request_line {
        debug!("{}", line);
    }
    debug!("{} request lines", client.lines);
    match client.outcome {
        ClientOutcome::Served { route, body_bytes } => {
            info!("served {:?} ({} body bytes)", route, body_bytes);
            info!("Client Disconnected.");
        }
        ClientOutcome::Truncated { route, error } => {
            warn!("response for {:?} cut short: {:?}", route, error);
            info!("Client Disconnected.");
        }
        ClientOutcome::TimedOut => warn!("Force Client stop!"),
        ClientOutcome::Disconnected => info!("Client Disconnected."),
    }
}
