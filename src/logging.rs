//! Diagnostic logging
//!
//! The terminal is owned by the UI, so logs only go to a file, and only
//! when `GUIA_LENHADOR_LOG` names one. `RUST_LOG` sets the level.

use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_ENV: &str = "GUIA_LENHADOR_LOG";

pub fn init_tracing() {
    let Ok(log_path) = std::env::var(LOG_ENV) else {
        return;
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Warning: failed to open log file {}: {}", log_path, e);
            return;
        }
    };

    let file_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init();
}
