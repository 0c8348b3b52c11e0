//! Diagnostic tracing output.
//!
//! The TUI owns the terminal, so diagnostics go to a file in the platform
//! cache directory and only when `GROQCHAT_LOG` is set (an `EnvFilter`
//! directive such as `debug` or `groqchat=trace`).

use directories::ProjectDirs;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "GROQCHAT_LOG";

/// Install the global subscriber. Returns the log path when enabled.
pub fn init_tracing() -> Option<PathBuf> {
    let directive = std::env::var(LOG_ENV).ok()?;
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("info"));

    let dir = ProjectDirs::from("org", "groqchat", "groqchat")?
        .cache_dir()
        .to_path_buf();
    fs::create_dir_all(&dir).ok()?;
    let path = dir.join("groqchat.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .ok()?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .ok()?;

    Some(path)
}
