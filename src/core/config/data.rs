use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Startup defaults read from `config.toml`.
///
/// Every field is optional; missing values fall back to the built-in
/// defaults when a [`crate::core::settings::Settings`] is derived from the
/// config. Chat sessions never write back to this file.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct Config {
    /// Model selected when a session starts (e.g., "llama-3.1-8b-instant")
    pub default_model: Option<String>,
    /// Sampling temperature, clamped to 0.0..=2.0 when applied
    pub temperature: Option<f32>,
    /// Completion token bound, clamped to 256..=8192 when applied
    pub max_tokens: Option<u32>,
    /// Override for the OpenAI-compatible API root
    pub base_url: Option<String>,
    /// Append the transcript to this file for every session
    pub log_file: Option<String>,
}

/// Get a user-friendly display string for a path
/// Converts absolute paths to use ~ notation on Unix-like systems when possible
///
/// # Examples
/// - Unix: `/home/user/.config/groqchat/config.toml` → `~/.config/groqchat/config.toml`
/// - macOS: `/Users/user/Library/Application Support/...` → `~/Library/Application Support/...`
pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let home_path = PathBuf::from(home);
            if let Ok(relative) = path.strip_prefix(&home_path) {
                return format!("~/{}", relative.display());
            }
        }
    }

    path.display().to_string()
}
