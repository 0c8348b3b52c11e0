//! Plain-text transcript log.
//!
//! The log is an export only: committed user/assistant messages are
//! appended as they happen and the file is never read back.

use crate::core::message::Message;
use std::error::Error;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

pub const USER_PREFIX: &str = "You";

pub struct TranscriptLog {
    file_path: Option<String>,
    is_active: bool,
}

impl TranscriptLog {
    /// A log configured with a path starts active.
    pub fn new(log_file: Option<String>) -> Self {
        let is_active = log_file.is_some();
        Self {
            file_path: log_file,
            is_active,
        }
    }

    pub fn set_log_file(&mut self, path: String) -> Result<String, Box<dyn Error>> {
        // Fail early if the file cannot be created or appended to.
        OpenOptions::new().create(true).append(true).open(&path)?;

        self.file_path = Some(path.clone());
        self.is_active = true;
        self.log_marker(&format!(
            "Logging started {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        ))?;

        Ok(format!("Logging enabled to: {path}"))
    }

    pub fn toggle_logging(&mut self) -> Result<String, Box<dyn Error>> {
        match self.file_path.clone() {
            Some(path) => {
                if self.is_active {
                    self.log_marker("Logging paused")?;
                    self.is_active = false;
                    Ok(format!("Logging paused (file: {path})"))
                } else {
                    self.is_active = true;
                    Ok(format!("Logging resumed to: {path}"))
                }
            }
            None => {
                Err("No log file specified. Use /log <filename> to enable logging first.".into())
            }
        }
    }

    pub fn log_message(&self, message: &Message) -> Result<(), Box<dyn Error>> {
        if message.is_user() {
            self.write_block(&format!("{USER_PREFIX}: {}", message.content))
        } else {
            self.write_block(&message.content)
        }
    }

    /// Session events (history cleared, logging paused) get a `## ` prefix.
    pub fn log_marker(&self, text: &str) -> Result<(), Box<dyn Error>> {
        self.write_block(&format!("## {text}"))
    }

    fn write_block(&self, content: &str) -> Result<(), Box<dyn Error>> {
        let Some(file_path) = self.file_path.as_deref().filter(|_| self.is_active) else {
            return Ok(());
        };

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(file_path)?;
        let mut writer = BufWriter::new(file);

        for line in content.lines() {
            writeln!(writer, "{line}")?;
        }
        // Blank line between messages, matching the on-screen spacing.
        writeln!(writer)?;

        writer.flush()?;
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn status(&self) -> String {
        match (&self.file_path, self.is_active) {
            (None, _) => "off".to_string(),
            (Some(path), active) => format!(
                "{} ({})",
                if active { "on" } else { "paused" },
                Path::new(path)
                    .file_name()
                    .unwrap_or_default()
                    .to_string_lossy()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn log_in(dir: &TempDir) -> (TranscriptLog, std::path::PathBuf) {
        let path = dir.path().join("chat.log");
        (
            TranscriptLog::new(Some(path.to_string_lossy().into_owned())),
            path,
        )
    }

    #[test]
    fn messages_are_appended_with_spacing() {
        let dir = TempDir::new().expect("tempdir");
        let (log, path) = log_in(&dir);

        log.log_message(&Message::user("Hello")).unwrap();
        log.log_message(&Message::assistant("Hi there\nHow can I help?"))
            .unwrap();

        let contents = std::fs::read_to_string(path).unwrap();
        assert_eq!(contents, "You: Hello\n\nHi there\nHow can I help?\n\n");
    }

    #[test]
    fn paused_log_writes_nothing_further() {
        let dir = TempDir::new().expect("tempdir");
        let (mut log, path) = log_in(&dir);

        let status = log.toggle_logging().unwrap();
        assert!(status.starts_with("Logging paused"));
        log.log_message(&Message::user("secret")).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "## Logging paused\n\n");
        assert!(log.status().starts_with("paused"));

        log.toggle_logging().unwrap();
        assert!(log.is_active());
    }

    #[test]
    fn disabled_log_is_a_no_op() {
        let mut log = TranscriptLog::new(None);
        assert!(log.log_message(&Message::user("Hello")).is_ok());
        assert!(log.toggle_logging().is_err());
        assert_eq!(log.status(), "off");
    }

    #[test]
    fn set_log_file_enables_logging() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("later.log");
        let mut log = TranscriptLog::new(None);

        let message = log
            .set_log_file(path.to_string_lossy().into_owned())
            .unwrap();
        assert!(message.contains("later.log"));
        assert!(log.is_active());

        let contents = std::fs::read_to_string(path).unwrap();
        assert!(contents.starts_with("## Logging started "));
    }
}
