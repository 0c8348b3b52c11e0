use crate::utils::input::sanitize_single_line;
use ratatui::crossterm::{
    cursor::MoveToColumn,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    style::Print,
    terminal::{disable_raw_mode, enable_raw_mode, Clear, ClearType},
};
use std::fmt;
use std::io::{self, Write};

const MASKED_INPUT_PROMPT: &str = "Enter your Groq API key: ";

#[derive(Debug, Clone)]
pub struct UiError {
    message: String,
}

impl UiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for UiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for UiError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum MaskedStep {
    Continue,
    Submit(String),
    Cancelled,
}

/// Apply one key press to the hidden buffer.
pub(crate) fn apply_masked_key(buffer: &mut String, key: &KeyEvent) -> MaskedStep {
    match key.code {
        KeyCode::Enter => MaskedStep::Submit(buffer.clone()),
        KeyCode::Esc => MaskedStep::Cancelled,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            MaskedStep::Cancelled
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            buffer.clear();
            MaskedStep::Continue
        }
        KeyCode::Backspace => {
            buffer.pop();
            MaskedStep::Continue
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            buffer.push(c);
            MaskedStep::Continue
        }
        _ => MaskedStep::Continue,
    }
}

fn redraw_masked(len: usize) -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(
        stdout,
        MoveToColumn(0),
        Clear(ClearType::CurrentLine),
        Print(MASKED_INPUT_PROMPT),
        Print("*".repeat(len))
    )?;
    stdout.flush()
}

/// Read a secret from the terminal without echoing it.
pub fn prompt_api_key() -> Result<String, UiError> {
    println!("🔐 groqchat authentication setup");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Get a key at https://console.groq.com");
    println!();

    enable_raw_mode().map_err(|err| UiError::new(err.to_string()))?;

    let result = (|| -> Result<String, UiError> {
        let mut buffer = String::new();
        redraw_masked(0).map_err(|err| UiError::new(err.to_string()))?;
        loop {
            match event::read().map_err(|err| UiError::new(err.to_string()))? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    match apply_masked_key(&mut buffer, &key) {
                        MaskedStep::Continue => {}
                        MaskedStep::Submit(value) => break Ok(value),
                        MaskedStep::Cancelled => break Err(UiError::new("Cancelled by user")),
                    }
                }
                Event::Paste(text) => buffer.push_str(&sanitize_single_line(&text)),
                _ => continue,
            }
            redraw_masked(buffer.chars().count())
                .map_err(|err| UiError::new(err.to_string()))?;
        }
    })();

    let disable_result = disable_raw_mode().map_err(|err| UiError::new(err.to_string()));
    println!();
    let value = result?;
    disable_result?;
    Ok(value.trim().to_string())
}

pub fn prompt_confirmation(question: &str) -> Result<bool, UiError> {
    print!("{question} [y/N]: ");
    io::stdout()
        .flush()
        .map_err(|err| UiError::new(err.to_string()))?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .map_err(|err| UiError::new(err.to_string()))?;
    Ok(parse_confirmation(&input))
}

pub(crate) fn parse_confirmation(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn typing_and_backspace_edit_the_buffer() {
        let mut buffer = String::new();
        for c in "gsk_abx".chars() {
            assert_eq!(apply_masked_key(&mut buffer, &key(KeyCode::Char(c))), MaskedStep::Continue);
        }
        apply_masked_key(&mut buffer, &key(KeyCode::Backspace));
        apply_masked_key(&mut buffer, &key(KeyCode::Char('c')));
        assert_eq!(
            apply_masked_key(&mut buffer, &key(KeyCode::Enter)),
            MaskedStep::Submit("gsk_abc".to_string())
        );
    }

    #[test]
    fn ctrl_c_and_escape_cancel() {
        let mut buffer = "partial".to_string();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(apply_masked_key(&mut buffer, &ctrl_c), MaskedStep::Cancelled);
        assert_eq!(apply_masked_key(&mut buffer, &key(KeyCode::Esc)), MaskedStep::Cancelled);
        assert_eq!(buffer, "partial");
    }

    #[test]
    fn ctrl_u_clears_the_buffer() {
        let mut buffer = "gsk_wrong".to_string();
        let ctrl_u = KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL);
        apply_masked_key(&mut buffer, &ctrl_u);
        assert!(buffer.is_empty());
    }

    #[test]
    fn confirmation_accepts_only_yes() {
        assert!(parse_confirmation("y\n"));
        assert!(parse_confirmation(" YES "));
        assert!(!parse_confirmation("\n"));
        assert!(!parse_confirmation("nope"));
    }
}
