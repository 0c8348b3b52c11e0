//! The settings panel: credential entry, model choice, sampling parameters
//! and the clear-history action.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::message::Notice;
use crate::core::session::ChatSession;
use crate::utils::input::sanitize_single_line;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelField {
    ApiKey,
    Model,
    Temperature,
    MaxTokens,
    ClearHistory,
}

impl PanelField {
    pub const ALL: [PanelField; 5] = [
        PanelField::ApiKey,
        PanelField::Model,
        PanelField::Temperature,
        PanelField::MaxTokens,
        PanelField::ClearHistory,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PanelField::ApiKey => "API key",
            PanelField::Model => "Model",
            PanelField::Temperature => "Temperature",
            PanelField::MaxTokens => "Max tokens",
            PanelField::ClearHistory => "Clear chat history",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelOutcome {
    Handled,
    ClearHistory,
    NotHandled,
}

#[derive(Debug, Default)]
pub struct SettingsPanel {
    selected: usize,
    key_entry: Option<String>,
}

impl SettingsPanel {
    pub fn selected(&self) -> PanelField {
        PanelField::ALL[self.selected]
    }

    pub fn select(&mut self, field: PanelField) {
        self.selected = PanelField::ALL
            .iter()
            .position(|candidate| *candidate == field)
            .unwrap_or(0);
    }

    pub fn is_entering_key(&self) -> bool {
        self.key_entry.is_some()
    }

    /// Number of characters typed so far; the text itself is never drawn.
    pub fn key_entry_len(&self) -> Option<usize> {
        self.key_entry.as_ref().map(|buffer| buffer.chars().count())
    }

    pub fn begin_key_entry(&mut self) {
        self.select(PanelField::ApiKey);
        self.key_entry = Some(String::new());
    }

    pub fn cancel_key_entry(&mut self) {
        self.key_entry = None;
    }

    pub fn paste(&mut self, text: &str) -> bool {
        match self.key_entry.as_mut() {
            Some(buffer) => {
                buffer.push_str(&sanitize_single_line(text));
                true
            }
            None => false,
        }
    }

    pub fn handle_key(&mut self, key: &KeyEvent, session: &mut ChatSession) -> PanelOutcome {
        if self.key_entry.is_some() {
            return self.handle_key_entry(key, session);
        }

        match key.code {
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                PanelOutcome::Handled
            }
            KeyCode::Down => {
                self.selected = (self.selected + 1).min(PanelField::ALL.len() - 1);
                PanelOutcome::Handled
            }
            KeyCode::Left | KeyCode::Char('-') => self.adjust(session, false),
            KeyCode::Right | KeyCode::Char('+') | KeyCode::Char('=') => self.adjust(session, true),
            KeyCode::Enter => match self.selected() {
                PanelField::ApiKey => {
                    // Replacing a key starts from scratch; no default is kept.
                    session.forget_api_key();
                    self.begin_key_entry();
                    PanelOutcome::Handled
                }
                PanelField::ClearHistory => PanelOutcome::ClearHistory,
                _ => self.adjust(session, true),
            },
            _ => PanelOutcome::NotHandled,
        }
    }

    fn adjust(&mut self, session: &mut ChatSession, up: bool) -> PanelOutcome {
        let settings = session.settings_mut();
        match (self.selected(), up) {
            (PanelField::Model, true) => settings.next_model(),
            (PanelField::Model, false) => settings.previous_model(),
            (PanelField::Temperature, true) => settings.raise_temperature(),
            (PanelField::Temperature, false) => settings.lower_temperature(),
            (PanelField::MaxTokens, true) => settings.raise_max_tokens(),
            (PanelField::MaxTokens, false) => settings.lower_max_tokens(),
            (PanelField::ApiKey | PanelField::ClearHistory, _) => return PanelOutcome::NotHandled,
        }
        PanelOutcome::Handled
    }

    fn handle_key_entry(&mut self, key: &KeyEvent, session: &mut ChatSession) -> PanelOutcome {
        let Some(buffer) = self.key_entry.as_mut() else {
            return PanelOutcome::NotHandled;
        };

        match key.code {
            KeyCode::Enter => {
                if session.set_typed_api_key(buffer) {
                    self.key_entry = None;
                } else {
                    session.set_notice(Notice::warning("API key cannot be empty."));
                }
            }
            KeyCode::Esc => self.key_entry = None,
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => buffer.clear(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => buffer.push(c),
            _ => return PanelOutcome::NotHandled,
        }
        PanelOutcome::Handled
    }
}
