//! Interactive application state: the chat session plus everything the
//! terminal surface needs (focus, input buffer, scroll position).

pub mod panel;

pub use panel::{PanelField, PanelOutcome, SettingsPanel};

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::warn;

use crate::commands::{process_input, CommandResult};
use crate::core::completion::CompletionClient;
use crate::core::message::{Message, Notice};
use crate::core::session::{ChatSession, SubmitOutcome, MISSING_KEY_WARNING};
use crate::utils::input::sanitize_text_input;
use crate::utils::logging::TranscriptLog;

const PAGE_SCROLL: u16 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    Panel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    None,
    Submit(String),
    Quit,
}

pub struct App {
    pub session: ChatSession,
    pub panel: SettingsPanel,
    pub focus: Focus,
    pub log: TranscriptLog,
    pub input: String,
    pub scroll_offset: u16,
    pub auto_scroll: bool,
    pub busy: bool,
    /// The message being sent while a reply is awaited.
    pub pending: Option<String>,
}

impl App {
    pub fn new(session: ChatSession, log: TranscriptLog) -> Self {
        let mut app = Self {
            session,
            panel: SettingsPanel::default(),
            focus: Focus::Input,
            log,
            input: String::new(),
            scroll_offset: 0,
            auto_scroll: true,
            busy: false,
            pending: None,
        };
        if !app.session.can_chat() {
            app.focus = Focus::Panel;
            app.panel.begin_key_entry();
        }
        app
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> AppAction {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => return AppAction::Quit,
            KeyCode::Char('l') if ctrl => {
                self.clear_history();
                return AppAction::None;
            }
            KeyCode::Tab | KeyCode::BackTab if !self.panel.is_entering_key() => {
                self.toggle_focus();
                return AppAction::None;
            }
            KeyCode::PageUp => {
                self.scroll_up(PAGE_SCROLL);
                return AppAction::None;
            }
            KeyCode::PageDown => {
                self.scroll_down(PAGE_SCROLL);
                return AppAction::None;
            }
            _ => {}
        }

        match self.focus {
            Focus::Panel => self.handle_panel_key(key),
            Focus::Input => self.handle_input_key(key),
        }
    }

    fn handle_panel_key(&mut self, key: &KeyEvent) -> AppAction {
        match self.panel.handle_key(key, &mut self.session) {
            PanelOutcome::ClearHistory => self.clear_history(),
            PanelOutcome::Handled => {
                if !self.panel.is_entering_key() && self.session.can_chat() {
                    // A freshly entered key sends the user straight back to typing.
                    if key.code == KeyCode::Enter && self.panel.selected() == PanelField::ApiKey {
                        self.focus = Focus::Input;
                    }
                }
            }
            PanelOutcome::NotHandled => {
                if key.code == KeyCode::Esc {
                    self.focus = Focus::Input;
                }
            }
        }
        AppAction::None
    }

    fn handle_input_key(&mut self, key: &KeyEvent) -> AppAction {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        match key.code {
            KeyCode::Esc => return AppAction::Quit,
            KeyCode::Enter if alt => self.input.push('\n'),
            KeyCode::Enter => return self.take_input(),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char('u') if ctrl => self.input.clear(),
            KeyCode::Char(c) if !ctrl => self.input.push(c),
            KeyCode::Up => self.scroll_up(1),
            KeyCode::Down => self.scroll_down(1),
            KeyCode::End => self.auto_scroll = true,
            _ => {}
        }
        AppAction::None
    }

    fn take_input(&mut self) -> AppAction {
        if self.input.trim().is_empty() {
            return AppAction::None;
        }
        let input = std::mem::take(&mut self.input);
        match process_input(self, &input) {
            CommandResult::Continue => AppAction::None,
            CommandResult::ProcessAsMessage(message) => {
                if !self.session.can_chat() {
                    // Not actionable until a key is configured; keep the draft.
                    self.input = message;
                    self.session.set_notice(Notice::warning(MISSING_KEY_WARNING));
                    return AppAction::None;
                }
                AppAction::Submit(message)
            }
        }
    }

    pub fn handle_paste(&mut self, text: &str) {
        if self.focus == Focus::Panel && self.panel.paste(text) {
            return;
        }
        self.input.push_str(&sanitize_text_input(text));
    }

    /// Mark a turn as in flight so it can be drawn before the reply arrives.
    pub fn begin_turn(&mut self, text: &str) {
        self.busy = true;
        self.pending = Some(text.to_string());
        self.auto_scroll = true;
    }

    /// Run one exchange and reflect the outcome in the UI state.
    pub async fn submit(&mut self, text: String, client: &dyn CompletionClient) {
        self.begin_turn(&text);
        let outcome = self.session.submit(&text, client).await;
        self.busy = false;
        self.pending = None;

        match outcome {
            SubmitOutcome::Replied(_) => {
                let len = self.session.transcript().len();
                let committed: Vec<Message> =
                    self.session.transcript().messages()[len - 2..].to_vec();
                for message in &committed {
                    if let Err(err) = self.log.log_message(message) {
                        warn!(error = %err, "failed to write transcript log");
                        self.session.set_notice(Notice::error(format!("Log error: {err}")));
                    }
                }
                self.auto_scroll = true;
            }
            SubmitOutcome::Failed { input, .. } => {
                self.input = input;
                self.auto_scroll = true;
            }
            SubmitOutcome::Blocked => self.input = text,
            SubmitOutcome::Ignored => {}
        }
    }

    pub fn clear_history(&mut self) {
        self.session.clear_history();
        if let Err(err) = self.log.log_marker("Chat history cleared") {
            warn!(error = %err, "failed to write transcript log");
        }
        self.scroll_offset = 0;
        self.auto_scroll = true;
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Input => Focus::Panel,
            Focus::Panel => Focus::Input,
        };
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.auto_scroll = false;
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll_offset = self.scroll_offset.saturating_add(lines);
    }

    /// Clamp the scroll position to the rendered content. Called by the
    /// renderer once the wrapped height is known.
    pub fn clamp_scroll(&mut self, max_offset: u16) -> u16 {
        if self.auto_scroll || self.scroll_offset >= max_offset {
            self.scroll_offset = max_offset;
            self.auto_scroll = true;
        }
        self.scroll_offset
    }
}
