//! One chat session: transcript, settings, and the outcome of the current
//! turn.
//!
//! Each user action is handled to completion before the next one is
//! accepted; [`ChatSession::submit`] awaits the completion call in place.

use tracing::{debug, info};

use crate::core::completion::{CompletionClient, CompletionRequest};
use crate::core::credentials::{typed_credential, ResolvedCredential};
use crate::core::message::Notice;
use crate::core::settings::Settings;
use crate::core::transcript::Transcript;

pub const MISSING_KEY_WARNING: &str =
    "Please enter your Groq API key in the settings panel to start chatting.";
pub const MISSING_KEY_GUIDANCE: &str = "Run 'groqchat auth' to store a key in your system keyring, or set GROQ_API_KEY. Don't have a key? Get one at https://console.groq.com";
pub const AUTH_FAILURE_HINT: &str = "Please check your API key and try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank input; nothing happened.
    Ignored,
    /// No credential is configured; the transcript was not touched.
    Blocked,
    /// The assistant reply was appended.
    Replied(String),
    /// The call failed; the transcript is as it was before the turn and the
    /// original input is handed back so it can be restored for a retry.
    Failed { input: String, error: String },
}

#[derive(Debug)]
pub struct ChatSession {
    transcript: Transcript,
    settings: Settings,
    notice: Option<Notice>,
}

impl ChatSession {
    pub fn new(settings: Settings) -> Self {
        let mut session = Self {
            transcript: Transcript::new(),
            settings,
            notice: None,
        };
        session.refresh_credential_notice();
        session
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
        self.refresh_credential_notice();
    }

    pub fn can_chat(&self) -> bool {
        self.settings.has_api_key()
    }

    fn refresh_credential_notice(&mut self) {
        if !self.can_chat() {
            self.notice = Some(Notice::warning(MISSING_KEY_WARNING));
        }
    }

    /// Handle one user turn.
    pub async fn submit(&mut self, input: &str, client: &dyn CompletionClient) -> SubmitOutcome {
        if input.trim().is_empty() {
            return SubmitOutcome::Ignored;
        }

        let Some(api_key) = self.settings.api_key().cloned() else {
            self.notice = Some(Notice::warning(MISSING_KEY_WARNING));
            return SubmitOutcome::Blocked;
        };

        if self.transcript.push_user(input).is_err() {
            // A previous turn left an unanswered message; drop it so
            // alternation holds.
            self.transcript.discard_pending_user();
            if self.transcript.push_user(input).is_err() {
                return SubmitOutcome::Ignored;
            }
        }
        self.notice = None;

        let request = CompletionRequest {
            model: self.settings.model().to_string(),
            messages: self.transcript.api_messages(),
            temperature: self.settings.temperature(),
            max_tokens: self.settings.max_tokens(),
        };
        debug!(
            model = %request.model,
            history = request.messages.len(),
            "submitting turn"
        );

        match client.complete(&api_key, request).await {
            Ok(reply) => match self.transcript.push_assistant(reply.clone()) {
                Ok(()) => {
                    info!(exchanges = self.transcript.exchange_count(), "turn completed");
                    SubmitOutcome::Replied(reply)
                }
                Err(err) => self.fail_turn(input, err.to_string()),
            },
            Err(err) => {
                let mut message = format!("Error: {err}");
                if err.is_auth() {
                    message.push_str(&format!("\n{AUTH_FAILURE_HINT}"));
                }
                self.fail_turn(input, message)
            }
        }
    }

    fn fail_turn(&mut self, input: &str, error: String) -> SubmitOutcome {
        self.transcript.discard_pending_user();
        info!(error = %error, "turn failed");
        self.notice = Some(Notice::error(error.clone()));
        SubmitOutcome::Failed {
            input: input.to_string(),
            error,
        }
    }

    pub fn clear_history(&mut self) {
        self.transcript.clear();
        self.notice = Some(Notice::info("Chat history cleared."));
        self.refresh_credential_notice();
    }

    /// Accept a key typed into the settings panel. Blank input is ignored
    /// and returns false.
    pub fn set_typed_api_key(&mut self, input: &str) -> bool {
        match typed_credential(input) {
            Some(credential) => {
                self.settings.set_credential(Some(credential));
                self.notice = Some(Notice::info("API key set for this session."));
                true
            }
            None => false,
        }
    }

    pub fn set_credential(&mut self, credential: Option<ResolvedCredential>) {
        self.settings.set_credential(credential);
        if self.can_chat() {
            if self
                .notice
                .as_ref()
                .is_some_and(|notice| notice.text == MISSING_KEY_WARNING)
            {
                self.notice = None;
            }
        } else {
            self.refresh_credential_notice();
        }
    }

    /// Drop the current credential so a different one can be entered.
    pub fn forget_api_key(&mut self) {
        self.settings.clear_api_key();
        self.refresh_credential_notice();
    }
}
