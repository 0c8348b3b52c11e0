//! The ordered conversation history for one session.
//!
//! The transcript only ever holds committed user/assistant pairs plus, at
//! most, one trailing user message whose reply is still being fetched. The
//! full history is resent on every completion call.

use std::fmt;

use crate::api::ChatMessage;
use crate::core::message::{Message, Role};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptError {
    /// A user message was pushed while the previous one is still unanswered.
    AwaitingReply,
    /// An assistant message was pushed without a user message to answer.
    NoPendingUser,
}

impl fmt::Display for TranscriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranscriptError::AwaitingReply => {
                write!(f, "the previous message has not been answered yet")
            }
            TranscriptError::NoPendingUser => {
                write!(f, "there is no user message to answer")
            }
        }
    }
}

impl std::error::Error for TranscriptError {}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_user(&mut self, content: impl Into<String>) -> Result<(), TranscriptError> {
        if self.has_pending_user() {
            return Err(TranscriptError::AwaitingReply);
        }
        self.messages.push(Message::user(content));
        Ok(())
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) -> Result<(), TranscriptError> {
        if !self.has_pending_user() {
            return Err(TranscriptError::NoPendingUser);
        }
        self.messages.push(Message::assistant(content));
        Ok(())
    }

    /// Remove a trailing unanswered user message, returning its text.
    pub fn discard_pending_user(&mut self) -> Option<String> {
        if self.has_pending_user() {
            self.messages.pop().map(|message| message.content)
        } else {
            None
        }
    }

    pub fn has_pending_user(&self) -> bool {
        self.messages.last().is_some_and(Message::is_user)
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn exchange_count(&self) -> usize {
        self.messages
            .iter()
            .filter(|message| message.role == Role::Assistant)
            .count()
    }

    pub fn api_messages(&self) -> Vec<ChatMessage> {
        self.messages
            .iter()
            .map(|message| ChatMessage {
                role: message.role.as_str().to_string(),
                content: message.content.clone(),
            })
            .collect()
    }
}
