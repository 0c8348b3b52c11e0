//! Terminal UI layer for interactive chat sessions.
//!
//! - [`chat_loop`]: terminal setup and the event loop that feeds keys and
//!   pastes to [`crate::core::app::App`].
//! - [`markdown`]: message content to styled lines wrapped to the pane.
//! - [`renderer`]: frame composition (transcript, settings panel, input).
//!
//! This layer presents and captures interaction state; [`crate::core`] owns
//! the conversation and the completion call.

pub mod chat_loop;
pub mod markdown;
pub mod renderer;
