//! groqchat is a full-screen terminal chat client for models hosted on Groq.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns the conversation transcript, session settings, credential
//!   resolution, and the completion call.
//! - [`ui`] renders the terminal interface and runs the interactive event loop
//!   that drives user input and display updates.
//! - [`commands`] implements slash-command parsing and execution used by the
//!   chat loop.
//! - [`auth`] manages the API key kept in the system keyring.
//! - [`api`] defines the chat completion payloads.
//!
//! Runtime entrypoints live in the binary crate (`src/main.rs`) and route
//! through [`crate::cli::main`], which dispatches into [`ui::chat_loop`] for
//! interactive sessions.

pub mod api;
pub mod auth;
pub mod cli;
pub mod commands;
pub mod core;
pub mod ui;
pub mod utils;
