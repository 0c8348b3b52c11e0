//! Markdown rendering for transcript messages.
//!
//! Messages are parsed with `pulldown-cmark` and turned into styled ratatui
//! lines that are already wrapped to the transcript width, so the transcript
//! can count its rows exactly and render without ratatui's own wrapping.

mod code;
mod render;
mod wrap;

#[cfg(test)]
mod tests;

pub use render::render_message;
pub use wrap::{prewrap_lines, wrap_spans};
