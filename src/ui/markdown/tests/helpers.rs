use crate::core::message::{Message, Role};
use crate::ui::markdown::render_message;
use ratatui::text::Line;

pub fn render_markdown_for_test(role: Role, content: &str, width: Option<usize>) -> Vec<Line<'static>> {
    render_message(&Message::new(role, content), width)
}

pub fn line_texts(lines: &[Line<'static>]) -> Vec<String> {
    lines.iter().map(|line| line.to_string()).collect()
}

pub fn rendered_texts(role: Role, content: &str, width: Option<usize>) -> Vec<String> {
    line_texts(&render_markdown_for_test(role, content, width))
}
