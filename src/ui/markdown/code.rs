use super::wrap::wrap_spans;
use pulldown_cmark::CodeBlockKind;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;

pub(super) fn code_block_style() -> Style {
    Style::default().fg(Color::LightYellow)
}

fn language_label_style() -> Style {
    Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::ITALIC)
}

pub(super) fn language_hint_from_codeblock_kind(kind: CodeBlockKind) -> String {
    match kind {
        CodeBlockKind::Indented => String::new(),
        CodeBlockKind::Fenced(info) => info.split_ascii_whitespace().next().unwrap_or("").into(),
    }
}

pub(super) fn push_codeblock_text(code_block_lines: &mut Vec<String>, text: &str) {
    for l in text.lines() {
        code_block_lines.push(detab(l));
    }
}

/// Rows for a finished code block. Indentation inside the block is kept;
/// lines wider than `width` are broken onto further rows.
pub(super) fn code_block_rows(
    code_block_lines: &[String],
    language_hint: &str,
    list_indent: usize,
    width: Option<usize>,
) -> Vec<Vec<Span<'static>>> {
    let indent = (list_indent > 0).then(|| " ".repeat(list_indent));
    let mut rows = Vec::new();

    if !language_hint.is_empty() {
        rows.push(vec![Span::styled(
            language_hint.to_string(),
            language_label_style(),
        )]);
    }

    for line in code_block_lines {
        let span = Span::styled(line.clone(), code_block_style());
        let wrapped = match width {
            Some(width) => wrap_spans(&[span], width.saturating_sub(list_indent), 0),
            None => vec![vec![span]],
        };
        rows.extend(wrapped);
    }

    if let Some(indent) = indent {
        for row in &mut rows {
            row.insert(0, Span::raw(indent.clone()));
        }
    }
    rows
}

pub(super) fn detab(s: &str) -> String {
    s.replace('\t', "    ")
}
