use super::helpers::rendered_texts;
use crate::core::message::Role;
use crate::ui::markdown::{prewrap_lines, wrap_spans};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

fn row_text(row: &[Span<'static>]) -> String {
    row.iter().map(|span| span.content.as_ref()).collect()
}

#[test]
fn paragraphs_wrap_at_word_boundaries() {
    assert_eq!(
        rendered_texts(Role::Assistant, "alpha beta gamma delta", Some(11)),
        vec!["alpha beta", "gamma delta", ""]
    );
}

#[test]
fn wrapped_list_items_hang_under_their_text() {
    assert_eq!(
        rendered_texts(Role::Assistant, "- a long item that wraps", Some(12)),
        vec!["- a long", "  item that", "  wraps", ""]
    );
}

#[test]
fn wrapped_user_lines_stay_indented() {
    assert_eq!(
        rendered_texts(Role::User, "one two three four", Some(12)),
        vec!["You: one two", "     three", "     four", ""]
    );
}

#[test]
fn long_words_are_broken() {
    assert_eq!(
        rendered_texts(Role::Assistant, &"a".repeat(25), Some(10)),
        vec!["aaaaaaaaaa", "aaaaaaaaaa", "aaaaa", ""]
    );
}

#[test]
fn code_lines_wrap_instead_of_running_off() {
    let content = "```\nlet value = compute(first, second);\n```";
    assert_eq!(
        rendered_texts(Role::Assistant, content, Some(20)),
        vec!["let value =", "compute(first,", "second);", ""]
    );
}

#[test]
fn wrap_splits_at_spaces() {
    let spans = vec![Span::raw("word boundary test")];
    let rows: Vec<String> = wrap_spans(&spans, 6, 0)
        .iter()
        .map(|row| row_text(row))
        .collect();
    assert_eq!(rows, vec!["word", "bounda", "ry", "test"]);
}

#[test]
fn wrap_keeps_span_styles() {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let spans = vec![
        Span::styled("bold words", bold),
        Span::raw(" plain words"),
    ];
    let rows = wrap_spans(&spans, 10, 0);

    assert_eq!(rows.len(), 3);
    assert_eq!(row_text(&rows[0]), "bold words");
    assert_eq!(rows[0][0].style, bold);
    assert_eq!(row_text(&rows[1]), "plain");
    assert_eq!(row_text(&rows[2]), "words");
    assert_eq!(rows[2][0].style, Style::default());
}

#[test]
fn prewrap_only_splits_wide_lines() {
    let lines = vec![Line::from("short"), Line::from("x".repeat(25))];
    let wrapped = prewrap_lines(&lines, 10);
    assert_eq!(wrapped.len(), 4);
    assert_eq!(wrapped[0].to_string(), "short");
    assert!(wrapped.iter().all(|line| line.width() <= 10));
}
