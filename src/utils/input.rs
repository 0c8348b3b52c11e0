//! Sanitizing text before it reaches the TUI.

/// Clean pasted or typed text so it cannot corrupt the terminal.
///
/// Tabs become four spaces, carriage returns become newlines, and all other
/// control characters are dropped.
pub fn sanitize_text_input(text: &str) -> String {
    let mut sanitized = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '\t' => sanitized.push_str("    "),
            '\r' => sanitized.push('\n'),
            '\n' => sanitized.push(c),
            _ if !c.is_control() => sanitized.push(c),
            _ => {}
        }
    }

    sanitized
}

/// Like [`sanitize_text_input`] but for single-line fields such as the API
/// key: every whitespace control character is removed instead of kept.
pub fn sanitize_single_line(text: &str) -> String {
    text.chars().filter(|c| !c.is_control()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tabs_and_carriage_returns_are_normalized() {
        assert_eq!(sanitize_text_input("a\tb\rc"), "a    b\nc");
    }

    #[test]
    fn control_characters_are_dropped() {
        assert_eq!(sanitize_text_input("he\x07llo\x00\nworld\x1b"), "hello\nworld");
    }

    #[test]
    fn single_line_strips_newlines() {
        assert_eq!(sanitize_single_line("gsk_abc\r\n\tdef\n"), "gsk_abcdef");
    }
}
