use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthChar;

/// Wrap spans to `max_width` columns at word boundaries while keeping their
/// styles. Rows after the first have `continuation_indent` fewer columns so
/// the caller can indent them. Words wider than a row are broken.
pub fn wrap_spans(
    spans: &[Span<'static>],
    max_width: usize,
    continuation_indent: usize,
) -> Vec<Vec<Span<'static>>> {
    let mut rows: Vec<Vec<Span<'static>>> = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    let mut current_width = 0usize;

    for span in spans {
        let style = span.style;
        let mut text: &str = span.content.as_ref();

        while !text.is_empty() {
            let limit = if rows.is_empty() {
                max_width
            } else {
                max_width.saturating_sub(continuation_indent)
            }
            .max(1);

            if !rows.is_empty() && current.is_empty() {
                text = text.trim_start();
                if text.is_empty() {
                    break;
                }
            }

            let mut fit_end = 0usize;
            let mut fit_width = 0usize;
            let mut last_break: Option<usize> = None;
            for (pos, ch) in text.char_indices() {
                let cw = ch.width().unwrap_or(0);
                if current_width + fit_width + cw > limit {
                    break;
                }
                fit_width += cw;
                fit_end = pos + ch.len_utf8();
                if ch.is_whitespace() {
                    last_break = Some(fit_end);
                }
            }

            if fit_end == text.len() {
                current.push(Span::styled(text.to_string(), style));
                current_width += fit_width;
                break;
            }

            if text[fit_end..].starts_with(char::is_whitespace) {
                last_break = Some(fit_end);
            }

            let (head, rest) = match last_break {
                Some(pos) => (text[..pos].trim_end(), &text[pos..]),
                // The word started in an earlier span; move it to the next row.
                None if current_width > 0 => ("", text),
                None => {
                    let end = if fit_end == 0 {
                        text.chars().next().map_or(text.len(), char::len_utf8)
                    } else {
                        fit_end
                    };
                    (&text[..end], &text[end..])
                }
            };

            if !head.is_empty() {
                current.push(Span::styled(head.to_string(), style));
            }
            rows.push(std::mem::take(&mut current));
            current_width = 0;
            text = rest;
        }
    }

    if !current.is_empty() || rows.is_empty() {
        rows.push(current);
    }
    rows
}

/// Split every line wider than `width` into several display rows.
pub fn prewrap_lines(lines: &[Line<'static>], width: usize) -> Vec<Line<'static>> {
    let width = width.max(1);
    let mut out = Vec::with_capacity(lines.len());
    for line in lines {
        if line.width() <= width {
            out.push(line.clone());
            continue;
        }
        out.extend(
            wrap_spans(&line.spans, width, 0)
                .into_iter()
                .map(Line::from),
        );
    }
    out
}
