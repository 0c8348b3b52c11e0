use super::code::{code_block_rows, detab, language_hint_from_codeblock_kind, push_codeblock_text};
use super::wrap::wrap_spans;
use crate::core::message::{Message, Role};
use crate::utils::logging::USER_PREFIX;
use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

const MAX_LIST_HANGING_INDENT_WIDTH: usize = 32;
pub(super) const USER_CONTINUATION_INDENT: &str = "     ";

#[derive(Clone, Debug)]
enum ListKind {
    Unordered,
    Ordered(u64),
}

pub(super) fn base_text_style(role: Role) -> Style {
    match role {
        Role::User => Style::default().fg(Color::Cyan),
        Role::Assistant => Style::default().fg(Color::White),
    }
}

fn user_prefix_style() -> Style {
    base_text_style(Role::User).add_modifier(Modifier::BOLD)
}

fn heading_style(level: HeadingLevel) -> Style {
    match level {
        HeadingLevel::H1 => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        HeadingLevel::H2 => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        _ => Style::default().add_modifier(Modifier::BOLD),
    }
}

fn blockquote_style() -> Style {
    Style::default()
        .fg(Color::Gray)
        .add_modifier(Modifier::ITALIC)
}

fn list_marker_style() -> Style {
    Style::default().fg(Color::Yellow)
}

fn inline_code_style() -> Style {
    Style::default().fg(Color::LightGreen)
}

fn link_style() -> Style {
    Style::default()
        .fg(Color::LightBlue)
        .add_modifier(Modifier::UNDERLINED)
}

fn muted_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Render one transcript message as display lines. With a `width`, every
/// line is wrapped to fit it. The result always ends with one blank line.
pub fn render_message(message: &Message, width: Option<usize>) -> Vec<Line<'static>> {
    MarkdownRenderer::new(message.role, &message.content, width).render()
}

struct LinkState {
    dest: String,
    text: String,
}

struct MarkdownRenderer<'a> {
    role: Role,
    content: &'a str,
    width: Option<usize>,
    lines: Vec<Line<'static>>,
    current_spans: Vec<Span<'static>>,
    style_stack: Vec<Style>,
    list_stack: Vec<ListKind>,
    list_indent_stack: Vec<usize>,
    pending_list_indent: Option<usize>,
    in_code_block: Option<String>,
    code_block_lines: Vec<String>,
    link: Option<LinkState>,
    did_prefix: bool,
}

impl<'a> MarkdownRenderer<'a> {
    fn new(role: Role, content: &'a str, width: Option<usize>) -> Self {
        Self {
            role,
            content,
            width,
            lines: Vec::new(),
            current_spans: Vec::new(),
            style_stack: vec![base_text_style(role)],
            list_stack: Vec::new(),
            list_indent_stack: Vec::new(),
            pending_list_indent: None,
            in_code_block: None,
            code_block_lines: Vec::new(),
            link: None,
            did_prefix: role != Role::User,
        }
    }

    fn render(mut self) -> Vec<Line<'static>> {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);
        let parser = Parser::new_ext(self.content, options);
        let mut parser = parser.peekable();

        while let Some(event) = parser.next() {
            match event {
                Event::Start(tag) => match tag {
                    Tag::Paragraph => {
                        if self.pending_list_indent.is_none() && !self.list_stack.is_empty() {
                            self.pending_list_indent = Some(self.current_list_indent_width());
                        }
                    }
                    Tag::Heading { level, .. } => {
                        self.flush_current_spans();
                        self.style_stack.push(heading_style(level));
                    }
                    Tag::BlockQuote(_) => {
                        self.flush_current_spans();
                        self.style_stack.push(blockquote_style());
                    }
                    Tag::List(start) => {
                        self.list_stack.push(match start {
                            Some(n) => ListKind::Ordered(n),
                            None => ListKind::Unordered,
                        });
                        self.list_indent_stack.push(0);
                        self.pending_list_indent = None;
                    }
                    Tag::Item => {
                        self.flush_current_spans();
                        let marker = match self.list_stack.last_mut() {
                            Some(ListKind::Ordered(next)) => {
                                let current = *next;
                                *next += 1;
                                format!("{current}. ")
                            }
                            _ => "- ".to_string(),
                        };
                        // Indent from the enclosing levels, not counting this one.
                        let parent_indent: usize = self
                            .list_indent_stack
                            .iter()
                            .take(self.list_indent_stack.len().saturating_sub(1))
                            .sum();
                        if let Some(indent) = self.list_indent_stack.last_mut() {
                            *indent = marker.width();
                        }
                        self.pending_list_indent = Some(parent_indent);
                        self.push_span(Span::styled(marker, list_marker_style()));
                    }
                    Tag::CodeBlock(kind) => {
                        self.flush_current_spans();
                        self.in_code_block = Some(language_hint_from_codeblock_kind(kind));
                        self.code_block_lines.clear();
                    }
                    Tag::Emphasis => self.push_modifier(Modifier::ITALIC),
                    Tag::Strong => self.push_modifier(Modifier::BOLD),
                    Tag::Strikethrough => self.push_modifier(Modifier::CROSSED_OUT),
                    Tag::Link { dest_url, .. } | Tag::Image { dest_url, .. } => {
                        self.style_stack.push(link_style());
                        self.link = Some(LinkState {
                            dest: dest_url.to_string(),
                            text: String::new(),
                        });
                    }
                    _ => {}
                },
                Event::End(tag_end) => match tag_end {
                    TagEnd::Paragraph => {
                        self.flush_current_spans();
                        if self.list_stack.is_empty() {
                            self.push_empty_line();
                        } else {
                            // Keep loose list items apart from the blocks that follow them.
                            let next_is_block = matches!(
                                parser.peek(),
                                Some(Event::Start(
                                    Tag::Paragraph
                                        | Tag::CodeBlock(_)
                                        | Tag::BlockQuote(_)
                                        | Tag::Heading { .. }
                                ))
                            );
                            if next_is_block {
                                self.push_empty_line();
                            }
                        }
                    }
                    TagEnd::Heading(_) => {
                        self.flush_current_spans();
                        self.push_empty_line();
                        self.style_stack.pop();
                    }
                    TagEnd::BlockQuote(_) => {
                        self.flush_current_spans();
                        self.style_stack.pop();
                    }
                    TagEnd::List(_) => {
                        self.flush_current_spans();
                        if self.list_stack.len() == 1 {
                            self.push_empty_line();
                        }
                        self.list_stack.pop();
                        self.list_indent_stack.pop();
                        self.pending_list_indent = None;
                    }
                    TagEnd::Item => {
                        self.flush_current_spans();
                        self.pending_list_indent = None;
                    }
                    TagEnd::CodeBlock => self.finalize_code_block(),
                    TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => {
                        self.style_stack.pop();
                    }
                    TagEnd::Link | TagEnd::Image => {
                        self.style_stack.pop();
                        if let Some(link) = self.link.take() {
                            if !link.dest.is_empty() && link.text != link.dest {
                                self.push_span(Span::styled(
                                    format!(" ({})", link.dest),
                                    muted_style(),
                                ));
                            }
                        }
                    }
                    _ => {}
                },
                Event::Text(text) => {
                    if self.in_code_block.is_some() {
                        push_codeblock_text(&mut self.code_block_lines, &text);
                    } else {
                        if let Some(link) = self.link.as_mut() {
                            link.text.push_str(&text);
                        }
                        self.push_text(&text);
                    }
                }
                Event::Code(code) => {
                    self.push_span(Span::styled(detab(&code), inline_code_style()));
                }
                Event::Html(html) => {
                    for line in html.lines() {
                        self.push_text(line);
                        self.flush_current_spans();
                    }
                }
                Event::InlineHtml(html) => self.push_text(&html),
                Event::SoftBreak | Event::HardBreak => {
                    self.flush_current_spans();
                    if !self.list_stack.is_empty() {
                        self.pending_list_indent = Some(self.current_list_indent_width());
                    }
                }
                Event::Rule => {
                    self.flush_current_spans();
                    self.push_horizontal_rule();
                    self.push_empty_line();
                }
                Event::TaskListMarker(checked) => {
                    let marker = if checked { "[x] " } else { "[ ] " };
                    self.push_span(Span::styled(marker, list_marker_style()));
                }
                _ => {}
            }
        }

        self.flush_current_spans();
        if !self.did_prefix {
            self.push_content_line(Vec::new());
        }
        while self.lines.last().is_some_and(|line| line.width() == 0) {
            self.lines.pop();
        }
        self.push_empty_line();
        self.lines
    }

    fn push_modifier(&mut self, modifier: Modifier) {
        let style = self
            .style_stack
            .last()
            .copied()
            .unwrap_or_default()
            .add_modifier(modifier);
        self.style_stack.push(style);
    }

    fn push_text(&mut self, text: &str) {
        let style = self
            .style_stack
            .last()
            .copied()
            .unwrap_or_else(|| base_text_style(self.role));
        self.push_span(Span::styled(detab(text), style));
    }

    fn push_span(&mut self, span: Span<'static>) {
        if self.current_spans.is_empty() {
            if let Some(indent) = self.pending_list_indent.take() {
                if indent > 0 {
                    self.current_spans.push(Span::raw(" ".repeat(indent)));
                }
            }
        }
        self.current_spans.push(span);
    }

    fn flush_current_spans(&mut self) {
        if self.current_spans.is_empty() {
            return;
        }
        let spans = std::mem::take(&mut self.current_spans);

        let Some(width) = self.content_width() else {
            self.push_content_line(spans);
            return;
        };

        let hanging_indent = if self.list_stack.is_empty() {
            0
        } else {
            self.current_list_indent_width()
                .min(MAX_LIST_HANGING_INDENT_WIDTH)
        };
        for (idx, mut row) in wrap_spans(&spans, width, hanging_indent)
            .into_iter()
            .enumerate()
        {
            if idx > 0 && hanging_indent > 0 {
                row.insert(0, Span::raw(" ".repeat(hanging_indent)));
            }
            self.push_content_line(row);
        }
    }

    /// Push a line of message content, led by the role prefix on the first
    /// line of a user message and by its indent afterwards.
    fn push_content_line(&mut self, mut spans: Vec<Span<'static>>) {
        if self.role == Role::User {
            let lead = if self.did_prefix {
                Span::raw(USER_CONTINUATION_INDENT)
            } else {
                self.did_prefix = true;
                Span::styled(format!("{USER_PREFIX}: "), user_prefix_style())
            };
            spans.insert(0, lead);
        }
        self.lines.push(Line::from(spans));
    }

    fn push_empty_line(&mut self) {
        self.lines.push(Line::default());
    }

    fn push_horizontal_rule(&mut self) {
        let available_width = self.content_width().unwrap_or(80);
        let target_width = ((available_width as f32) * 0.8).round() as usize;
        let rule_width = target_width.clamp(1, available_width);
        let left_padding = available_width.saturating_sub(rule_width) / 2;

        let mut spans = Vec::new();
        if left_padding > 0 {
            spans.push(Span::raw(" ".repeat(left_padding)));
        }
        spans.push(Span::styled("─".repeat(rule_width), muted_style()));
        self.push_content_line(spans);
    }

    fn finalize_code_block(&mut self) {
        let language_hint = self.in_code_block.take().unwrap_or_default();
        let list_indent = self.current_list_indent_width();
        let rows = code_block_rows(
            &self.code_block_lines,
            &language_hint,
            list_indent,
            self.content_width(),
        );
        for row in rows {
            self.push_content_line(row);
        }
        self.code_block_lines.clear();
        self.push_empty_line();
        self.pending_list_indent = (list_indent > 0).then_some(list_indent);
    }

    fn current_list_indent_width(&self) -> usize {
        self.list_indent_stack.iter().sum()
    }

    fn lead_width(&self) -> usize {
        match self.role {
            Role::User => USER_CONTINUATION_INDENT.width(),
            Role::Assistant => 0,
        }
    }

    fn content_width(&self) -> Option<usize> {
        self.width
            .map(|width| width.saturating_sub(self.lead_width()).max(1))
    }
}
