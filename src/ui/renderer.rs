use crate::core::app::{App, Focus, PanelField};
use crate::core::message::{Message, NoticeKind};
use crate::core::session::MISSING_KEY_GUIDANCE;
use crate::core::settings::Settings;
use crate::ui::markdown::{prewrap_lines, render_message};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

pub const PANEL_WIDTH: u16 = 34;
const MAX_INPUT_LINES: u16 = 6;

pub fn ui(f: &mut Frame, app: &mut App) {
    let input_lines = (app.input.lines().count().max(1) as u16
        + u16::from(app.input.ends_with('\n')))
    .min(MAX_INPUT_LINES);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(input_lines + 2)])
        .split(f.area());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(PANEL_WIDTH)])
        .split(rows[0]);

    render_transcript(f, app, columns[0]);
    render_settings_panel(f, app, columns[1]);
    render_input(f, app, rows[1], input_lines);
}

/// Every transcript row, already wrapped to `width` columns.
pub fn build_display_lines(app: &App, width: u16) -> Vec<Line<'static>> {
    let width = usize::from(width.max(1));
    let mut lines = Vec::new();

    for message in app.session.transcript().iter() {
        lines.extend(render_message(message, Some(width)));
    }

    if let Some(pending) = app.pending.as_deref() {
        lines.extend(render_message(&Message::user(pending), Some(width)));
    }

    let mut status = Vec::new();
    if app.busy {
        status.push(Line::from(Span::styled(
            "Thinking…",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )));
    }

    if let Some(notice) = app.session.notice() {
        let style = match notice.kind {
            NoticeKind::Info => Style::default().fg(Color::DarkGray),
            NoticeKind::Warning => Style::default().fg(Color::Yellow),
            NoticeKind::Error => Style::default().fg(Color::Red),
        };
        for text in notice.text.lines() {
            status.push(Line::from(Span::styled(text.to_string(), style)));
        }
        if !app.session.can_chat() {
            status.push(Line::from(Span::styled(
                MISSING_KEY_GUIDANCE,
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    lines.extend(prewrap_lines(&status, width));
    lines
}

fn render_transcript(f: &mut Frame, app: &mut App, area: Rect) {
    let lines = build_display_lines(app, area.width);
    let settings = app.session.settings();
    let title = format!(
        "groqchat v{} - {} • temp {:.1} • max {} tokens • Logging: {}",
        env!("CARGO_PKG_VERSION"),
        settings.model(),
        settings.temperature(),
        settings.max_tokens(),
        app.log.status()
    );

    let available_height = area.height.saturating_sub(1);
    let total = u16::try_from(lines.len()).unwrap_or(u16::MAX);
    let scroll_offset = app.clamp_scroll(total.saturating_sub(available_height));

    let paragraph = Paragraph::new(lines)
        .block(Block::default().title(title))
        .scroll((scroll_offset, 0));
    f.render_widget(paragraph, area);
}

fn field_value(field: PanelField, settings: &Settings, key_entry: Option<usize>) -> String {
    match field {
        PanelField::ApiKey => match (key_entry, settings.api_key()) {
            (Some(len), _) => format!("{}▏", "*".repeat(len.min(20))),
            (None, Some(key)) => {
                let source = settings
                    .credential_source()
                    .map(|source| source.describe())
                    .unwrap_or_default();
                format!("{} ({source})", key.masked())
            }
            (None, None) => "not set".to_string(),
        },
        PanelField::Model => settings.model_display_name().to_string(),
        PanelField::Temperature => format!("◂ {:.1} ▸", settings.temperature()),
        PanelField::MaxTokens => format!("◂ {} ▸", settings.max_tokens()),
        PanelField::ClearHistory => String::new(),
    }
}

fn render_settings_panel(f: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Panel;
    let settings = app.session.settings();
    let mut lines = Vec::new();

    for field in PanelField::ALL {
        let selected = focused && app.panel.selected() == field;
        let marker = if selected { "› " } else { "  " };
        let label_style = if selected {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(
            format!("{marker}{}", field.label()),
            label_style,
        )));

        let value = field_value(field, settings, app.panel.key_entry_len());
        if !value.is_empty() {
            let value_style = if field == PanelField::ApiKey && !settings.has_api_key() {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::Gray)
            };
            lines.push(Line::from(Span::styled(format!("    {value}"), value_style)));
        }
        lines.push(Line::from(""));
    }

    let hint = if app.panel.is_entering_key() {
        "Type key, Enter to save, Esc to cancel"
    } else if focused {
        "↑/↓ select • ←/→ adjust • Enter apply • Tab back"
    } else {
        "Tab to change settings"
    };
    lines.push(Line::from(Span::styled(
        hint,
        Style::default().fg(Color::DarkGray),
    )));

    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Reset)
    };
    let panel = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title("Configuration"),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(panel, area);
}

fn render_input(f: &mut Frame, app: &App, area: Rect, visible_lines: u16) {
    let focused = app.focus == Focus::Input;
    let title = if app.busy {
        "Waiting for response…"
    } else if !app.session.can_chat() {
        "Enter an API key in the settings panel to start chatting"
    } else {
        "Type your message (Enter to send, Alt+Enter for new line, /help, Ctrl+C to quit)"
    };

    let total_lines = app.input.split('\n').count() as u16;
    let input_scroll = total_lines.saturating_sub(visible_lines);

    let input = Paragraph::new(app.input.as_str())
        .style(if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Reset))
                .title(title),
        )
        .scroll((input_scroll, 0));
    f.render_widget(input, area);

    if focused && !app.busy {
        let last_line = app.input.rsplit('\n').next().unwrap_or_default();
        let max_x = area.width.saturating_sub(2);
        let cursor_x = (last_line.width() as u16).min(max_x.saturating_sub(1)) + 1;
        let cursor_y = (total_lines - input_scroll).min(visible_lines);
        f.set_cursor_position((area.x + cursor_x, area.y + cursor_y));
    }
}
