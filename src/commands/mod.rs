//! Slash commands typed into the chat input.

mod registry;

pub use registry::{all_commands, CommandInvocation};

use crate::core::app::{App, Focus};
use crate::core::builtin_models::load_builtin_models;
use crate::core::message::Notice;
use crate::core::settings::{MAX_MAX_TOKENS, MAX_TEMPERATURE, MIN_MAX_TOKENS, MIN_TEMPERATURE};
use crate::utils::logging::USER_PREFIX;
use chrono::Local;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    Continue,
    ProcessAsMessage(String),
}

pub fn process_input(app: &mut App, input: &str) -> CommandResult {
    let trimmed = input.trim();

    let Some(rest) = trimmed.strip_prefix('/') else {
        return CommandResult::ProcessAsMessage(input.to_string());
    };

    let mut parts = rest.splitn(2, ' ');
    let command_name = match parts.next() {
        Some(name) if !name.is_empty() => name,
        _ => return CommandResult::ProcessAsMessage(input.to_string()),
    };
    let args = parts.next().unwrap_or("").trim();

    match registry::find_command(command_name) {
        Some(command) => {
            (command.handler)(app, CommandInvocation { args })
        }
        None => CommandResult::ProcessAsMessage(input.to_string()),
    }
}

fn info(app: &mut App, text: impl Into<String>) -> CommandResult {
    app.session.set_notice(Notice::info(text));
    CommandResult::Continue
}

fn error(app: &mut App, text: impl Into<String>) -> CommandResult {
    app.session.set_notice(Notice::error(text));
    CommandResult::Continue
}

pub(super) fn handle_help(app: &mut App, _invocation: CommandInvocation<'_>) -> CommandResult {
    let mut help = String::from(
        "Keys: Enter send • Tab settings panel • Ctrl+L clear history • PgUp/PgDn scroll • Ctrl+C quit\nCommands:",
    );
    for command in all_commands() {
        help.push_str(&format!("\n  {:<24} {}", command.usage, command.help));
    }
    info(app, help)
}

pub(super) fn handle_clear(app: &mut App, _invocation: CommandInvocation<'_>) -> CommandResult {
    app.clear_history();
    CommandResult::Continue
}

pub(super) fn handle_model(app: &mut App, invocation: CommandInvocation<'_>) -> CommandResult {
    if invocation.args.is_empty() {
        let current = app.session.settings().model().to_string();
        let listing: Vec<String> = load_builtin_models()
            .iter()
            .map(|model| {
                let marker = if model.id == current { "•" } else { " " };
                format!("{marker} {} ({})", model.id, model.display_name)
            })
            .collect();
        return info(app, format!("Models:\n{}", listing.join("\n")));
    }

    match app.session.settings_mut().set_model(invocation.args) {
        Ok(()) => {
            let model = app.session.settings().model().to_string();
            info(app, format!("Model set to {model}"))
        }
        Err(err) => error(app, err.to_string()),
    }
}

pub(super) fn handle_temperature(
    app: &mut App,
    invocation: CommandInvocation<'_>,
) -> CommandResult {
    match invocation.args.parse::<f32>() {
        Ok(value) if value.is_finite() => {
            app.session.settings_mut().set_temperature(value);
            let applied = app.session.settings().temperature();
            info(app, format!("Temperature set to {applied:.1}"))
        }
        _ => error(
            app,
            format!("Usage: /temp <{MIN_TEMPERATURE:.1}-{MAX_TEMPERATURE:.1}>"),
        ),
    }
}

pub(super) fn handle_max_tokens(
    app: &mut App,
    invocation: CommandInvocation<'_>,
) -> CommandResult {
    match invocation.args.parse::<u32>() {
        Ok(value) => {
            app.session.settings_mut().set_max_tokens(value);
            let applied = app.session.settings().max_tokens();
            info(app, format!("Max tokens set to {applied}"))
        }
        Err(_) => error(
            app,
            format!("Usage: /max-tokens <{MIN_MAX_TOKENS}-{MAX_MAX_TOKENS}>"),
        ),
    }
}

pub(super) fn handle_key(app: &mut App, _invocation: CommandInvocation<'_>) -> CommandResult {
    app.session.forget_api_key();
    app.focus = Focus::Panel;
    app.panel.begin_key_entry();
    CommandResult::Continue
}

pub(super) fn handle_log(app: &mut App, invocation: CommandInvocation<'_>) -> CommandResult {
    let result = if invocation.args.is_empty() {
        app.log.toggle_logging()
    } else {
        app.log.set_log_file(invocation.args.to_string())
    };
    match result {
        Ok(message) => info(app, message),
        Err(e) => error(app, format!("Log error: {e}")),
    }
}

pub(super) fn handle_dump(app: &mut App, invocation: CommandInvocation<'_>) -> CommandResult {
    if app.session.transcript().is_empty() {
        return error(app, "Nothing to dump: the conversation is empty.");
    }

    let filename = if invocation.args.is_empty() {
        format!("groqchat-log-{}.txt", Local::now().format("%Y-%m-%d"))
    } else {
        invocation.args.to_string()
    };

    match dump_conversation(app, &filename) {
        Ok(()) => info(app, format!("Conversation dumped to: {filename}")),
        Err(e) => error(app, format!("Dump error: {e}")),
    }
}

fn dump_conversation(app: &App, filename: &str) -> Result<(), Box<dyn std::error::Error>> {
    let file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(filename)
        .map_err(|err| {
            if err.kind() == std::io::ErrorKind::AlreadyExists {
                Box::<dyn std::error::Error>::from(format!("{filename} already exists"))
            } else {
                Box::new(err) as Box<dyn std::error::Error>
            }
        })?;
    let mut writer = BufWriter::new(file);

    for message in app.session.transcript().iter() {
        if message.is_user() {
            writeln!(writer, "{USER_PREFIX}: {}", message.content)?;
        } else {
            writeln!(writer, "{}", message.content)?;
        }
        writeln!(writer)?;
    }

    writer.flush()?;
    Ok(())
}
