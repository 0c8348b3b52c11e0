use super::CommandResult;
use crate::core::app::App;

pub type CommandHandler = fn(&mut App, CommandInvocation<'_>) -> CommandResult;

pub struct Command {
    pub name: &'static str,
    pub usage: &'static str,
    pub help: &'static str,
    pub handler: CommandHandler,
}

#[derive(Clone, Copy)]
pub struct CommandInvocation<'a> {
    pub args: &'a str,
}

pub fn all_commands() -> &'static [Command] {
    COMMANDS
}

pub fn find_command(name: &str) -> Option<&'static Command> {
    all_commands()
        .iter()
        .find(|command| command.name.eq_ignore_ascii_case(name))
}

const COMMANDS: &[Command] = &[
    Command {
        name: "help",
        usage: "/help",
        help: "Show commands and key bindings.",
        handler: super::handle_help,
    },
    Command {
        name: "clear",
        usage: "/clear",
        help: "Clear the chat history.",
        handler: super::handle_clear,
    },
    Command {
        name: "model",
        usage: "/model [id]",
        help: "List models or switch to one.",
        handler: super::handle_model,
    },
    Command {
        name: "temp",
        usage: "/temp <0.0-2.0>",
        help: "Set the sampling temperature.",
        handler: super::handle_temperature,
    },
    Command {
        name: "max-tokens",
        usage: "/max-tokens <256-8192>",
        help: "Set the response token limit.",
        handler: super::handle_max_tokens,
    },
    Command {
        name: "key",
        usage: "/key",
        help: "Forget the current API key and enter a different one.",
        handler: super::handle_key,
    },
    Command {
        name: "log",
        usage: "/log [filename]",
        help: "Toggle logging or set the log file path.",
        handler: super::handle_log,
    },
    Command {
        name: "dump",
        usage: "/dump [filename]",
        help: "Export the current conversation to a file.",
        handler: super::handle_dump,
    },
];
