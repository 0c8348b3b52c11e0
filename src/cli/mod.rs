//! Command-line interface parsing and handling
//!
//! This module handles parsing command-line arguments and executing the appropriate commands.

pub mod model_list;
pub mod say;
pub mod settings;

use std::error::Error;

use clap::{Parser, Subcommand};

use crate::auth::AuthManager;
use crate::cli::model_list::list_models;
use crate::cli::say::run_say;
use crate::cli::settings::{apply_set, apply_unset};
use crate::core::config::{path_display, Config};
use crate::ui::chat_loop::{run_chat, ChatOptions};
use crate::utils::diagnostics::init_tracing;

#[derive(Parser)]
#[command(name = "groqchat")]
#[command(version)]
#[command(about = "A terminal chat interface for the Groq API")]
#[command(
    long_about = "groqchat is a full-screen terminal chat interface for models hosted on Groq. \
The conversation lives in memory for the session; settings are changed in the side panel.\n\n\
Authentication:\n\
  Use 'groqchat auth' to store your API key in the system keyring.\n\n\
Environment Variables:\n\
  GROQ_API_KEY      Your Groq API key (used when no keyring entry exists)\n\
  GROQ_BASE_URL     Custom API base URL (optional, defaults to https://api.groq.com/openai/v1)\n\
  GROQCHAT_LOG      Diagnostic log filter, e.g. 'debug' (written to the cache directory)\n\n\
Controls:\n\
  Enter             Send the message\n\
  Alt+Enter         Insert a newline\n\
  Tab               Switch between the input and the settings panel\n\
  Ctrl+L            Clear the chat history\n\
  PgUp/PgDn/Up/Down Scroll the conversation\n\
  Ctrl+C / Esc      Quit\n\n\
Commands:\n\
  /help             Show commands and key bindings\n\
  /model [id]       List models or switch to one\n\
  /log <filename>   Enable logging to specified file\n\
  /log              Toggle logging pause/resume"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Model to start with (see 'groqchat models')
    #[arg(short = 'm', long, global = true, value_name = "MODEL")]
    pub model: Option<String>,

    /// Sampling temperature (0.0-2.0)
    #[arg(short = 't', long, global = true, value_name = "TEMP")]
    pub temperature: Option<f32>,

    /// Upper bound on reply length (256-8192)
    #[arg(long, global = true, value_name = "TOKENS")]
    pub max_tokens: Option<u32>,

    /// Enable logging to specified file
    #[arg(short = 'l', long, global = true)]
    pub log: Option<String>,

    /// Ignore the keyring and use GROQ_API_KEY only
    #[arg(long, global = true)]
    pub env_only: bool,
}

impl Args {
    pub fn chat_options(&self) -> ChatOptions {
        ChatOptions {
            model: self.model.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            log: self.log.clone(),
            env_only: self.env_only,
        }
    }
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Start the chat interface (default)
    Chat,
    /// Send one prompt and print the reply
    Say {
        /// Prompt text; multiple words are joined with spaces
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        prompt: Vec<String>,
    },
    /// Store a Groq API key in the system keyring
    Auth,
    /// Remove the stored Groq API key
    Deauth,
    /// List the available models
    Models,
    /// Set configuration values, or show them when no key is given
    Set {
        /// Configuration key to set
        key: Option<String>,
        /// Value to set for the key
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        value: Vec<String>,
    },
    /// Unset configuration values
    Unset {
        /// Configuration key to unset
        key: String,
    },
}

pub fn main() -> Result<(), Box<dyn Error>> {
    if let Some(path) = init_tracing() {
        tracing::info!(path = %path.display(), "diagnostic logging enabled");
    }
    tokio::runtime::Runtime::new()?.block_on(async_main())
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let options = args.chat_options();

    match args.command.unwrap_or(Commands::Chat) {
        Commands::Chat => {
            if let Err(e) = run_chat(options).await {
                eprintln!("❌ {e}");
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Say { prompt } => run_say(prompt, &options).await,
        Commands::Auth => {
            let auth_manager = AuthManager::new();
            if let Err(e) = auth_manager.interactive_auth() {
                eprintln!("❌ Authentication failed: {e}");
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Deauth => {
            let auth_manager = AuthManager::new();
            if let Err(e) = auth_manager.interactive_deauth() {
                eprintln!("❌ Deauthentication failed: {e}");
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Models => {
            let config = Config::load()?;
            list_models(&config);
            Ok(())
        }
        Commands::Set { key, value } => {
            let mut config = Config::load()?;
            let Some(key) = key else {
                config.print_all();
                println!();
                println!("Config file: {}", path_display(Config::config_path()?));
                println!("{}", AuthManager::new().status(options.env_only));
                return Ok(());
            };
            match apply_set(&mut config, &key, &value) {
                Ok(message) => {
                    config.save()?;
                    println!("{message}");
                    Ok(())
                }
                Err(err) => {
                    err.print();
                    std::process::exit(err.exit_code());
                }
            }
        }
        Commands::Unset { key } => {
            let mut config = Config::load()?;
            match apply_unset(&mut config, &key) {
                Ok(message) => {
                    config.save()?;
                    println!("{message}");
                    Ok(())
                }
                Err(err) => {
                    err.print();
                    std::process::exit(err.exit_code());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests;
