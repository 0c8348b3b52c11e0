use std::error::Error;

use tracing::{info, warn};

use crate::auth::AuthManager;
use crate::core::app::App;
use crate::core::completion::GroqClient;
use crate::core::config::Config;
use crate::core::credentials::{process_env, resolve_credential, EnvLookup, SecretStore};
use crate::core::session::ChatSession;
use crate::core::settings::Settings;
use crate::utils::logging::TranscriptLog;

/// Startup overrides taken from the command line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatOptions {
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub log: Option<String>,
    pub env_only: bool,
}

/// Derive the session settings: config defaults first, then command-line
/// overrides through the same clamping setters the UI uses.
pub fn build_settings(config: &Config, options: &ChatOptions) -> Result<Settings, Box<dyn Error>> {
    let mut settings = Settings::from_config(config);
    if let Some(model) = options.model.as_deref() {
        settings.set_model(model)?;
    }
    if let Some(temperature) = options.temperature {
        settings.set_temperature(temperature);
    }
    if let Some(max_tokens) = options.max_tokens {
        settings.set_max_tokens(max_tokens);
    }
    Ok(settings)
}

pub fn build_session(
    settings: Settings,
    store: Option<&dyn SecretStore>,
    env: EnvLookup,
) -> ChatSession {
    let mut session = ChatSession::new(settings);
    session.set_credential(resolve_credential(store, env));
    session
}

pub fn bootstrap_app(options: &ChatOptions) -> Result<(App, GroqClient), Box<dyn Error>> {
    let config = Config::load()?;
    let settings = build_settings(&config, options)?;

    let auth_manager = AuthManager::new();
    let store = (!options.env_only).then(|| auth_manager.store());
    let session = build_session(settings, store, process_env);
    match session.settings().credential_source() {
        Some(source) => info!(source = source.describe(), "credential resolved"),
        None => warn!("no credential configured; waiting for one in the settings panel"),
    }

    let log_file = options.log.clone().or_else(|| config.log_file.clone());
    let client = GroqClient::new(GroqClient::resolve_base_url(config.base_url.as_deref()));
    info!(
        base_url = client.base_url(),
        model = session.settings().model(),
        "starting chat session"
    );

    Ok((App::new(session, TranscriptLog::new(log_file)), client))
}
