//! `groqchat models`: print the built-in catalog.

use crate::core::builtin_models::load_builtin_models;
use crate::core::config::Config;
use crate::core::settings::Settings;

/// Render the catalog, marking the model a new session would start with.
pub fn format_model_list(config: &Config) -> Vec<String> {
    let startup = Settings::from_config(config);
    load_builtin_models()
        .iter()
        .map(|model| {
            let marker = if model.id == startup.model() { "*" } else { " " };
            format!("{marker} {:<26} {}", model.id, model.display_name)
        })
        .collect()
}

pub fn list_models(config: &Config) {
    println!("🤖 Available Groq models");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    for line in format_model_list(config) {
        println!("{line}");
    }
    println!();
    println!("* = used when a session starts. Change it with 'groqchat set default-model <id>'.");
}
