//! `groqchat set` / `groqchat unset`: edit the startup defaults in
//! `config.toml`.

use std::fmt;

use crate::core::builtin_models::find_builtin_model;
use crate::core::config::Config;
use crate::core::settings::{MAX_MAX_TOKENS, MAX_TEMPERATURE, MIN_MAX_TOKENS, MIN_TEMPERATURE};

pub const SETTING_KEYS: [&str; 5] = [
    "default-model",
    "temperature",
    "max-tokens",
    "base-url",
    "log-file",
];

/// Errors that can occur when modifying configuration settings.
#[derive(Debug, PartialEq)]
pub enum SettingError {
    /// The provided setting key is not recognized.
    UnknownKey(String),
    UnknownModel(String),
    /// The value could not be parsed or is out of range.
    InvalidValue {
        key: &'static str,
        input: String,
        expected: String,
    },
    /// Required arguments are missing.
    MissingArgs {
        hint: &'static str,
        example: &'static str,
    },
}

impl SettingError {
    /// Print the error message to stderr with appropriate formatting.
    pub fn print(&self) {
        match self {
            SettingError::UnknownKey(key) => {
                eprintln!("❌ Unknown config key: {key}");
                eprintln!("   Known keys: {}", SETTING_KEYS.join(", "));
            }
            SettingError::UnknownModel(input) => {
                eprintln!("❌ Unknown model: {input}. Run 'groqchat models' to list available models.");
            }
            SettingError::InvalidValue {
                key,
                input,
                expected,
            } => {
                eprintln!("❌ Invalid value for {key}: {input}");
                eprintln!("   Expected {expected}");
            }
            SettingError::MissingArgs { hint, example } => {
                eprintln!("⚠️  {hint}");
                eprintln!("Example: {example}");
            }
        }
    }

    pub fn exit_code(&self) -> i32 {
        1
    }
}

impl fmt::Display for SettingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingError::UnknownKey(key) => write!(f, "Unknown config key: {key}"),
            SettingError::UnknownModel(input) => write!(f, "Unknown model: {input}"),
            SettingError::InvalidValue { key, input, .. } => {
                write!(f, "Invalid value for {key}: {input}")
            }
            SettingError::MissingArgs { hint, .. } => write!(f, "{hint}"),
        }
    }
}

impl std::error::Error for SettingError {}

/// Apply `set <key> <value>` to `config` and return the confirmation
/// message. Values are validated here; clamping happens when settings are
/// derived at startup.
pub fn apply_set(config: &mut Config, key: &str, value: &[String]) -> Result<String, SettingError> {
    let value = value.join(" ");
    let value = value.trim();
    if value.is_empty() {
        return Err(missing_value(key));
    }

    match key {
        "default-model" => {
            let model = find_builtin_model(value)
                .ok_or_else(|| SettingError::UnknownModel(value.to_string()))?;
            config.default_model = Some(model.id.clone());
            Ok(format!("✅ Set default-model to: {}", model.id))
        }
        "temperature" => {
            let temperature = value
                .parse::<f32>()
                .ok()
                .filter(|t| (MIN_TEMPERATURE..=MAX_TEMPERATURE).contains(t))
                .ok_or_else(|| SettingError::InvalidValue {
                    key: "temperature",
                    input: value.to_string(),
                    expected: format!("a number from {MIN_TEMPERATURE:.1} to {MAX_TEMPERATURE:.1}"),
                })?;
            config.temperature = Some(temperature);
            Ok(format!("✅ Set temperature to: {temperature:.1}"))
        }
        "max-tokens" => {
            let max_tokens = value
                .parse::<u32>()
                .ok()
                .filter(|n| (MIN_MAX_TOKENS..=MAX_MAX_TOKENS).contains(n))
                .ok_or_else(|| SettingError::InvalidValue {
                    key: "max-tokens",
                    input: value.to_string(),
                    expected: format!("a whole number from {MIN_MAX_TOKENS} to {MAX_MAX_TOKENS}"),
                })?;
            config.max_tokens = Some(max_tokens);
            Ok(format!("✅ Set max-tokens to: {max_tokens}"))
        }
        "base-url" => {
            if !(value.starts_with("http://") || value.starts_with("https://")) {
                return Err(SettingError::InvalidValue {
                    key: "base-url",
                    input: value.to_string(),
                    expected: "an http:// or https:// URL".to_string(),
                });
            }
            config.base_url = Some(value.to_string());
            Ok(format!("✅ Set base-url to: {value}"))
        }
        "log-file" => {
            config.log_file = Some(value.to_string());
            Ok(format!("✅ Set log-file to: {value}"))
        }
        other => Err(SettingError::UnknownKey(other.to_string())),
    }
}

fn missing_value(key: &str) -> SettingError {
    let (hint, example) = match key {
        "default-model" => (
            "Specify a model id.",
            "groqchat set default-model llama-3.1-8b-instant",
        ),
        "temperature" => ("Specify a temperature.", "groqchat set temperature 0.9"),
        "max-tokens" => ("Specify a token limit.", "groqchat set max-tokens 2048"),
        "base-url" => (
            "Specify the API root URL.",
            "groqchat set base-url https://api.groq.com/openai/v1",
        ),
        "log-file" => ("Specify a file path.", "groqchat set log-file ~/groqchat.log"),
        other => return SettingError::UnknownKey(other.to_string()),
    };
    SettingError::MissingArgs { hint, example }
}

pub fn apply_unset(config: &mut Config, key: &str) -> Result<String, SettingError> {
    match key {
        "default-model" => config.default_model = None,
        "temperature" => config.temperature = None,
        "max-tokens" => config.max_tokens = None,
        "base-url" => config.base_url = None,
        "log-file" => config.log_file = None,
        other => return Err(SettingError::UnknownKey(other.to_string())),
    }
    Ok(format!("✅ Unset {key}"))
}
