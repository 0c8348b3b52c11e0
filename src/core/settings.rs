//! Session settings: credential, model, and sampling parameters.
//!
//! Every mutation goes through a clamping setter so the values sent with a
//! completion call always stay inside the ranges the settings panel shows.

use std::fmt;

use crate::core::builtin_models::{default_model, find_builtin_model, load_builtin_models};
use crate::core::config::Config;
use crate::core::credentials::{ApiKey, CredentialSource, ResolvedCredential};

pub const MIN_TEMPERATURE: f32 = 0.0;
pub const MAX_TEMPERATURE: f32 = 2.0;
pub const TEMPERATURE_STEP: f32 = 0.1;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

pub const MIN_MAX_TOKENS: u32 = 256;
pub const MAX_MAX_TOKENS: u32 = 8192;
pub const MAX_TOKENS_STEP: u32 = 256;
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    UnknownModel(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::UnknownModel(id) => {
                let known: Vec<&str> = load_builtin_models()
                    .iter()
                    .map(|model| model.id.as_str())
                    .collect();
                write!(f, "Unknown model '{id}'. Available: {}", known.join(", "))
            }
        }
    }
}

impl std::error::Error for SettingsError {}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    credential: Option<ResolvedCredential>,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            credential: None,
            model: default_model().id.clone(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

fn round_to_step(value: f32) -> f32 {
    (value / TEMPERATURE_STEP).round() * TEMPERATURE_STEP
}

fn clamp_temperature(value: f32) -> f32 {
    round_to_step(value.clamp(MIN_TEMPERATURE, MAX_TEMPERATURE)).clamp(MIN_TEMPERATURE, MAX_TEMPERATURE)
}

impl Settings {
    /// Derive startup settings from the config file. Out-of-range values are
    /// clamped and unknown models fall back to the catalog default.
    pub fn from_config(config: &Config) -> Self {
        let mut settings = Settings::default();
        if let Some(model) = config.default_model.as_deref() {
            if settings.set_model(model).is_err() {
                tracing::warn!(model, "configured default model is not in the catalog");
            }
        }
        if let Some(temperature) = config.temperature {
            settings.set_temperature(temperature);
        }
        if let Some(max_tokens) = config.max_tokens {
            settings.set_max_tokens(max_tokens);
        }
        settings
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn model_display_name(&self) -> &str {
        find_builtin_model(&self.model)
            .map(|model| model.display_name.as_str())
            .unwrap_or(&self.model)
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    pub fn api_key(&self) -> Option<&ApiKey> {
        self.credential.as_ref().map(|credential| &credential.key)
    }

    pub fn credential_source(&self) -> Option<CredentialSource> {
        self.credential.as_ref().map(|credential| credential.source)
    }

    pub fn has_api_key(&self) -> bool {
        self.credential.is_some()
    }

    pub fn set_credential(&mut self, credential: Option<ResolvedCredential>) {
        self.credential = credential;
    }

    pub fn clear_api_key(&mut self) {
        self.credential = None;
    }

    pub fn set_model(&mut self, id: &str) -> Result<(), SettingsError> {
        let model =
            find_builtin_model(id).ok_or_else(|| SettingsError::UnknownModel(id.to_string()))?;
        self.model = model.id.clone();
        Ok(())
    }

    pub fn next_model(&mut self) {
        self.step_model(1);
    }

    pub fn previous_model(&mut self) {
        let len = load_builtin_models().len();
        self.step_model(len.saturating_sub(1));
    }

    fn step_model(&mut self, offset: usize) {
        let models = load_builtin_models();
        let current = models
            .iter()
            .position(|model| model.id == self.model)
            .unwrap_or(0);
        self.model = models[(current + offset) % models.len()].id.clone();
    }

    /// Set the temperature, clamping into range. NaN is ignored.
    pub fn set_temperature(&mut self, value: f32) {
        if value.is_nan() {
            return;
        }
        self.temperature = clamp_temperature(value);
    }

    pub fn raise_temperature(&mut self) {
        self.set_temperature(self.temperature + TEMPERATURE_STEP);
    }

    pub fn lower_temperature(&mut self) {
        self.set_temperature(self.temperature - TEMPERATURE_STEP);
    }

    pub fn set_max_tokens(&mut self, value: u32) {
        self.max_tokens = value.clamp(MIN_MAX_TOKENS, MAX_MAX_TOKENS);
    }

    pub fn raise_max_tokens(&mut self) {
        self.set_max_tokens(self.max_tokens.saturating_add(MAX_TOKENS_STEP));
    }

    pub fn lower_max_tokens(&mut self) {
        self.set_max_tokens(self.max_tokens.saturating_sub(MAX_TOKENS_STEP));
    }
}
