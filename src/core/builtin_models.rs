//! Built-in model catalog
//!
//! The settings panel offers a fixed list of models. The list is embedded
//! from `builtin_models.toml` at build time.

use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuiltinModel {
    pub id: String,
    pub display_name: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct BuiltinModelsConfig {
    models: Vec<BuiltinModel>,
}

static BUILTIN_MODELS: LazyLock<Vec<BuiltinModel>> = LazyLock::new(|| {
    const CONFIG_CONTENT: &str = include_str!("../builtin_models.toml");

    let config: BuiltinModelsConfig =
        toml::from_str(CONFIG_CONTENT).expect("Failed to parse builtin_models.toml");

    config.models
});

/// All catalog models, in display order.
pub fn load_builtin_models() -> &'static [BuiltinModel] {
    &BUILTIN_MODELS
}

/// Find a catalog model by ID (case-insensitive)
pub fn find_builtin_model(id: &str) -> Option<&'static BuiltinModel> {
    BUILTIN_MODELS
        .iter()
        .find(|model| model.id.eq_ignore_ascii_case(id.trim()))
}

pub fn model_index(id: &str) -> Option<usize> {
    BUILTIN_MODELS
        .iter()
        .position(|model| model.id.eq_ignore_ascii_case(id.trim()))
}

pub fn default_model() -> &'static BuiltinModel {
    &BUILTIN_MODELS[0]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_lists_the_expected_models() {
        let ids: Vec<&str> = load_builtin_models()
            .iter()
            .map(|model| model.id.as_str())
            .collect();
        assert_eq!(
            ids,
            vec![
                "llama-3.3-70b-versatile",
                "llama-3.1-70b-versatile",
                "llama-3.1-8b-instant",
                "mixtral-8x7b-32768",
                "gemma2-9b-it",
            ]
        );
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let model = find_builtin_model("Gemma2-9B-IT").expect("model");
        assert_eq!(model.id, "gemma2-9b-it");
        assert!(find_builtin_model("gpt-4o").is_none());
        assert_eq!(model_index("mixtral-8x7b-32768"), Some(3));
    }

    #[test]
    fn default_is_first_entry() {
        assert_eq!(default_model().id, "llama-3.3-70b-versatile");
    }
}
