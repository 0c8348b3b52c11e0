use super::data::{path_display, Config};
use super::io::ConfigError;
use tempfile::TempDir;

#[test]
fn test_load_nonexistent_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("nonexistent_config.toml");

    let config = Config::load_from_path(&config_path).expect("Failed to load config");

    assert_eq!(config, Config::default());
}

#[test]
fn test_config_persistence_lifecycle() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("nested").join("config.toml");

    let config = Config {
        default_model: Some("gemma2-9b-it".to_string()),
        temperature: Some(1.3),
        max_tokens: Some(2048),
        ..Default::default()
    };
    config
        .save_to_path(&config_path)
        .expect("Failed to save config");

    let mut loaded = Config::load_from_path(&config_path).expect("Failed to load config");
    assert_eq!(loaded, config);

    loaded.temperature = None;
    loaded.base_url = Some("https://proxy.example.com/v1".to_string());
    loaded
        .save_to_path(&config_path)
        .expect("Failed to save config");

    let reloaded = Config::load_from_path(&config_path).expect("Failed to load config");
    assert_eq!(reloaded.temperature, None);
    assert_eq!(reloaded.max_tokens, Some(2048));
    assert_eq!(
        reloaded.base_url.as_deref(),
        Some("https://proxy.example.com/v1")
    );
}

#[test]
fn test_parse_error_reports_path() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, "temperature = \"warm\"\n").expect("write");

    let err = Config::load_from_path(&config_path).expect_err("parse should fail");
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("config.toml"));
}

#[test]
fn test_unknown_keys_are_ignored() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        "default_model = \"llama-3.1-8b-instant\"\ntheme = \"dark\"\n",
    )
    .expect("write");

    let config = Config::load_from_path(&config_path).expect("load");
    assert_eq!(config.default_model.as_deref(), Some("llama-3.1-8b-instant"));
}

#[cfg(unix)]
#[test]
fn test_path_display_abbreviates_home() {
    if let Some(home) = std::env::var_os("HOME") {
        let path = std::path::PathBuf::from(home).join(".config/groqchat/config.toml");
        assert_eq!(path_display(&path), "~/.config/groqchat/config.toml");
    }
}
