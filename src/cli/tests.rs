use super::settings::SettingError;
use super::*;

fn parse_args(argv: &[&str]) -> Args {
    Args::try_parse_from(argv)
        .unwrap_or_else(|err| panic!("argv={argv:?} should parse successfully: {err}"))
}

fn words(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

#[test]
fn no_subcommand_means_chat() {
    let args = parse_args(&["groqchat"]);
    assert!(args.command.is_none());
    assert_eq!(args.chat_options(), ChatOptions::default());
}

#[test]
fn global_flags_parse_after_subcommands() {
    let args = parse_args(&[
        "groqchat",
        "chat",
        "-m",
        "gemma2-9b-it",
        "-t",
        "1.1",
        "--max-tokens",
        "2048",
        "--log",
        "chat.log",
        "--env-only",
    ]);
    assert_eq!(args.command, Some(Commands::Chat));
    let options = args.chat_options();
    assert_eq!(options.model.as_deref(), Some("gemma2-9b-it"));
    assert_eq!(options.temperature, Some(1.1));
    assert_eq!(options.max_tokens, Some(2048));
    assert_eq!(options.log.as_deref(), Some("chat.log"));
    assert!(options.env_only);
}

#[test]
fn say_collects_the_whole_prompt() {
    let args = parse_args(&["groqchat", "say", "what", "is", "-1", "squared?"]);
    assert_eq!(
        args.command,
        Some(Commands::Say {
            prompt: words(&["what", "is", "-1", "squared?"])
        })
    );
}

#[test]
fn set_without_key_shows_config() {
    let args = parse_args(&["groqchat", "set"]);
    assert_eq!(
        args.command,
        Some(Commands::Set {
            key: None,
            value: Vec::new()
        })
    );
}

#[test]
fn set_updates_each_known_key() {
    let mut config = Config::default();

    apply_set(&mut config, "default-model", &words(&["LLAMA-3.1-8B-INSTANT"])).unwrap();
    apply_set(&mut config, "temperature", &words(&["0.4"])).unwrap();
    apply_set(&mut config, "max-tokens", &words(&["512"])).unwrap();
    apply_set(&mut config, "base-url", &words(&["https://proxy.local/v1"])).unwrap();
    let message = apply_set(&mut config, "log-file", &words(&["my", "chat.log"])).unwrap();

    assert_eq!(config.default_model.as_deref(), Some("llama-3.1-8b-instant"));
    assert_eq!(config.temperature, Some(0.4));
    assert_eq!(config.max_tokens, Some(512));
    assert_eq!(config.base_url.as_deref(), Some("https://proxy.local/v1"));
    assert_eq!(config.log_file.as_deref(), Some("my chat.log"));
    assert_eq!(message, "✅ Set log-file to: my chat.log");
}

#[test]
fn set_rejects_invalid_values() {
    let mut config = Config::default();

    assert_eq!(
        apply_set(&mut config, "default-model", &words(&["gpt-4"])),
        Err(SettingError::UnknownModel("gpt-4".to_string()))
    );
    assert!(matches!(
        apply_set(&mut config, "temperature", &words(&["3.5"])),
        Err(SettingError::InvalidValue { key: "temperature", .. })
    ));
    assert!(matches!(
        apply_set(&mut config, "max-tokens", &words(&["100"])),
        Err(SettingError::InvalidValue { key: "max-tokens", .. })
    ));
    assert!(matches!(
        apply_set(&mut config, "base-url", &words(&["ftp://nope"])),
        Err(SettingError::InvalidValue { key: "base-url", .. })
    ));
    assert!(matches!(
        apply_set(&mut config, "temperature", &[]),
        Err(SettingError::MissingArgs { .. })
    ));
    assert_eq!(
        apply_set(&mut config, "theme", &words(&["dark"])),
        Err(SettingError::UnknownKey("theme".to_string()))
    );
    assert_eq!(config, Config::default());
}

#[test]
fn unset_clears_values() {
    let mut config = Config {
        temperature: Some(1.0),
        base_url: Some("https://proxy.local/v1".to_string()),
        ..Config::default()
    };

    assert_eq!(apply_unset(&mut config, "temperature").unwrap(), "✅ Unset temperature");
    apply_unset(&mut config, "base-url").unwrap();

    assert_eq!(config, Config::default());
    assert!(apply_unset(&mut config, "nope").is_err());
}

#[test]
fn model_list_marks_the_startup_model() {
    let config = Config {
        default_model: Some("gemma2-9b-it".to_string()),
        ..Config::default()
    };
    let lines = model_list::format_model_list(&config);
    assert_eq!(lines.len(), 5);
    let marked: Vec<&String> = lines.iter().filter(|line| line.starts_with('*')).collect();
    assert_eq!(marked.len(), 1);
    assert!(marked[0].contains("gemma2-9b-it"));
}
