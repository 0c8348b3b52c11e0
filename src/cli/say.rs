//! TUI-less "say" command: one prompt, one reply on stdout.

use std::error::Error;
use std::fmt;

use crate::auth::AuthManager;
use crate::core::completion::{CompletionClient, GroqClient};
use crate::core::config::Config;
use crate::core::credentials::process_env;
use crate::core::session::{ChatSession, SubmitOutcome};
use crate::ui::chat_loop::{build_session, build_settings, ChatOptions};

#[derive(Debug, PartialEq)]
pub enum SayError {
    EmptyPrompt,
    MissingCredential,
    Failed(String),
}

impl SayError {
    pub fn exit_code(&self) -> i32 {
        match self {
            SayError::MissingCredential => 2,
            SayError::EmptyPrompt | SayError::Failed(_) => 1,
        }
    }

    pub fn quick_fixes(&self) -> &'static [&'static str] {
        match self {
            SayError::MissingCredential => &[
                "groqchat auth                  # store a key in the system keyring",
                "export GROQ_API_KEY=\"gsk_...\"  # or provide it through the environment",
                "Get a key at https://console.groq.com",
            ],
            _ => &[],
        }
    }

    pub fn print(&self) {
        eprintln!("❌ {self}");
        let fixes = self.quick_fixes();
        if !fixes.is_empty() {
            eprintln!();
            eprintln!("💡 Quick fixes:");
            for fix in fixes {
                eprintln!("  • {fix}");
            }
        }
    }
}

impl fmt::Display for SayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SayError::EmptyPrompt => write!(f, "Usage: groqchat say <prompt>"),
            SayError::MissingCredential => write!(f, "No Groq API key configured"),
            SayError::Failed(message) => write!(f, "{message}"),
        }
    }
}

impl Error for SayError {}

/// Run a single turn against `client` and return the reply text.
pub async fn complete_prompt(
    session: &mut ChatSession,
    prompt: &str,
    client: &dyn CompletionClient,
) -> Result<String, SayError> {
    if prompt.trim().is_empty() {
        return Err(SayError::EmptyPrompt);
    }
    match session.submit(prompt, client).await {
        SubmitOutcome::Replied(reply) => Ok(reply),
        SubmitOutcome::Blocked => Err(SayError::MissingCredential),
        SubmitOutcome::Ignored => Err(SayError::EmptyPrompt),
        SubmitOutcome::Failed { error, .. } => Err(SayError::Failed(error)),
    }
}

pub async fn run_say(prompt: Vec<String>, options: &ChatOptions) -> Result<(), Box<dyn Error>> {
    let prompt = prompt.join(" ");
    let config = Config::load()?;
    let settings = build_settings(&config, options)?;

    let auth_manager = AuthManager::new();
    let store = (!options.env_only).then(|| auth_manager.store());
    let mut session = build_session(settings, store, process_env);
    let client = GroqClient::new(GroqClient::resolve_base_url(config.base_url.as_deref()));

    match complete_prompt(&mut session, &prompt, &client).await {
        Ok(reply) => {
            println!("{reply}");
            Ok(())
        }
        Err(err) => {
            err.print();
            std::process::exit(err.exit_code());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::completion::test_support::ScriptedClient;
    use crate::core::completion::CompletionError;
    use crate::core::settings::Settings;

    #[tokio::test]
    async fn reply_is_returned() {
        let mut session = build_session(Settings::default(), None, |_| {
            Some("gsk_env".to_string())
        });
        let client = ScriptedClient::new(vec![Ok("Paris".to_string())]);

        let reply = complete_prompt(&mut session, "Capital of France?", &client).await;

        assert_eq!(reply, Ok("Paris".to_string()));
        let request = client.last_request().unwrap();
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, "user");
    }

    #[tokio::test]
    async fn missing_credential_exits_with_two() {
        let mut session = build_session(Settings::default(), None, |_| None);
        let client = ScriptedClient::default();

        let err = complete_prompt(&mut session, "Hello", &client)
            .await
            .unwrap_err();

        assert_eq!(err, SayError::MissingCredential);
        assert_eq!(err.exit_code(), 2);
        assert!(!err.quick_fixes().is_empty());
        assert_eq!(client.request_count(), 0);
    }

    #[tokio::test]
    async fn api_failures_exit_with_one() {
        let mut session = build_session(Settings::default(), None, |_| {
            Some("gsk_env".to_string())
        });
        let client = ScriptedClient::new(vec![Err(CompletionError::Network(
            "dns failure".to_string(),
        ))]);

        let err = complete_prompt(&mut session, "Hello", &client)
            .await
            .unwrap_err();

        assert_eq!(err, SayError::Failed("Error: network error: dns failure".to_string()));
        assert_eq!(err.exit_code(), 1);
    }

    #[tokio::test]
    async fn empty_prompt_is_a_usage_error() {
        let mut session = build_session(Settings::default(), None, |_| None);
        let client = ScriptedClient::default();
        let err = complete_prompt(&mut session, "  ", &client).await.unwrap_err();
        assert_eq!(err, SayError::EmptyPrompt);
        assert_eq!(err.exit_code(), 1);
    }
}
