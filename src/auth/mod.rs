//! Managing the API key stored in the host secret store.

use crate::core::credentials::{
    process_env, resolve_credential, ApiKey, CredentialSource, KeyringStore, SecretStore,
};
use std::error::Error;

mod ui;

use self::ui::{prompt_api_key, prompt_confirmation, UiError};

fn map_ui_result<T>(result: Result<T, UiError>) -> Result<T, Box<dyn Error>> {
    result.map_err(|err| Box::new(err) as Box<dyn Error>)
}

pub struct AuthManager {
    store: Box<dyn SecretStore>,
}

impl AuthManager {
    pub fn new() -> Self {
        Self::with_store(Box::new(KeyringStore::default()))
    }

    pub fn with_store(store: Box<dyn SecretStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &dyn SecretStore {
        self.store.as_ref()
    }

    pub fn store_key(&self, raw: &str) -> Result<(), Box<dyn Error>> {
        let key = ApiKey::new(raw).ok_or("API key cannot be empty")?;
        self.store.set(key.expose())?;
        tracing::info!("stored API key in keyring");
        Ok(())
    }

    /// Returns whether a key was present.
    pub fn remove_key(&self) -> Result<bool, Box<dyn Error>> {
        self.store.delete()
    }

    /// Which source would supply the key at startup, if any.
    pub fn active_source(&self, env_only: bool) -> Option<CredentialSource> {
        let store = if env_only {
            None
        } else {
            Some(self.store.as_ref())
        };
        resolve_credential(store, process_env).map(|credential| credential.source)
    }

    pub fn status(&self, env_only: bool) -> String {
        match self.active_source(env_only) {
            Some(source) => format!("API key: found ({})", source.describe()),
            None => "API key: not configured (run 'groqchat auth' or set GROQ_API_KEY)".to_string(),
        }
    }

    pub fn interactive_auth(&self) -> Result<(), Box<dyn Error>> {
        if matches!(self.store.get(), Ok(Some(_)))
            && !map_ui_result(prompt_confirmation(
                "A Groq API key is already stored. Replace it?",
            ))?
        {
            println!("Cancelled.");
            return Ok(());
        }

        let token = map_ui_result(prompt_api_key())?;
        self.store_key(&token)?;

        println!("✓ API key stored securely in your system keyring");
        println!();
        println!("✅ Authentication configured successfully!");
        println!("You can now run groqchat without setting GROQ_API_KEY.");
        Ok(())
    }

    pub fn interactive_deauth(&self) -> Result<(), Box<dyn Error>> {
        if self.remove_key()? {
            println!("✅ Removed the Groq API key from your system keyring");
        } else {
            println!("No Groq API key is stored in your system keyring.");
        }
        if std::env::var_os("GROQ_API_KEY").is_some() {
            println!("⚠️  GROQ_API_KEY is still set in your environment and will be used.");
        }
        Ok(())
    }
}

impl Default for AuthManager {
    fn default() -> Self {
        Self::new()
    }
}
