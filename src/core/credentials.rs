//! API credential resolution.
//!
//! Sources are consulted in priority order: the host secret store (system
//! keyring), then the `GROQ_API_KEY` environment variable. A key typed
//! into the settings panel is the last resort and lives only for the
//! session. Presence is the only check performed; there is no built-in
//! fallback key.

use std::error::Error;
use std::fmt;

use keyring::Entry;
use tracing::{debug, warn};

use crate::core::keyring::KeyringAccessError;

pub const KEYRING_SERVICE: &str = "groqchat";
pub const KEYRING_ACCOUNT: &str = "groq";
pub const API_KEY_ENV: &str = "GROQ_API_KEY";

/// Environment variable lookup, injectable so resolution can be tested
/// without touching the process environment.
pub type EnvLookup = fn(&str) -> Option<String>;

/// A non-empty API key. Formatting never reveals more than the last four
/// characters.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Returns `None` for empty or whitespace-only input.
    pub fn new(raw: impl AsRef<str>) -> Option<Self> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn masked(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() <= 4 {
            return "•".repeat(chars.len());
        }
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("••••{tail}")
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey({})", self.masked())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    Keyring,
    Environment,
    Typed,
}

impl CredentialSource {
    pub fn describe(self) -> &'static str {
        match self {
            CredentialSource::Keyring => "system keyring",
            CredentialSource::Environment => "GROQ_API_KEY",
            CredentialSource::Typed => "entered this session",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCredential {
    pub key: ApiKey,
    pub source: CredentialSource,
}

/// Storage for a single secret, keyed by the store's own service/account.
pub trait SecretStore {
    fn get(&self) -> Result<Option<String>, Box<dyn Error>>;
    fn set(&self, secret: &str) -> Result<(), Box<dyn Error>>;
    /// Returns whether a secret existed before deletion.
    fn delete(&self) -> Result<bool, Box<dyn Error>>;
}

/// The platform keyring (Secret Service, macOS Keychain, Windows
/// Credential Manager).
pub struct KeyringStore {
    service: String,
    account: String,
}

impl KeyringStore {
    pub fn new(service: impl Into<String>, account: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            account: account.into(),
        }
    }

    fn entry(&self) -> Result<Entry, KeyringAccessError> {
        Entry::new(&self.service, &self.account).map_err(KeyringAccessError::from)
    }
}

impl Default for KeyringStore {
    fn default() -> Self {
        Self::new(KEYRING_SERVICE, KEYRING_ACCOUNT)
    }
}

impl SecretStore for KeyringStore {
    fn get(&self) -> Result<Option<String>, Box<dyn Error>> {
        match self.entry()?.get_password() {
            Ok(secret) => Ok(Some(secret)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(err) => Err(Box::new(KeyringAccessError::from(err))),
        }
    }

    fn set(&self, secret: &str) -> Result<(), Box<dyn Error>> {
        self.entry()?
            .set_password(secret)
            .map_err(|err| Box::new(KeyringAccessError::from(err)) as Box<dyn Error>)
    }

    fn delete(&self) -> Result<bool, Box<dyn Error>> {
        match self.entry()?.delete_credential() {
            Ok(()) => Ok(true),
            Err(keyring::Error::NoEntry) => Ok(false),
            Err(err) => Err(Box::new(KeyringAccessError::from(err))),
        }
    }
}

/// Resolve the credential from the secret store and environment.
///
/// `store` is `None` when the keyring is bypassed (`--env-only`). A store
/// failure is logged and resolution continues with the environment.
pub fn resolve_credential(
    store: Option<&dyn SecretStore>,
    env: EnvLookup,
) -> Option<ResolvedCredential> {
    if let Some(store) = store {
        match store.get() {
            Ok(Some(secret)) => {
                if let Some(key) = ApiKey::new(secret) {
                    debug!(source = "keyring", "resolved API key");
                    return Some(ResolvedCredential {
                        key,
                        source: CredentialSource::Keyring,
                    });
                }
                debug!("keyring entry is blank; ignoring");
            }
            Ok(None) => debug!("no keyring entry"),
            Err(err) => {
                let recoverable = err
                    .downcast_ref::<KeyringAccessError>()
                    .is_some_and(KeyringAccessError::is_recoverable);
                warn!(
                    error = %err,
                    recoverable,
                    "keyring lookup failed; falling back to environment"
                );
            }
        }
    }

    if let Some(key) = env(API_KEY_ENV).and_then(ApiKey::new) {
        debug!(source = "environment", "resolved API key");
        return Some(ResolvedCredential {
            key,
            source: CredentialSource::Environment,
        });
    }

    None
}

/// Environment lookup used outside tests.
pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

pub fn typed_credential(input: &str) -> Option<ResolvedCredential> {
    ApiKey::new(input).map(|key| ResolvedCredential {
        key,
        source: CredentialSource::Typed,
    })
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::SecretStore;
    use std::cell::RefCell;
    use std::error::Error;

    /// In-memory secret store. `failing` simulates a locked keyring.
    #[derive(Default)]
    pub struct MemoryStore {
        pub secret: RefCell<Option<String>>,
        pub failing: bool,
    }

    impl MemoryStore {
        pub fn with_secret(secret: &str) -> Self {
            Self {
                secret: RefCell::new(Some(secret.to_string())),
                failing: false,
            }
        }

        pub fn failing() -> Self {
            Self {
                secret: RefCell::new(None),
                failing: true,
            }
        }
    }

    impl SecretStore for MemoryStore {
        fn get(&self) -> Result<Option<String>, Box<dyn Error>> {
            if self.failing {
                return Err("keyring locked".into());
            }
            Ok(self.secret.borrow().clone())
        }

        fn set(&self, secret: &str) -> Result<(), Box<dyn Error>> {
            if self.failing {
                return Err("keyring locked".into());
            }
            *self.secret.borrow_mut() = Some(secret.to_string());
            Ok(())
        }

        fn delete(&self) -> Result<bool, Box<dyn Error>> {
            if self.failing {
                return Err("keyring locked".into());
            }
            Ok(self.secret.borrow_mut().take().is_some())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::MemoryStore;
    use super::*;

    fn env_set(name: &str) -> Option<String> {
        assert_eq!(name, API_KEY_ENV);
        Some("gsk_from_env".to_string())
    }

    fn env_blank(_: &str) -> Option<String> {
        Some(String::new())
    }

    fn env_unset(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn keyring_takes_priority_over_environment() {
        let store = MemoryStore::with_secret("gsk_from_keyring");
        let resolved = resolve_credential(Some(&store), env_set)
            .expect("credential");
        assert_eq!(resolved.source, CredentialSource::Keyring);
        assert_eq!(resolved.key.expose(), "gsk_from_keyring");
    }

    #[test]
    fn environment_is_used_when_keyring_is_empty() {
        let store = MemoryStore::default();
        let resolved =
            resolve_credential(Some(&store), env_set).expect("credential");
        assert_eq!(resolved.source, CredentialSource::Environment);
    }

    #[test]
    fn keyring_failure_falls_through_to_environment() {
        let store = MemoryStore::failing();
        let resolved =
            resolve_credential(Some(&store), env_set).expect("credential");
        assert_eq!(resolved.source, CredentialSource::Environment);
    }

    #[test]
    fn env_only_skips_the_store() {
        let resolved = resolve_credential(None, env_set).expect("credential");
        assert_eq!(resolved.source, CredentialSource::Environment);
    }

    #[test]
    fn absent_everywhere_yields_none() {
        let store = MemoryStore::default();
        assert!(resolve_credential(Some(&store), env_unset).is_none());
    }

    #[test]
    fn blank_values_count_as_absent() {
        let store = MemoryStore::with_secret("   ");
        assert!(resolve_credential(Some(&store), env_blank).is_none());
        assert!(typed_credential(" \t ").is_none());
    }

    #[test]
    fn typed_keys_are_trimmed() {
        let typed = typed_credential("  gsk_typed  ").expect("credential");
        assert_eq!(typed.key.expose(), "gsk_typed");
        assert_eq!(typed.source, CredentialSource::Typed);
    }

    #[test]
    fn debug_output_redacts_the_key() {
        let key = ApiKey::new("gsk_secret_value_9876").unwrap();
        let debug = format!("{key:?}");
        assert!(!debug.contains("secret"));
        assert!(debug.ends_with("9876)"));
        assert_eq!(ApiKey::new("abc").unwrap().masked(), "•••");
    }
}
