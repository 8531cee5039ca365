//! In-memory Basic auth credential store.
//!
//! Holds at most one username/password pair. Never persisted: the pair
//! lives only as long as the store and is gone on restart.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::header::HeaderValue;
use tokio::sync::RwLock;

/// A username/password pair for HTTP Basic authentication.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub username: String,
    pub password: String,
}

impl Credential {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// `Basic base64(username:password)`.
    pub fn basic_token(&self) -> String {
        let encoded = STANDARD.encode(format!("{}:{}", self.username, self.password));
        format!("Basic {}", encoded)
    }

    /// The Basic token as a sensitive header value.
    ///
    /// Returns `None` if the credential contains bytes that cannot appear in a header.
    pub fn header_value(&self) -> Option<HeaderValue> {
        let mut value = HeaderValue::from_str(&self.basic_token()).ok()?;
        value.set_sensitive(true);
        Some(value)
    }
}

// Keep the password out of debug output.
impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Shared holder of the current credential.
///
/// Reads and writes always replace or copy the whole pair.
#[derive(Debug, Default)]
pub struct CredentialStore {
    current: RwLock<Option<Credential>>,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored credential.
    pub async fn set(&self, credential: Credential) {
        *self.current.write().await = Some(credential);
    }

    /// Discard the stored credential.
    pub async fn clear(&self) {
        *self.current.write().await = None;
    }

    /// Snapshot of the stored credential.
    pub async fn get(&self) -> Option<Credential> {
        self.current.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.current.read().await.is_some()
    }

    /// The stored username, or `None` when nobody is signed in.
    pub async fn current_username(&self) -> Option<String> {
        self.current
            .read()
            .await
            .as_ref()
            .map(|c| c.username.clone())
    }
}
