use std::sync::RwLock;

use plateshot_logging::{shot_info, shot_warn};

use crate::{ApiKey, CredentialError};

/// Environment variables checked, in order, for an API key.
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Host-provided access credential boundary.
#[async_trait::async_trait]
pub trait CredentialProvider: Send + Sync {
    async fn has_credential(&self) -> bool;

    /// Runs the host's selection flow; completes once the user supplied a key
    /// or gave up.
    async fn select_credential(&self) -> Result<(), CredentialError>;

    /// The key to use for the next call.
    fn current(&self) -> Option<ApiKey>;
}

/// Pre-flight before any call to the image service.
pub async fn ensure_access_credential(
    provider: &dyn CredentialProvider,
) -> Result<(), CredentialError> {
    if provider.has_credential().await {
        return Ok(());
    }
    shot_info!("No access credential configured; starting credential selection");
    provider.select_credential().await?;
    if provider.has_credential().await {
        Ok(())
    } else {
        shot_warn!("Credential selection finished without a usable key");
        Err(CredentialError::Unavailable)
    }
}

/// A key held in memory, settable at runtime. Has no selection flow of its own.
#[derive(Debug, Default)]
pub struct StaticCredentials {
    key: RwLock<Option<ApiKey>>,
}

impl StaticCredentials {
    pub fn new(key: Option<ApiKey>) -> Self {
        Self {
            key: RwLock::new(key),
        }
    }

    /// Reads the first non-blank key from [`API_KEY_ENV_VARS`].
    pub fn from_env() -> Self {
        let key = API_KEY_ENV_VARS
            .iter()
            .filter_map(|name| std::env::var(name).ok())
            .find_map(ApiKey::new);
        Self::new(key)
    }

    pub fn set(&self, key: ApiKey) {
        if let Ok(mut guard) = self.key.write() {
            *guard = Some(key);
        }
    }
}

#[async_trait::async_trait]
impl CredentialProvider for StaticCredentials {
    async fn has_credential(&self) -> bool {
        self.current().is_some()
    }

    async fn select_credential(&self) -> Result<(), CredentialError> {
        Err(CredentialError::Selection(format!(
            "no interactive selection available; set {}",
            API_KEY_ENV_VARS[0]
        )))
    }

    fn current(&self) -> Option<ApiKey> {
        self.key.read().ok().and_then(|guard| guard.clone())
    }
}
