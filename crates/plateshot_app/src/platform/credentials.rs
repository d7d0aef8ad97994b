use std::sync::Mutex;

use dialoguer::Password;
use plateshot_engine::{ApiKey, CredentialError, CredentialProvider, StaticCredentials};
use plateshot_logging::shot_info;

/// Key from the environment, with a terminal prompt as the selection flow.
pub struct PromptCredentials {
    inner: StaticCredentials,
    interactive: bool,
    prompt_lock: Mutex<()>,
}

impl PromptCredentials {
    pub fn from_env(interactive: bool) -> Self {
        Self {
            inner: StaticCredentials::from_env(),
            interactive,
            prompt_lock: Mutex::new(()),
        }
    }

    // Blocks the calling runtime worker while the prompt is open.
    fn prompt_for_key(&self) -> Result<(), CredentialError> {
        let _guard = self
            .prompt_lock
            .lock()
            .map_err(|_| CredentialError::Selection("credential prompt poisoned".to_string()))?;
        // Another prompt may have supplied a key while this one waited.
        if self.inner.current().is_some() {
            return Ok(());
        }

        let entered = Password::new()
            .with_prompt("Gemini API key")
            .allow_empty_password(true)
            .interact()
            .map_err(|err| CredentialError::Selection(err.to_string()))?;
        match ApiKey::new(entered) {
            Some(key) => {
                self.inner.set(key);
                shot_info!("API key entered at prompt");
                Ok(())
            }
            None => Err(CredentialError::Unavailable),
        }
    }
}

#[async_trait::async_trait]
impl CredentialProvider for PromptCredentials {
    async fn has_credential(&self) -> bool {
        self.inner.has_credential().await
    }

    async fn select_credential(&self) -> Result<(), CredentialError> {
        if !self.interactive {
            return self.inner.select_credential().await;
        }
        self.prompt_for_key()
    }

    fn current(&self) -> Option<ApiKey> {
        self.inner.current()
    }
}
