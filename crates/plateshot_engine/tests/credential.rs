use std::sync::Mutex;

use plateshot_engine::{
    ensure_access_credential, ApiKey, CredentialError, CredentialProvider, StaticCredentials,
};
use pretty_assertions::assert_eq;

/// Selection flow that hands out a scripted key.
struct ScriptedSelection {
    key: Mutex<Option<ApiKey>>,
    offered: Option<ApiKey>,
    selections: Mutex<u32>,
}

impl ScriptedSelection {
    fn new(offered: Option<ApiKey>) -> Self {
        Self {
            key: Mutex::new(None),
            offered,
            selections: Mutex::new(0),
        }
    }

    fn selections(&self) -> u32 {
        *self.selections.lock().unwrap()
    }
}

#[async_trait::async_trait]
impl CredentialProvider for ScriptedSelection {
    async fn has_credential(&self) -> bool {
        self.key.lock().unwrap().is_some()
    }

    async fn select_credential(&self) -> Result<(), CredentialError> {
        *self.selections.lock().unwrap() += 1;
        *self.key.lock().unwrap() = self.offered.clone();
        Ok(())
    }

    fn current(&self) -> Option<ApiKey> {
        self.key.lock().unwrap().clone()
    }
}

#[tokio::test]
async fn configured_key_needs_no_selection() {
    let provider = StaticCredentials::new(ApiKey::new("k"));
    assert_eq!(ensure_access_credential(&provider).await, Ok(()));
}

#[tokio::test]
async fn missing_key_triggers_selection_once() {
    let provider = ScriptedSelection::new(ApiKey::new("picked"));
    assert_eq!(ensure_access_credential(&provider).await, Ok(()));
    assert_eq!(provider.selections(), 1);
    assert_eq!(provider.current().unwrap().expose(), "picked");

    assert_eq!(ensure_access_credential(&provider).await, Ok(()));
    assert_eq!(provider.selections(), 1);
}

#[tokio::test]
async fn selection_without_a_key_is_unavailable() {
    let provider = ScriptedSelection::new(None);
    assert_eq!(
        ensure_access_credential(&provider).await,
        Err(CredentialError::Unavailable)
    );
}

#[tokio::test]
async fn static_credentials_cannot_select() {
    let provider = StaticCredentials::default();
    let err = ensure_access_credential(&provider).await.unwrap_err();
    assert!(matches!(err, CredentialError::Selection(_)));

    provider.set(ApiKey::new("late").unwrap());
    assert_eq!(ensure_access_credential(&provider).await, Ok(()));
}

#[test]
fn blank_keys_are_absent_and_keys_are_redacted() {
    assert!(ApiKey::new("   ").is_none());
    let key = ApiKey::new(" abc ").unwrap();
    assert_eq!(key.expose(), "abc");
    assert_eq!(format!("{key:?}"), "ApiKey(***)");
}
