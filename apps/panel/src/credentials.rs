use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info};

use crate::errors::PanelError;
use crate::storage::KeyValueStore;
use crate::view::Prompter;

/// Storage key of the single per-installation credential.
pub const CREDENTIAL_KEY: &str = "user_api_key";

const FIRST_TIME_PROMPT: &str = "First Time Setup:\nPlease enter your Secret Key:";

/// Holds the shared-secret token sent with every extraction request.
///
/// The token is never validated locally; the extraction service is the only
/// judge, and a rejection clears it (see `ExtractionClient::submit`).
#[derive(Clone)]
pub struct CredentialStore {
    store: Arc<dyn KeyValueStore>,
}

impl CredentialStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// The persisted credential, if any.
    pub async fn get(&self) -> Result<Option<String>, PanelError> {
        let value = self.store.get(CREDENTIAL_KEY).await?;
        Ok(match value {
            Some(Value::String(token)) if !token.is_empty() => Some(token),
            _ => None,
        })
    }

    /// Returns the stored credential or asks the user for one.
    ///
    /// A blank or cancelled answer yields `None` and nothing is persisted;
    /// the caller must abort whatever needed the credential.
    pub async fn get_or_prompt(
        &self,
        prompter: &mut dyn Prompter,
    ) -> Result<Option<String>, PanelError> {
        if let Some(token) = self.get().await? {
            return Ok(Some(token));
        }

        let answer = prompter.ask_text(FIRST_TIME_PROMPT, None).await;
        let token = match answer.as_deref().map(str::trim) {
            Some(token) if !token.is_empty() => token.to_string(),
            _ => {
                debug!("Credential prompt dismissed");
                return Ok(None);
            }
        };

        self.store
            .set(CREDENTIAL_KEY, Value::String(token.clone()))
            .await?;
        info!("Credential stored");
        Ok(Some(token))
    }

    /// Forgets the credential. Clearing an absent credential is fine.
    pub async fn clear(&self) -> Result<(), PanelError> {
        self.store.remove(CREDENTIAL_KEY).await?;
        info!("Credential cleared");
        Ok(())
    }
}
