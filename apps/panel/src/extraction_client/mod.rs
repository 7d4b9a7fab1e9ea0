/// Extraction Client — the single point of contact with the remote
/// extraction service.
///
/// One POST per upload: `{"text": ...}` in, `{"jobs": [...]}` out. There is
/// deliberately no retry, timeout or backoff; the first failure goes
/// straight back to the user, who re-invokes by uploading again.
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::credentials::CredentialStore;
use crate::errors::PanelError;
use crate::models::ParsedJobs;

const AUTH_HEADER: &str = "X-Auth-Key";

#[derive(Debug, Serialize)]
struct ExtractRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct WorkerError {
    #[serde(default)]
    error: Option<Value>,
}

impl WorkerError {
    /// The human-readable message, accepting both `{"error": "..."}` and
    /// `{"error": {"message": "..."}}`.
    fn message(self) -> Option<String> {
        let text = match self.error? {
            Value::String(s) => s,
            Value::Object(mut obj) => match obj.remove("message") {
                Some(Value::String(s)) => s,
                _ => return None,
            },
            _ => return None,
        };
        (!text.is_empty()).then_some(text)
    }
}

#[derive(Clone)]
pub struct ExtractionClient {
    client: Client,
    url: String,
    credentials: CredentialStore,
}

impl ExtractionClient {
    pub fn new(url: impl Into<String>, credentials: CredentialStore) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
            credentials,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Sends `text` for extraction, authenticated with `credential`.
    ///
    /// A 401 clears the stored credential before failing, so the next upload
    /// prompts for a fresh one.
    pub async fn submit(&self, text: &str, credential: &str) -> Result<ParsedJobs, PanelError> {
        debug!("Submitting {} chars to {}", text.len(), self.url);

        let response = self
            .client
            .post(&self.url)
            .header(AUTH_HEADER, credential)
            .json(&ExtractRequest { text })
            .send()
            .await?;

        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            warn!("Extraction service rejected the credential");
            if let Err(e) = self.credentials.clear().await {
                warn!("Could not clear rejected credential: {e}");
            }
            return Err(PanelError::Authentication);
        }

        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            let message = serde_json::from_slice::<WorkerError>(&body)
                .ok()
                .and_then(WorkerError::message)
                .unwrap_or_else(|| status_text(status));
            warn!("Extraction service returned {}: {}", status, message);
            return Err(PanelError::Remote(message));
        }

        let body = response.bytes().await?;
        let parsed: ParsedJobs = serde_json::from_slice(&body)
            .map_err(|e| PanelError::MalformedResponse(e.to_string()))?;

        debug!(
            "Extraction succeeded: {} jobs",
            parsed.jobs.as_ref().map_or(0, Vec::len)
        );
        Ok(parsed)
    }
}

fn status_text(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(String::from)
        .unwrap_or_else(|| status.as_str().to_string())
}
