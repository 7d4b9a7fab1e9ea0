use thiserror::Error;

/// Every failure the panel can surface.
///
/// Handlers return `Result<T, PanelError>`; the orchestrator turns the error
/// into a modal alert via [`PanelError::user_message`].
#[derive(Debug, Error)]
pub enum PanelError {
    /// The user dismissed the credential prompt. Expected, not a fault.
    #[error("Cannot proceed without an API Key.")]
    CredentialRefused,

    #[error("Please upload a PDF file ({0} is not a PDF).")]
    UnsupportedFile(String),

    #[error("Could not read PDF: {0}")]
    Extraction(String),

    #[error("Unauthorized. The Secret Key was incorrect and has been cleared. Please try again.")]
    Authentication,

    #[error("Worker Error: {0}")]
    Remote(String),

    #[error("Received invalid data from AI. Please try uploading again.")]
    MalformedResponse(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl PanelError {
    /// Text for the blocking alert. Faults are logged here so that nothing
    /// reaches the user without a diagnostic trail.
    pub fn user_message(&self) -> String {
        match self {
            PanelError::CredentialRefused | PanelError::UnsupportedFile(_) => {
                tracing::debug!("Upload aborted: {self}");
                self.to_string()
            }
            PanelError::MalformedResponse(detail) => {
                tracing::error!("Malformed extraction response: {detail}");
                format!("Error: {self}")
            }
            PanelError::Storage(e) => {
                tracing::error!("Storage error: {e:?}");
                format!("Error: {self}")
            }
            _ => {
                tracing::error!("{self}");
                format!("Error: {self}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refused_credential_message_has_no_error_prefix() {
        assert_eq!(
            PanelError::CredentialRefused.user_message(),
            "Cannot proceed without an API Key."
        );
    }

    #[test]
    fn test_remote_error_carries_message() {
        let msg = PanelError::Remote("quota exceeded".to_string()).user_message();
        assert_eq!(msg, "Error: Worker Error: quota exceeded");
    }

    #[test]
    fn test_malformed_response_hides_detail() {
        let msg = PanelError::MalformedResponse("expected value at line 1".to_string())
            .user_message();
        assert_eq!(
            msg,
            "Error: Received invalid data from AI. Please try uploading again."
        );
    }
}
