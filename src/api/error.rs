use reqwest::StatusCode;

/// Fallback text when a rejected submission carries no server message
pub const GENERIC_SUBMIT_FAILURE: &str = "Failed to submit contact form";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{endpoint} returned status {status}")]
    Status {
        endpoint: &'static str,
        status: StatusCode,
    },

    #[error("could not decode {endpoint} response: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The backend refused a submission; `message` is shown to the user as-is.
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    #[error("invalid request URL: {0}")]
    Url(#[from] url::ParseError),
}

impl ApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } | ApiError::Rejected { status, .. } => Some(*status),
            ApiError::Transport(err) => err.status(),
            ApiError::Decode { .. } | ApiError::Url(_) => None,
        }
    }
}
