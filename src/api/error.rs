/// Error type for backend requests
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The backend rejected the bearer token, or none was sent
    #[error("not signed in or session expired")]
    Unauthorized,
    #[error("backend returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("request to backend failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected response body from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid api url '{0}'")]
    InvalidUrl(String),
    #[error("invalid request: {0}")]
    Invalid(String),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}
