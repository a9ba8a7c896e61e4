/// Unified error handling module
use reqwest::StatusCode;

/// Failure of a single upstream fetch
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// DNS, TLS, connect, reset or deadline failure; nothing was decoded
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Upstream answered with something other than 200
    #[error("Empty result: upstream returned status {status}")]
    EmptyResult { status: StatusCode },

    /// 200 with a body that does not match the expected shape
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// The HTTP client itself could not be built
    #[error("Client configuration error: {0}")]
    Config(String),
}

impl FetchError {
    /// Whether the caller must see this failure instead of an empty list
    pub fn is_escalated(&self) -> bool {
        matches!(
            self,
            FetchError::Transport(_) | FetchError::InvalidEndpoint(_) | FetchError::Config(_)
        )
    }

    /// Short code for log lines, mirrors the upstream status buckets
    pub fn code(&self) -> &'static str {
        match self {
            FetchError::Transport(e) if e.is_timeout() => "UPSTREAM_TIMEOUT",
            FetchError::Transport(_) => "UPSTREAM_ERROR",
            FetchError::EmptyResult { status } => match status.as_u16() {
                403 => "UPSTREAM_403",
                404 => "UPSTREAM_404",
                429 => "UPSTREAM_429",
                500..=599 => "UPSTREAM_5XX",
                _ => "UPSTREAM_EMPTY",
            },
            FetchError::Decode(_) => "DECODE_ERROR",
            FetchError::InvalidEndpoint(_) => "INVALID_ENDPOINT",
            FetchError::Config(_) => "CLIENT_CONFIG",
        }
    }
}

/// Type alias for fetch results
pub type FetchResult<T> = Result<T, FetchError>;
