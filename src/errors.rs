//! Error types shared across the application.

use std::fmt::{Display, Formatter};

/// Shared application result type.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error enumeration covering all domain failure modes.
///
/// `Config`, `Extraction`, and `Auth` are fatal: they abort the run before
/// any session starts. `Transport` and `Payload` are scoped to a single
/// session and are folded into its boolean outcome at the driver boundary.
#[derive(Debug)]
pub enum AppError {
    /// Configuration parsing or validation failure.
    Config(String),
    /// Launch URL is malformed or carries no authentication payload.
    Extraction(String),
    /// Token exchange failed or returned no access token.
    Auth(String),
    /// HTTP call failed, timed out, or returned a non-success status.
    Transport {
        /// Remote status code, when a response was received at all.
        status: Option<u16>,
        /// Remote error body, or the underlying transport error text.
        body: String,
    },
    /// Expected field missing from a remote response.
    Payload(String),
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Extraction(msg) => write!(f, "extraction: {msg}"),
            Self::Auth(msg) => write!(f, "auth: {msg}"),
            Self::Transport {
                status: Some(status),
                body,
            } => write!(f, "transport: status {status}: {body}"),
            Self::Transport { status: None, body } => write!(f, "transport: {body}"),
            Self::Payload(msg) => write!(f, "payload: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(format!("invalid config: {err}"))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport {
            status: err.status().map(|status| status.as_u16()),
            body: err.to_string(),
        }
    }
}
