//! Error types for relnotes.

use thiserror::Error;

/// Main error type for relnotes operations.
#[derive(Error, Debug)]
pub enum ReleaseNotesError {
    // Configuration errors
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // Forge errors
    #[error("Could not list releases: {0}")]
    ReleasesUnavailable(String),

    #[error("Release {tag} has an invalid created_at timestamp '{value}'")]
    InvalidReleaseTimestamp {
        tag: String,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    // Git errors
    #[error("Boundary tag not found in local history: {0}")]
    BoundaryNotFound(String),

    #[error("Git operation failed: {0}")]
    GitError(#[from] git2::Error),

    // Rendering errors
    #[error(
        "Unrecognized author format for commit {commit}: expected an address like id+username@users.noreply.github.com, got '{email}'"
    )]
    UnrecognizedAuthorFormat { commit: String, email: String },

    // Network/API errors
    #[error("Network request failed: {0}")]
    NetworkError(String),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("URL parse error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("JSON parse error: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] log::SetLoggerError),
}

/// Result type alias using ReleaseNotesError
pub type Result<T> = std::result::Result<T, ReleaseNotesError>;

impl ReleaseNotesError {
    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create an unrecognized author error
    pub fn unrecognized_author(
        commit: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self::UnrecognizedAuthorFormat {
            commit: commit.into(),
            email: email.into(),
        }
    }
}

impl From<reqwest::Error> for ReleaseNotesError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() {
            Self::NetworkError(format!("could not reach forge: {err}"))
        } else {
            Self::NetworkError(err.to_string())
        }
    }
}
