// Error types for the auth demo client

use std::path::PathBuf;
use thiserror::Error;

/// Message used when a failure response carries no usable `message`/`error` field
pub const FALLBACK_MESSAGE: &str = "Request failed";

/// Broad classification of an API failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// The exchange never produced a response (connection refused, DNS, body read)
    Transport,
    /// The backend answered with a non-success status
    Server { status: u16 },
    /// A success response whose body was not valid JSON for the expected type
    Decode,
    /// The request itself could not be built (body serialization, header values)
    Encode,
}

/// Normalized error raised by the API client.
///
/// Displays as the human-readable message only; the status code and raw
/// body are never part of the message.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ApiError {
    kind: ApiErrorKind,
    message: String,
}

impl ApiError {
    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::Transport,
            message: msg.into(),
        }
    }

    /// Create a server-reported error
    pub fn server(status: u16, msg: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::Server { status },
            message: msg.into(),
        }
    }

    /// Create a decode error
    pub fn decode(msg: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::Decode,
            message: msg.into(),
        }
    }

    /// Create an encode error
    pub fn encode(msg: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::Encode,
            message: msg.into(),
        }
    }

    pub fn kind(&self) -> ApiErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// HTTP status for server-reported failures
    pub fn status(&self) -> Option<u16> {
        match self.kind {
            ApiErrorKind::Server { status } => Some(status),
            _ => None,
        }
    }

    /// Whether repeating the same action unchanged could succeed.
    ///
    /// Transport failures and 5xx responses are worth retrying by the user;
    /// 4xx responses and encoding problems on either side are not.
    pub fn is_recoverable(&self) -> bool {
        match self.kind {
            ApiErrorKind::Transport => true,
            ApiErrorKind::Server { status } => status >= 500,
            ApiErrorKind::Decode | ApiErrorKind::Encode => false,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::transport(err.to_string())
    }
}

/// Errors from persisting or removing the bearer token
#[derive(Debug, Error)]
pub enum TokenStoreError {
    #[error("token file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode token file: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Client-side validation failures, caught before any network call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("New password and confirmation do not match")]
    PasswordMismatch,

    #[error("Only JPG/PNG/WebP files can be uploaded")]
    FileTypeNotAllowed { content_type: String },

    #[error("File is too large (max {max_mb}MB)")]
    FileTooLarge { size: u64, max_mb: u64 },
}

/// Errors surfaced by the account flows
#[derive(Debug, Error)]
pub enum AccountError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    TokenStore(#[from] TokenStoreError),

    /// A success response came back empty where a record was required
    #[error("{0} response had no content")]
    MissingBody(&'static str),
}

impl AccountError {
    /// True when the failure was caught locally and nothing was sent
    pub fn is_validation(&self) -> bool {
        matches!(self, AccountError::Validation(_))
    }
}
