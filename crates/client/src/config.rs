// Client Configuration
//
// Loaded from environment variables, with builder-style overrides for
// callers (the CLI passes its flags through these).

use crate::token_store::FileTokenStore;
use crate::upload::{UploadPolicy, MIB};
use std::env;
use std::path::PathBuf;

/// Backend origin used when nothing else is configured
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Default profile image size limit in megabytes
pub const DEFAULT_UPLOAD_MAX_MB: u64 = 5;

/// Configuration for the API client and account flows
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend origin; request paths such as `/api/auth/me` are resolved against it
    pub api_url: String,

    /// Where the bearer token is persisted (None = keep it in memory only)
    pub token_path: Option<PathBuf>,

    /// Profile image size limit in megabytes
    pub upload_max_mb: u64,
}

impl ClientConfig {
    /// Create configuration from environment variables
    ///
    /// Environment variables:
    /// - `AUTHDEMO_API_URL`: backend origin (default: http://localhost:8080)
    /// - `AUTHDEMO_TOKEN_FILE`: token file path (default: platform config dir)
    /// - `AUTHDEMO_UPLOAD_MAX_MB`: upload size limit in MB (default: 5)
    pub fn from_env() -> Self {
        let api_url = env::var("AUTHDEMO_API_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let token_path = env::var("AUTHDEMO_TOKEN_FILE")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .or_else(FileTokenStore::default_path);

        let upload_max_mb = env::var("AUTHDEMO_UPLOAD_MAX_MB")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|mb| *mb > 0 && mb.checked_mul(MIB).is_some())
            .unwrap_or(DEFAULT_UPLOAD_MAX_MB);

        Self {
            api_url,
            token_path,
            upload_max_mb,
        }
    }

    /// Set the backend origin
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Set the token file path
    pub fn with_token_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.token_path = Some(path.into());
        self
    }

    /// Keep the token in memory only
    pub fn without_token_file(mut self) -> Self {
        self.token_path = None;
        self
    }

    /// Set the upload size limit in megabytes
    pub fn with_upload_max_mb(mut self, mb: u64) -> Self {
        self.upload_max_mb = mb;
        self
    }

    /// Upload policy derived from this configuration
    ///
    /// A limit too large to express in bytes is capped at `u64::MAX`.
    pub fn upload_policy(&self) -> UploadPolicy {
        UploadPolicy::default().with_max_bytes(self.upload_max_mb.saturating_mul(MIB))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token_path: FileTokenStore::default_path(),
            upload_max_mb: DEFAULT_UPLOAD_MAX_MB,
        }
    }
}
