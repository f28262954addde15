// Auth Demo Client
//
// Client-side core for the auth demo backend: a single-slot bearer token store,
// an authenticated API client, and the account flows built on top of them.
//
// Key design decisions:
// - TokenStore is a trait; FileTokenStore persists across runs, InMemoryTokenStore serves tests
// - ApiClient re-reads the token store on every call, never caches responses
// - Request bodies are an explicit RequestBody::Json | RequestBody::Multipart variant
// - All remote failures collapse into ApiError, whose Display is the human-readable message
// - Client-side validation (uploads, required fields) fails before any network call

pub mod account;
pub mod api;
pub mod avatar;
pub mod config;
pub mod dto;
pub mod error;
pub mod token_store;
pub mod upload;
pub mod validation;

// Re-exports for convenience
pub use account::Account;
pub use api::{ApiClient, MultipartBody, MultipartPart, RequestBody, RequestOptions};
pub use avatar::Avatar;
pub use config::ClientConfig;
pub use dto::{Me, Profile, TokenResponse, UploadResponse};
pub use error::{AccountError, ApiError, ApiErrorKind, TokenStoreError, ValidationError};
pub use token_store::{AccessToken, FileTokenStore, InMemoryTokenStore, TokenStore};
pub use upload::{ImageFile, UploadPolicy};
pub use validation::{Credentials, PasswordChange, Registration};
