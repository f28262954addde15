// Account flows on top of the API client
//
// Each flow issues its calls sequentially: a dependent call (e.g. the
// "who am I" probe after login) is only sent once the previous one resolved.
// Validation runs before any request is built.

use crate::api::ApiClient;
use crate::config::ClientConfig;
use crate::dto::{
    LoginRequest, Me, NicknameRequest, PasswordChangeRequest, Profile, RegisterRequest,
    TokenResponse, UploadResponse,
};
use crate::error::AccountError;
use crate::token_store::{FileTokenStore, InMemoryTokenStore, TokenStore};
use crate::upload::{ImageFile, UploadPolicy};
use crate::validation::{validate_nickname, Credentials, PasswordChange, Registration};
use std::sync::Arc;

pub const REGISTER_PATH: &str = "/api/auth/register";
pub const LOGIN_PATH: &str = "/api/auth/login";
pub const ME_PATH: &str = "/api/auth/me";
pub const NICKNAME_PATH: &str = "/api/auth/me/nickname";
pub const PASSWORD_PATH: &str = "/api/auth/me/password";
pub const PROFILE_PATH: &str = "/api/me/profile";
pub const PROFILE_IMAGE_PATH: &str = "/api/me/profile-image";

/// Authenticated account session against the backend
#[derive(Debug, Clone)]
pub struct Account {
    api: ApiClient,
    policy: UploadPolicy,
}

impl Account {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            policy: UploadPolicy::default(),
        }
    }

    /// Build the client and token store described by `config`
    pub fn from_config(config: &ClientConfig) -> Self {
        let tokens: Arc<dyn TokenStore> = match &config.token_path {
            Some(path) => Arc::new(FileTokenStore::new(path)),
            None => Arc::new(InMemoryTokenStore::new()),
        };
        Self::new(ApiClient::from_config(config, tokens)).with_upload_policy(config.upload_policy())
    }

    pub fn with_upload_policy(mut self, policy: UploadPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    fn tokens(&self) -> &Arc<dyn TokenStore> {
        self.api.tokens()
    }

    pub fn is_logged_in(&self) -> bool {
        self.tokens().get().is_some_and(|t| !t.is_empty())
    }

    /// Re-validate a stored token at startup.
    ///
    /// Any failure of the probe (expired, revoked, malformed token, backend
    /// unreachable) clears the token and yields the unauthenticated state.
    pub async fn restore(&self) -> Option<Me> {
        if !self.is_logged_in() {
            return None;
        }

        match self.me().await {
            Ok(me) => Some(me),
            Err(e) => {
                tracing::debug!(error = %e, "Stored token rejected, clearing it");
                if let Err(e) = self.tokens().clear() {
                    tracing::warn!(error = %e, "Failed to clear rejected token");
                }
                None
            }
        }
    }

    /// Exchange credentials for a token, store it, and fetch the user.
    ///
    /// A failed login leaves any previously stored token in place.
    pub async fn login(&self, credentials: &Credentials) -> Result<Me, AccountError> {
        credentials.validate()?;

        let request = LoginRequest {
            email: &credentials.email,
            password: &credentials.password,
        };
        let token: TokenResponse = self
            .api
            .post_json(LOGIN_PATH, &request)
            .await?
            .ok_or(AccountError::MissingBody("login"))?;

        self.tokens().set(&token.access_token)?;
        tracing::debug!(email = %credentials.email, "Logged in");

        self.me().await
    }

    /// Create the account, then log in with the same credentials
    pub async fn register(&self, registration: &Registration) -> Result<Me, AccountError> {
        registration.validate()?;

        let request = RegisterRequest {
            email: &registration.email,
            password: &registration.password,
            nickname: &registration.nickname,
        };
        // The created user record is not needed; /me is fetched after login
        let _: Option<serde_json::Value> = self.api.post_json(REGISTER_PATH, &request).await?;

        self.login(&registration.credentials()).await
    }

    pub fn logout(&self) -> Result<(), AccountError> {
        self.tokens().clear()?;
        Ok(())
    }

    pub async fn me(&self) -> Result<Me, AccountError> {
        self.api
            .get(ME_PATH)
            .await?
            .ok_or(AccountError::MissingBody("me"))
    }

    pub async fn update_nickname(&self, nickname: &str) -> Result<Me, AccountError> {
        validate_nickname(nickname)?;

        self.api
            .put_json(NICKNAME_PATH, &NicknameRequest { nickname })
            .await?
            .ok_or(AccountError::MissingBody("nickname"))
    }

    pub async fn change_password(&self, change: &PasswordChange) -> Result<(), AccountError> {
        change.validate()?;

        let request = PasswordChangeRequest {
            current_password: &change.current_password,
            new_password: &change.new_password,
        };
        let _: Option<serde_json::Value> = self.api.put_json(PASSWORD_PATH, &request).await?;
        Ok(())
    }

    pub async fn profile(&self) -> Result<Profile, AccountError> {
        self.api
            .get(PROFILE_PATH)
            .await?
            .ok_or(AccountError::MissingBody("profile"))
    }

    /// Check the image against the upload policy, then send it as `file`
    pub async fn upload_profile_image(
        &self,
        file: ImageFile,
    ) -> Result<UploadResponse, AccountError> {
        self.policy.validate(&file)?;

        tracing::debug!(
            filename = %file.filename,
            size = file.size(),
            "Uploading profile image"
        );
        self.api
            .post_multipart(PROFILE_IMAGE_PATH, file.into_multipart())
            .await?
            .ok_or(AccountError::MissingBody("profile image upload"))
    }

    /// Download an uploaded image by the reference the backend returned
    pub async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, AccountError> {
        Ok(self.api.download(url).await?)
    }
}
