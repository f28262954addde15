// Wire types mirrored from the backend's JSON shapes
//
// The client does not validate these beyond serde's shape checks.

use crate::token_store::AccessToken;
use serde::{Deserialize, Serialize};

/// The authenticated user as returned by `/api/auth/me`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Me {
    pub id: i64,
    pub email: String,
    pub nickname: String,
}

/// Login response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub access_token: AccessToken,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub nickname: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct NicknameRequest<'a> {
    pub nickname: &'a str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChangeRequest<'a> {
    pub current_password: &'a str,
    pub new_password: &'a str,
}

/// Profile record from `/api/me/profile`.
///
/// Only the fields the client renders are named; anything else the backend
/// sends is kept in `extra` untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(
        default,
        alias = "profileUrl",
        alias = "profileImage",
        skip_serializing_if = "Option::is_none"
    )]
    pub profile_image_url: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Profile {
    /// Image reference, treating an empty string as absent
    pub fn image_url(&self) -> Option<&str> {
        self.profile_image_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
    }
}

/// Profile image upload response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub filename: String,
    pub url: String,
}
