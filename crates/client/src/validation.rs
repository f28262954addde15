// Form inputs and the checks run on them before anything is sent

use crate::error::ValidationError;

fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(())
    }
}

/// Login form
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require("email", &self.email)?;
        require("password", &self.password)
    }
}

/// Registration form
#[derive(Debug, Clone)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub nickname: String,
}

impl Registration {
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        nickname: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            nickname: nickname.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require("email", &self.email)?;
        require("password", &self.password)?;
        require("nickname", &self.nickname)
    }

    /// Credentials for the automatic login after registering
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.email.clone(), self.password.clone())
    }
}

pub fn validate_nickname(nickname: &str) -> Result<(), ValidationError> {
    require("nickname", nickname)
}

/// Password change form
#[derive(Debug, Clone)]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl PasswordChange {
    pub fn new(
        current_password: impl Into<String>,
        new_password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            current_password: current_password.into(),
            new_password: new_password.into(),
            confirm_password: confirm_password.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require("current password", &self.current_password)?;
        require("new password", &self.new_password)?;
        require("password confirmation", &self.confirm_password)?;
        if self.new_password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        Ok(())
    }
}
