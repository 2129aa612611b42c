//! Types for authentication and the signed-in user

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Profile of the signed-in user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_id: i64,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default, with = "crate::timestamp::optional")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, with = "crate::timestamp::optional")]
    pub last_login: Option<NaiveDateTime>,
}

impl UserProfile {
    /// Full name when known, otherwise the email address
    pub fn display_name(&self) -> &str {
        match self.full_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.email,
        }
    }
}

/// Body of `POST /api/auth/login`
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of `POST /api/auth/signup`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

/// Flat authentication envelope returned by login and signup
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,

    #[serde(rename = "type", default)]
    pub token_type: Option<String>,

    #[serde(flatten)]
    pub user: UserProfile,
}

/// Token plus cached profile; the client-held proof of authentication
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: UserProfile,
}

impl AuthResponse {
    /// Split the envelope into a session; a missing token is an error
    pub fn into_session(self) -> Result<Session> {
        match self.token {
            Some(token) if !token.is_empty() => Ok(Session {
                token,
                user: self.user,
            }),
            _ => Err(Error::general(
                "Authentication response did not include a token",
            )),
        }
    }
}

/// Login form input
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    /// Remember the email for the next visit
    pub remember: bool,
}

impl Credentials {
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
            remember: false,
        }
    }

    pub fn remember(mut self, value: bool) -> Self {
        self.remember = value;
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.email.trim().is_empty() {
            return Err(Error::validation("Email is required"));
        }
        if self.password.is_empty() {
            return Err(Error::validation("Password is required"));
        }
        Ok(())
    }
}

/// Signup form input
#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

impl SignupForm {
    pub(crate) fn to_request(&self) -> Result<SignupRequest> {
        if self.full_name.trim().is_empty() {
            return Err(Error::validation("Full name is required"));
        }
        if self.email.trim().is_empty() {
            return Err(Error::validation("Email is required"));
        }
        if self.password.is_empty() {
            return Err(Error::validation("Password is required"));
        }
        Ok(SignupRequest {
            full_name: self.full_name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

/// Remember-me pair, stored independently of the session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RememberMe {
    pub email: Option<String>,
    pub remember: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_auth_response_into_session() {
        let response: AuthResponse = serde_json::from_value(json!({
            "token": "jwt-token",
            "type": "Bearer",
            "userId": 7,
            "email": "ana@example.com",
            "fullName": "Ana Santos",
            "role": "ROLE_USER",
            "createdAt": "2024-01-15T10:30:00",
            "lastLogin": null
        }))
        .unwrap();

        let session = response.into_session().unwrap();
        assert_eq!(session.token, "jwt-token");
        assert_eq!(session.user.user_id, 7);
        assert_eq!(session.user.display_name(), "Ana Santos");
        assert!(session.user.last_login.is_none());
    }

    #[test]
    fn test_auth_response_without_token_is_rejected() {
        let response: AuthResponse = serde_json::from_value(json!({
            "userId": 7,
            "email": "ana@example.com"
        }))
        .unwrap();
        assert!(response.into_session().is_err());
    }

    #[test]
    fn test_display_name_falls_back_to_email() {
        let user = UserProfile {
            user_id: 1,
            email: "ana@example.com".to_string(),
            full_name: Some("  ".to_string()),
            role: None,
            created_at: None,
            last_login: None,
        };
        assert_eq!(user.display_name(), "ana@example.com");
    }

    #[test]
    fn test_credentials_require_email_and_password() {
        assert!(matches!(
            Credentials::new("", "secret").validate(),
            Err(Error::Validation(_))
        ));
        assert!(Credentials::new("ana@example.com", "").validate().is_err());
        assert!(Credentials::new("ana@example.com", "secret").validate().is_ok());
    }
}
