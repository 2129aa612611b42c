//! Authentication endpoints and the client-side session lifecycle

mod session;
mod store;
mod types;

use crate::error::Result;
use crate::fetch::ApiClient;

pub use session::*;
pub use store::*;
pub use types::*;

/// Client for `/api/auth/*`
#[derive(Debug, Clone)]
pub struct AuthApi {
    api: ApiClient,
}

impl AuthApi {
    pub(crate) fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Exchange credentials for a session
    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        self.api
            .post("/api/auth/login")
            .json(&body)?
            .execute::<AuthResponse>()
            .await?
            .into_session()
    }

    /// Register a new account; the backend signs it in immediately
    pub async fn signup(&self, request: &SignupRequest) -> Result<Session> {
        self.api
            .post("/api/auth/signup")
            .json(request)?
            .execute::<AuthResponse>()
            .await?
            .into_session()
    }

    /// Tell the backend the token is no longer in use
    pub async fn logout(&self, token: &str) -> Result<()> {
        self.api
            .post("/api/auth/logout")
            .bearer_auth(Some(token))
            .execute_unit()
            .await
    }

    /// Profile of the user owning `token`
    pub async fn me(&self, token: &str) -> Result<UserProfile> {
        self.api
            .get("/api/auth/me")
            .bearer_auth(Some(token))
            .execute::<UserProfile>()
            .await
    }
}
