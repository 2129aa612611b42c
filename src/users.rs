//! Account management

use reqwest::Method;

use crate::auth::SessionContext;
use crate::error::Result;
use crate::fetch::ApiClient;

#[derive(Debug, Clone)]
pub struct UsersApi {
    api: ApiClient,
    session: SessionContext,
}

impl UsersApi {
    pub(crate) fn new(api: ApiClient, session: SessionContext) -> Self {
        Self { api, session }
    }

    /// Permanently delete an account and everything it owns
    pub async fn delete_account(&self, user_id: i64) -> Result<()> {
        let token = self.session.token();
        self.api
            .request(Method::DELETE, &format!("/api/users/{}", user_id))
            .bearer_auth(token.as_deref())
            .execute_unit()
            .await
    }
}
