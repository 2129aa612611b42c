use log::{info, warn};

use crate::auth::{SessionContext, SessionManager};
use crate::error::{Error, Result};
use crate::timestamp::format_date;
use crate::users::UsersApi;

const NOT_AVAILABLE: &str = "N/A";

/// Account fields as the settings screen shows them
#[derive(Debug, Clone, PartialEq)]
pub struct AccountDetails {
    pub full_name: String,
    pub email: String,
    pub user_id: String,
    pub role: String,
    pub member_since: String,
}

/// Account details and account deletion
pub struct SettingsPage {
    users: UsersApi,
    session: SessionContext,
    confirming: bool,
    deleting: bool,
    error: Option<String>,
}

impl SettingsPage {
    pub fn new(users: UsersApi, session: SessionContext) -> Self {
        Self {
            users,
            session,
            confirming: false,
            deleting: false,
            error: None,
        }
    }

    pub fn account(&self) -> AccountDetails {
        let user = self.session.user();
        let text = |value: Option<String>| {
            value
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string())
        };

        AccountDetails {
            full_name: text(user.as_ref().and_then(|u| u.full_name.clone())),
            email: text(user.as_ref().map(|u| u.email.clone())),
            user_id: user
                .as_ref()
                .map(|u| format!("#{}", u.user_id))
                .unwrap_or_else(|| format!("#{}", NOT_AVAILABLE)),
            role: text(user.as_ref().and_then(|u| u.role.clone())),
            member_since: format_date(user.as_ref().and_then(|u| u.created_at.as_ref())),
        }
    }

    pub fn is_confirming(&self) -> bool {
        self.confirming
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// First step of account deletion; nothing is sent yet
    pub fn request_delete(&mut self) {
        self.confirming = true;
        self.error = None;
    }

    pub fn cancel_delete(&mut self) {
        self.confirming = false;
    }

    /// Delete the account, then drop the local session
    ///
    /// On failure the session is kept and the confirmation closes.
    pub async fn confirm_delete(&mut self, manager: &mut SessionManager) -> Result<()> {
        if !self.confirming {
            return Err(Error::general("Account deletion was not confirmed"));
        }
        let user = self
            .session
            .user()
            .ok_or_else(|| Error::general("Not logged in"))?;

        self.deleting = true;
        let result = self.users.delete_account(user.user_id).await;
        self.deleting = false;
        self.confirming = false;

        match result {
            Ok(()) => {
                info!("Deleted account {}", user.user_id);
                manager.forget()
            }
            Err(err) => {
                warn!("Account deletion failed: {}", err);
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }
}
