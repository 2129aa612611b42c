//! Session state: one writer, many readers

use log::{info, warn};
use std::sync::{Arc, RwLock};

use super::store::{SessionStore, REMEMBER_EMAIL_KEY, REMEMBER_ME_KEY, TOKEN_KEY, USER_KEY};
use super::types::{Credentials, RememberMe, Session, SignupForm, UserProfile};
use super::AuthApi;
use crate::error::{Error, Result};

/// Top-level view selected by the session state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthView {
    Login,
    Signup,
    Dashboard,
}

/// Read-only handle on the current session
///
/// Cloned into every resource client and page. Only [`SessionManager`]
/// can change what it points at.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    inner: Arc<RwLock<Option<Session>>>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current session
    pub fn current(&self) -> Option<Session> {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn token(&self) -> Option<String> {
        self.current().map(|session| session.token)
    }

    pub fn user(&self) -> Option<UserProfile> {
        self.current().map(|session| session.user)
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    fn replace(&self, session: Option<Session>) {
        let mut guard = self
            .inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = session;
    }
}

/// Owner of the session lifecycle
///
/// Mirrors every transition to the durable store and publishes it through
/// the shared [`SessionContext`].
pub struct SessionManager {
    auth: AuthApi,
    store: Arc<dyn SessionStore>,
    context: SessionContext,
    view: AuthView,
}

impl SessionManager {
    pub fn new(auth: AuthApi, store: Arc<dyn SessionStore>, context: SessionContext) -> Self {
        Self {
            auth,
            store,
            context,
            view: AuthView::Login,
        }
    }

    pub fn view(&self) -> AuthView {
        self.view
    }

    /// Read-only handle for consumers
    pub fn context(&self) -> SessionContext {
        self.context.clone()
    }

    pub fn session(&self) -> Option<Session> {
        self.context.current()
    }

    pub fn show_login(&mut self) {
        if self.view != AuthView::Dashboard {
            self.view = AuthView::Login;
        }
    }

    pub fn show_signup(&mut self) {
        if self.view != AuthView::Dashboard {
            self.view = AuthView::Signup;
        }
    }

    /// Resolve the initial view from persisted state
    ///
    /// A stored token with a readable profile restores the dashboard
    /// without a network call. A token alone is checked against
    /// `/api/auth/me`; any failure there purges the session.
    pub async fn restore(&mut self) -> AuthView {
        let token = match self.store.get(TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(err) => {
                warn!("Could not read persisted token: {}", err);
                None
            }
        };

        let Some(token) = token else {
            self.discard();
            return self.view;
        };

        if let Some(user) = self.persisted_user() {
            self.context.replace(Some(Session { token, user }));
            self.view = AuthView::Dashboard;
            info!("Restored persisted session");
            return self.view;
        }

        match self.auth.me(&token).await {
            Ok(user) => {
                if let Err(err) = self.persist_user(&user) {
                    warn!("Could not persist revalidated profile: {}", err);
                }
                self.context.replace(Some(Session { token, user }));
                self.view = AuthView::Dashboard;
                info!("Session revalidated");
            }
            Err(err) => {
                warn!("Failed to fetch profile, discarding session: {}", err);
                self.discard();
            }
        }
        self.view
    }

    /// Sign in; on failure nothing is stored and the view does not change
    pub async fn login(&mut self, credentials: &Credentials) -> Result<UserProfile> {
        credentials.validate()?;
        let session = self
            .auth
            .login(credentials.email.trim(), &credentials.password)
            .await?;

        self.remember(credentials)?;
        self.set_session(session)
    }

    /// Register a new account and sign in with it
    pub async fn signup(&mut self, form: &SignupForm) -> Result<UserProfile> {
        let request = form.to_request()?;
        let session = self.auth.signup(&request).await?;
        self.set_session(session)
    }

    /// Adopt an authenticated session, replacing whatever was stored
    pub fn set_session(&mut self, session: Session) -> Result<UserProfile> {
        self.purge()?;
        // The token goes last so a stored token always has a stored profile
        self.persist_user(&session.user)?;
        if let Err(err) = self.store.set(TOKEN_KEY, &session.token) {
            if let Err(cleanup) = self.store.remove(USER_KEY) {
                warn!("Could not roll back persisted profile: {}", cleanup);
            }
            return Err(err);
        }

        let user = session.user.clone();
        self.context.replace(Some(session));
        self.view = AuthView::Dashboard;
        info!("Signed in as user {}", user.user_id);
        Ok(user)
    }

    /// Sign out; the server is told on a best-effort basis
    pub async fn logout(&mut self) -> Result<()> {
        if let Some(token) = self.context.token() {
            if let Err(err) = self.auth.logout(&token).await {
                warn!("Server-side logout failed, clearing session anyway: {}", err);
            }
        }
        let result = self.purge();
        self.view = AuthView::Login;
        info!("Signed out");
        result
    }

    /// Re-fetch the profile; a rejected token forces a local sign-out
    pub async fn revalidate(&mut self) -> Result<UserProfile> {
        let token = self
            .context
            .token()
            .ok_or_else(|| Error::general("Not logged in"))?;

        match self.auth.me(&token).await {
            Ok(user) => {
                self.persist_user(&user)?;
                self.context.replace(Some(Session {
                    token,
                    user: user.clone(),
                }));
                Ok(user)
            }
            Err(err) => {
                warn!("Profile refresh failed, signing out: {}", err);
                self.discard();
                Err(err)
            }
        }
    }

    /// Clear the session locally without notifying the server
    pub fn forget(&mut self) -> Result<()> {
        let result = self.purge();
        self.view = AuthView::Login;
        result
    }

    /// Remembered login email, if any
    pub fn remembered(&self) -> RememberMe {
        let remember = matches!(
            self.store.get(REMEMBER_ME_KEY).ok().flatten().as_deref(),
            Some("true")
        );
        let email = if remember {
            self.store.get(REMEMBER_EMAIL_KEY).ok().flatten()
        } else {
            None
        };
        RememberMe { email, remember }
    }

    fn remember(&self, credentials: &Credentials) -> Result<()> {
        if credentials.remember {
            self.store
                .set(REMEMBER_EMAIL_KEY, credentials.email.trim())?;
            self.store.set(REMEMBER_ME_KEY, "true")
        } else {
            self.store.remove(REMEMBER_EMAIL_KEY)?;
            self.store.set(REMEMBER_ME_KEY, "false")
        }
    }

    fn persisted_user(&self) -> Option<UserProfile> {
        let raw = self.store.get(USER_KEY).ok().flatten()?;
        match serde_json::from_str::<UserProfile>(&raw) {
            Ok(user) => Some(user),
            Err(err) => {
                warn!("Ignoring malformed persisted user: {}", err);
                None
            }
        }
    }

    fn persist_user(&self, user: &UserProfile) -> Result<()> {
        self.store.set(USER_KEY, &serde_json::to_string(user)?)
    }

    fn purge(&mut self) -> Result<()> {
        self.context.replace(None);
        self.store.remove(TOKEN_KEY)?;
        self.store.remove(USER_KEY)
    }

    fn discard(&mut self) {
        if let Err(err) = self.purge() {
            warn!("Could not clear persisted session: {}", err);
        }
        self.view = AuthView::Login;
    }
}
