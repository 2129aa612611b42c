//! Kita Kita Rust Client Library
//!
//! A typed async client for the Kita Kita retail inventory backend: products,
//! categories, suppliers, sales, the dashboard and reports, plus the session
//! lifecycle and the page state an inventory front end is built from.

pub mod app;
pub mod auth;
pub mod categories;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod fetch;
mod forms;
pub mod listing;
pub mod pages;
pub mod pagination;
pub mod products;
pub mod sales;
pub mod suppliers;
pub mod timestamp;
pub mod users;

use std::sync::Arc;

use reqwest::Client;

use crate::auth::{AuthApi, SessionContext, SessionManager, SessionStore};
use crate::categories::CategoriesApi;
use crate::config::ClientOptions;
use crate::dashboard::{DashboardApi, ReportsApi};
use crate::error::Result;
use crate::fetch::ApiClient;
use crate::products::ProductsApi;
use crate::sales::SalesApi;
use crate::suppliers::SuppliersApi;
use crate::users::UsersApi;

pub use crate::forms::display_or_dash;

/// The main entry point for the Kita Kita client
///
/// Every resource client handed out shares one HTTP connection pool and one
/// [`SessionContext`], so a sign-in through the [`SessionManager`] is seen by
/// all of them.
#[derive(Debug, Clone)]
pub struct Kitakita {
    api: ApiClient,
    session: SessionContext,
    options: ClientOptions,
}

impl Kitakita {
    /// Create a new client
    ///
    /// # Example
    ///
    /// ```
    /// use kitakita_client::{config::ClientOptions, Kitakita};
    ///
    /// let client = Kitakita::new(ClientOptions::default().with_base_url("http://localhost:8080"))
    ///     .unwrap();
    /// assert_eq!(client.options().base_url, "http://localhost:8080");
    /// ```
    pub fn new(options: ClientOptions) -> Result<Self> {
        let api = ApiClient::new(&options)?;
        Ok(Self {
            api,
            session: SessionContext::new(),
            options,
        })
    }

    /// Create a new client around an existing `reqwest::Client`
    pub fn with_http_client(options: ClientOptions, client: Client) -> Result<Self> {
        let api = ApiClient::with_http_client(&options, client)?;
        Ok(Self {
            api,
            session: SessionContext::new(),
            options,
        })
    }

    /// Create a client for the backend named by `KITAKITA_API_URL`
    pub fn from_env() -> Result<Self> {
        Self::new(ClientOptions::from_env())
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Read-only view of the current session
    pub fn session(&self) -> SessionContext {
        self.session.clone()
    }

    /// The single writer of the session, persisting to `store`
    pub fn session_manager(&self, store: Arc<dyn SessionStore>) -> SessionManager {
        SessionManager::new(self.auth(), store, self.session.clone())
    }

    pub fn auth(&self) -> AuthApi {
        AuthApi::new(self.api.clone())
    }

    pub fn products(&self) -> ProductsApi {
        ProductsApi::new(self.api.clone(), self.session.clone())
    }

    pub fn categories(&self) -> CategoriesApi {
        CategoriesApi::new(self.api.clone(), self.session.clone())
    }

    pub fn suppliers(&self) -> SuppliersApi {
        SuppliersApi::new(self.api.clone(), self.session.clone())
    }

    pub fn sales(&self) -> SalesApi {
        SalesApi::new(self.api.clone(), self.session.clone())
    }

    pub fn dashboard(&self) -> DashboardApi {
        DashboardApi::new(self.api.clone(), self.session.clone())
    }

    pub fn reports(&self) -> ReportsApi {
        ReportsApi::new(self.api.clone(), self.session.clone())
    }

    pub fn users(&self) -> UsersApi {
        UsersApi::new(self.api.clone(), self.session.clone())
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::app::{App, Layout, NavPage};
    pub use crate::auth::{
        AuthView, Credentials, FileStore, MemoryStore, Session, SessionContext, SessionManager,
        SessionStore, SignupForm, UserProfile,
    };
    pub use crate::config::ClientOptions;
    pub use crate::error::{Error, Result};
    pub use crate::listing::{CrudPage, CrudResource, FormMode, ListSource, ResourceList};
    pub use crate::pagination::{ListParams, Page};
    pub use crate::Kitakita;
}
