//! Application shell: the authentication gate and the signed-in layout

use std::fmt;
use std::sync::Arc;

use log::info;

use crate::auth::{AuthView, Credentials, SessionManager, SessionStore, SignupForm, UserProfile};
use crate::error::Result;
use crate::pages::{
    CategoriesPage, DashboardPage, InventoryPage, ProductDetailsPage, ReportsPage, SalesPage,
    SettingsPage, SuppliersPage,
};
use crate::products::Product;
use crate::Kitakita;

/// Sections reachable from the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavPage {
    #[default]
    Dashboard,
    Inventory,
    Reports,
    Suppliers,
    Sales,
    Categories,
    Settings,
}

impl NavPage {
    pub const ALL: [NavPage; 7] = [
        NavPage::Dashboard,
        NavPage::Inventory,
        NavPage::Reports,
        NavPage::Suppliers,
        NavPage::Sales,
        NavPage::Categories,
        NavPage::Settings,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            NavPage::Dashboard => "Dashboard",
            NavPage::Inventory => "Inventory",
            NavPage::Reports => "Reports",
            NavPage::Suppliers => "Suppliers",
            NavPage::Sales => "Sales",
            NavPage::Categories => "Categories",
            NavPage::Settings => "Settings",
        }
    }
}

impl fmt::Display for NavPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Signed-in chrome: the active section and the user badge
#[derive(Debug, Clone, Default)]
pub struct Layout {
    current: NavPage,
}

impl Layout {
    pub fn current(&self) -> NavPage {
        self.current
    }

    pub fn navigate(&mut self, page: NavPage) {
        self.current = page;
    }

    pub fn reset(&mut self) {
        self.current = NavPage::default();
    }

    /// Full name when known, otherwise the email
    pub fn display_name(user: Option<&UserProfile>) -> String {
        user.map(|u| u.display_name().to_string())
            .unwrap_or_else(|| "User".to_string())
    }

    /// First and last initials of the full name, `U` without one
    pub fn initials(user: Option<&UserProfile>) -> String {
        let name = user.and_then(|u| u.full_name.as_deref()).unwrap_or("");
        let words: Vec<&str> = name.split_whitespace().collect();
        let initial = |word: &str| word.chars().next().map(|c| c.to_uppercase().to_string());

        match words.as_slice() {
            [] => "U".to_string(),
            [only] => initial(*only).unwrap_or_else(|| "U".to_string()),
            [first, .., last] => format!(
                "{}{}",
                initial(*first).unwrap_or_default(),
                initial(*last).unwrap_or_default()
            ),
        }
    }
}

/// Root of the application
///
/// Chooses between the authentication views and the signed-in layout, and
/// builds pages bound to the current session.
pub struct App {
    client: Kitakita,
    session: SessionManager,
    layout: Layout,
}

impl App {
    pub fn new(client: Kitakita, store: Arc<dyn SessionStore>) -> Self {
        let session = client.session_manager(store);
        Self {
            client,
            session,
            layout: Layout::default(),
        }
    }

    pub fn client(&self) -> &Kitakita {
        &self.client
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SessionManager {
        &mut self.session
    }

    pub fn view(&self) -> AuthView {
        self.session.view()
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn user(&self) -> Option<UserProfile> {
        self.session.context().user()
    }

    /// Restore a persisted session and pick the first view
    pub async fn start(&mut self) -> AuthView {
        let view = self.session.restore().await;
        self.layout.reset();
        info!("Starting on {:?}", view);
        view
    }

    pub async fn login(&mut self, credentials: &Credentials) -> Result<UserProfile> {
        let user = self.session.login(credentials).await?;
        self.layout.reset();
        Ok(user)
    }

    pub async fn signup(&mut self, form: &SignupForm) -> Result<UserProfile> {
        let user = self.session.signup(form).await?;
        self.layout.reset();
        Ok(user)
    }

    /// Sign out; the next sign-in starts on the dashboard
    pub async fn logout(&mut self) -> Result<()> {
        self.layout.reset();
        self.session.logout().await
    }

    /// Finish a confirmed account deletion started on the settings page
    pub async fn delete_account(&mut self, settings: &mut SettingsPage) -> Result<()> {
        settings.confirm_delete(&mut self.session).await?;
        self.layout.reset();
        Ok(())
    }

    /// Switch section; ignored while signed out
    pub fn navigate(&mut self, page: NavPage) {
        if self.session.view() == AuthView::Dashboard {
            self.layout.navigate(page);
        }
    }

    pub fn dashboard_page(&self) -> DashboardPage {
        DashboardPage::new(self.client.dashboard())
    }

    pub fn inventory_page(&self) -> InventoryPage {
        InventoryPage::new(self.client.products())
    }

    pub fn product_details_page(&self, product: Product) -> ProductDetailsPage {
        ProductDetailsPage::new(self.client.products(), product)
    }

    pub fn reports_page(&self) -> ReportsPage {
        ReportsPage::new(self.client.reports())
    }

    pub fn suppliers_page(&self) -> SuppliersPage {
        SuppliersPage::new(self.client.suppliers())
    }

    pub fn sales_page(&self) -> SalesPage {
        SalesPage::new(self.client.sales())
    }

    pub fn categories_page(&self) -> CategoriesPage {
        CategoriesPage::new(self.client.categories())
    }

    pub fn settings_page(&self) -> SettingsPage {
        SettingsPage::new(self.client.users(), self.client.session())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(full_name: Option<&str>) -> UserProfile {
        UserProfile {
            user_id: 1,
            email: "ana@example.com".to_string(),
            full_name: full_name.map(str::to_string),
            role: None,
            created_at: None,
            last_login: None,
        }
    }

    #[test]
    fn test_initials() {
        assert_eq!(Layout::initials(Some(&user(Some("ana maria cruz")))), "AC");
        assert_eq!(Layout::initials(Some(&user(Some("Ana")))), "A");
        assert_eq!(Layout::initials(Some(&user(None))), "U");
        assert_eq!(Layout::initials(None), "U");
    }

    #[test]
    fn test_display_name_falls_back_to_email() {
        assert_eq!(Layout::display_name(Some(&user(Some("Ana Cruz")))), "Ana Cruz");
        assert_eq!(Layout::display_name(Some(&user(None))), "ana@example.com");
    }

    #[test]
    fn test_layout_defaults_to_dashboard() {
        let mut layout = Layout::default();
        assert_eq!(layout.current(), NavPage::Dashboard);
        layout.navigate(NavPage::Categories);
        assert_eq!(layout.current().to_string(), "Categories");
        layout.reset();
        assert_eq!(layout.current(), NavPage::Dashboard);
    }
}
