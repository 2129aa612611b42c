//! Product categories

use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::auth::SessionContext;
use crate::error::Result;
use crate::fetch::{ApiClient, FetchBuilder};
use crate::forms::{optional_text, required_text};
use crate::listing::{CrudResource, ListSource};
use crate::pagination::{ListParams, Page};

const CATEGORIES_PATH: &str = "/api/categories";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub category_id: i64,
    pub category_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, with = "crate::timestamp::optional")]
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRequest {
    pub category_name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryForm {
    pub category_name: String,
    pub description: String,
}

impl CategoryForm {
    pub fn to_request(&self) -> Result<CategoryRequest> {
        Ok(CategoryRequest {
            category_name: required_text(&self.category_name, "Category name")?,
            description: optional_text(&self.description),
        })
    }
}

impl From<&Category> for CategoryForm {
    fn from(category: &Category) -> Self {
        Self {
            category_name: category.category_name.clone(),
            description: category.description.clone().unwrap_or_default(),
        }
    }
}

/// Client for `/api/categories`
///
/// The list endpoint is not paged; it returns every category at once.
#[derive(Debug, Clone)]
pub struct CategoriesApi {
    api: ApiClient,
    session: SessionContext,
}

impl CategoriesApi {
    pub(crate) fn new(api: ApiClient, session: SessionContext) -> Self {
        Self { api, session }
    }

    fn request(&self, method: Method, path: &str) -> FetchBuilder {
        let token = self.session.token();
        self.api.request(method, path).bearer_auth(token.as_deref())
    }

    pub async fn list(&self) -> Result<Vec<Category>> {
        self.request(Method::GET, CATEGORIES_PATH).execute().await
    }

    pub async fn get(&self, id: i64) -> Result<Category> {
        self.request(Method::GET, &format!("{}/{}", CATEGORIES_PATH, id))
            .execute()
            .await
    }

    pub async fn create(&self, request: &CategoryRequest) -> Result<Category> {
        self.request(Method::POST, CATEGORIES_PATH)
            .json(request)?
            .execute()
            .await
    }

    pub async fn update(&self, id: i64, request: &CategoryRequest) -> Result<Category> {
        self.request(Method::PUT, &format!("{}/{}", CATEGORIES_PATH, id))
            .json(request)?
            .execute()
            .await
    }

    pub async fn remove(&self, id: i64) -> Result<()> {
        self.request(Method::DELETE, &format!("{}/{}", CATEGORIES_PATH, id))
            .execute_unit()
            .await
    }
}

#[async_trait]
impl ListSource for CategoriesApi {
    type Item = Category;

    /// Filtering and paging are ignored; the whole list is one page
    async fn fetch(&self, _params: &ListParams) -> Result<Page<Category>> {
        self.list().await.map(Page::from_items)
    }
}

#[async_trait]
impl CrudResource for CategoriesApi {
    type Id = i64;
    type Form = CategoryForm;

    fn id_of(item: &Category) -> i64 {
        item.category_id
    }

    fn form_from(item: &Category) -> CategoryForm {
        CategoryForm::from(item)
    }

    async fn create(&self, form: &CategoryForm) -> Result<()> {
        let request = form.to_request()?;
        CategoriesApi::create(self, &request).await.map(|_| ())
    }

    async fn update(&self, id: i64, form: &CategoryForm) -> Result<()> {
        let request = form.to_request()?;
        CategoriesApi::update(self, id, &request).await.map(|_| ())
    }

    async fn remove(&self, id: i64) -> Result<()> {
        CategoriesApi::remove(self, id).await
    }
}
