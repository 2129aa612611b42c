//! Products, their reference data, and per-product history

mod types;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Method;

use crate::auth::SessionContext;
use crate::error::Result;
use crate::fetch::{ApiClient, FetchBuilder};
use crate::listing::{CrudResource, ListSource};
use crate::pagination::{ListParams, Page};

pub use types::*;

const PRODUCTS_PATH: &str = "/api/products";

/// Client for `/api/products`
#[derive(Debug, Clone)]
pub struct ProductsApi {
    api: ApiClient,
    session: SessionContext,
}

impl ProductsApi {
    pub(crate) fn new(api: ApiClient, session: SessionContext) -> Self {
        Self { api, session }
    }

    fn request(&self, method: Method, path: &str) -> FetchBuilder {
        let token = self.session.token();
        self.api.request(method, path).bearer_auth(token.as_deref())
    }

    /// One page of products matching the search text and category
    pub async fn list(&self, params: &ListParams) -> Result<Page<Product>> {
        self.request(Method::GET, PRODUCTS_PATH)
            .query_params(params.to_query_sized(self.api.page_size()))
            .execute()
            .await
    }

    pub async fn create(&self, request: &ProductRequest) -> Result<Product> {
        self.request(Method::POST, PRODUCTS_PATH)
            .json(request)?
            .execute()
            .await
    }

    pub async fn update(&self, id: i64, request: &ProductRequest) -> Result<Product> {
        self.request(Method::PUT, &format!("{}/{}", PRODUCTS_PATH, id))
            .json(request)?
            .execute()
            .await
    }

    pub async fn remove(&self, id: i64) -> Result<()> {
        self.request(Method::DELETE, &format!("{}/{}", PRODUCTS_PATH, id))
            .execute_unit()
            .await
    }

    /// Category and supplier options for the product form
    pub async fn references(&self) -> Result<ReferenceData> {
        self.request(Method::GET, &format!("{}/references", PRODUCTS_PATH))
            .execute()
            .await
    }

    /// PDF listing of the products matching the same filter as [`ProductsApi::list`]
    pub async fn export_pdf(
        &self,
        search: Option<&str>,
        category_id: Option<i64>,
    ) -> Result<Bytes> {
        self.request(Method::GET, &format!("{}/export/pdf", PRODUCTS_PATH))
            .accept_pdf()
            .query("search", search.map(str::trim))
            .query("categoryId", category_id)
            .execute_binary()
            .await
    }

    pub async fn purchases(&self, product_id: i64) -> Result<Vec<Purchase>> {
        self.request(Method::GET, &format!("{}/{}/purchases", PRODUCTS_PATH, product_id))
            .execute()
            .await
    }

    pub async fn create_purchase(
        &self,
        product_id: i64,
        request: &PurchaseRequest,
    ) -> Result<Purchase> {
        self.request(Method::POST, &format!("{}/{}/purchases", PRODUCTS_PATH, product_id))
            .json(request)?
            .execute()
            .await
    }

    pub async fn adjustments(&self, product_id: i64) -> Result<Vec<Adjustment>> {
        self.request(Method::GET, &format!("{}/{}/adjustments", PRODUCTS_PATH, product_id))
            .execute()
            .await
    }

    pub async fn create_adjustment(
        &self,
        product_id: i64,
        request: &AdjustmentRequest,
    ) -> Result<Adjustment> {
        self.request(Method::POST, &format!("{}/{}/adjustments", PRODUCTS_PATH, product_id))
            .json(request)?
            .execute()
            .await
    }
}

#[async_trait]
impl ListSource for ProductsApi {
    type Item = Product;

    async fn fetch(&self, params: &ListParams) -> Result<Page<Product>> {
        self.list(params).await
    }
}

#[async_trait]
impl CrudResource for ProductsApi {
    type Id = i64;
    type Form = ProductForm;

    fn id_of(item: &Product) -> i64 {
        item.product_id
    }

    fn form_from(item: &Product) -> ProductForm {
        ProductForm::from(item)
    }

    async fn create(&self, form: &ProductForm) -> Result<()> {
        let request = form.to_request()?;
        ProductsApi::create(self, &request).await.map(|_| ())
    }

    async fn update(&self, id: i64, form: &ProductForm) -> Result<()> {
        let request = form.to_request()?;
        ProductsApi::update(self, id, &request).await.map(|_| ())
    }

    async fn remove(&self, id: i64) -> Result<()> {
        ProductsApi::remove(self, id).await
    }
}
