//! Suppliers

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

const SUPPLIERS_PATH: &str = "/api/suppliers";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub supplier_id: i64,
    pub supplier_name: String,
    #[serde(default)]
    pub contact_number: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default, with = "crate::timestamp::optional")]
    pub created_at: Option<NaiveDateTime>,
}

impl Supplier {
    /// Suppliers are active unless the backend says otherwise
    pub fn is_active(&self) -> bool {
        self.is_active.unwrap_or(true)
    }

    pub fn status_label(&self) -> &'static str {
        if self.is_active() {
            "Active"
        } else {
            "Inactive"
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierRequest {
    pub supplier_name: String,
    pub contact_number: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SupplierForm {
    pub supplier_name: String,
    pub contact_number: String,
    pub email: String,
    pub address: String,
    pub is_active: bool,
}

impl Default for SupplierForm {
    fn default() -> Self {
        Self {
            supplier_name: String::new(),
            contact_number: String::new(),
            email: String::new(),
            address: String::new(),
            is_active: true,
        }
    }
}

impl SupplierForm {
    pub fn to_request(&self) -> Result<SupplierRequest> {
        Ok(SupplierRequest {
            supplier_name: required_text(&self.supplier_name, "Supplier name")?,
            contact_number: optional_text(&self.contact_number),
            email: optional_text(&self.email),
            address: optional_text(&self.address),
            is_active: self.is_active,
        })
    }
}

impl From<&Supplier> for SupplierForm {
    fn from(supplier: &Supplier) -> Self {
        Self {
            supplier_name: supplier.supplier_name.clone(),
            contact_number: supplier.contact_number.clone().unwrap_or_default(),
            email: supplier.email.clone().unwrap_or_default(),
            address: supplier.address.clone().unwrap_or_default(),
            is_active: supplier.is_active(),
        }
    }
}

/// Client for `/api/suppliers`
#[derive(Debug, Clone)]
pub struct SuppliersApi {
    api: ApiClient,
    session: SessionContext,
}

impl SuppliersApi {
    pub(crate) fn new(api: ApiClient, session: SessionContext) -> Self {
        Self { api, session }
    }

    fn request(&self, method: Method, path: &str) -> FetchBuilder {
        let token = self.session.token();
        self.api.request(method, path).bearer_auth(token.as_deref())
    }

    /// One page of suppliers; the category filter does not apply
    pub async fn list(&self, params: &ListParams) -> Result<Page<Supplier>> {
        let params = params.clone().with_category(None);
        self.request(Method::GET, SUPPLIERS_PATH)
            .query_params(params.to_query_sized(self.api.page_size()))
            .execute()
            .await
    }

    pub async fn create(&self, request: &SupplierRequest) -> Result<Supplier> {
        self.request(Method::POST, SUPPLIERS_PATH)
            .json(request)?
            .execute()
            .await
    }

    pub async fn update(&self, id: i64, request: &SupplierRequest) -> Result<Supplier> {
        self.request(Method::PUT, &format!("{}/{}", SUPPLIERS_PATH, id))
            .json(request)?
            .execute()
            .await
    }

    pub async fn remove(&self, id: i64) -> Result<()> {
        self.request(Method::DELETE, &format!("{}/{}", SUPPLIERS_PATH, id))
            .execute_unit()
            .await
    }
}

#[async_trait]
impl ListSource for SuppliersApi {
    type Item = Supplier;

    async fn fetch(&self, params: &ListParams) -> Result<Page<Supplier>> {
        self.list(params).await
    }
}

#[async_trait]
impl CrudResource for SuppliersApi {
    type Id = i64;
    type Form = SupplierForm;

    fn id_of(item: &Supplier) -> i64 {
        item.supplier_id
    }

    fn form_from(item: &Supplier) -> SupplierForm {
        SupplierForm::from(item)
    }

    async fn create(&self, form: &SupplierForm) -> Result<()> {
        let request = form.to_request()?;
        SuppliersApi::create(self, &request).await.map(|_| ())
    }

    async fn update(&self, id: i64, form: &SupplierForm) -> Result<()> {
        let request = form.to_request()?;
        SuppliersApi::update(self, id, &request).await.map(|_| ())
    }

    async fn remove(&self, id: i64) -> Result<()> {
        SuppliersApi::remove(self, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_space_separated_created_at() {
        let supplier: Supplier = serde_json::from_value(json!({
            "supplierId": 7,
            "supplierName": "Richard Martin",
            "isActive": false,
            "createdAt": "2025-02-01 08:00:00"
        }))
        .unwrap();
        assert!(supplier.created_at.is_some());
        assert_eq!(supplier.status_label(), "Inactive");
    }

    #[test]
    fn test_edit_form_keeps_active_flag() {
        let supplier = Supplier {
            supplier_id: 1,
            supplier_name: "Kadi Foods".to_string(),
            contact_number: None,
            email: Some("orders@kadi.example".to_string()),
            address: None,
            is_active: None,
            created_at: None,
        };
        let form = SupplierForm::from(&supplier);
        assert!(form.is_active);
        assert_eq!(form.contact_number, "");
        assert_eq!(form.to_request().unwrap().email.as_deref(), Some("orders@kadi.example"));
    }
}
