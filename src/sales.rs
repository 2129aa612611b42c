//! Sales

use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::auth::SessionContext;
use crate::error::{Error, Result};
use crate::fetch::{ApiClient, FetchBuilder};
use crate::forms::{at_least_one, number_text, optional_text, positive_amount, required_number};
use crate::listing::{CrudResource, ListSource};
use crate::pagination::{ListParams, Page};

const SALES_PATH: &str = "/api/sales";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub sale_id: i64,
    #[serde(default)]
    pub sale_code: Option<String>,
    #[serde(default)]
    pub product_id: Option<i64>,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub unit_price: f64,
    #[serde(default)]
    pub total_value: f64,
    #[serde(default)]
    pub buying_price: Option<f64>,
    #[serde(default, with = "crate::timestamp::optional")]
    pub sale_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRequest {
    pub product_id: i64,
    pub quantity: i64,
    pub unit_price: f64,
    pub total_value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buying_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SaleForm {
    pub product_id: String,
    pub quantity: String,
    pub unit_price: String,
    pub buying_price: String,
    pub notes: String,
}

impl SaleForm {
    /// The total is always quantity times unit price
    pub fn to_request(&self) -> Result<SaleRequest> {
        let product_id = required_number(&self.product_id, "Product")?;
        let quantity = at_least_one(&self.quantity, "Quantity")?;
        let unit_price = positive_amount(&self.unit_price, "Unit price")?;
        let buying_price = if self.buying_price.trim().is_empty() {
            None
        } else {
            Some(positive_amount(&self.buying_price, "Buying price")?)
        };

        Ok(SaleRequest {
            product_id,
            quantity,
            unit_price,
            total_value: unit_price * quantity as f64,
            buying_price,
            notes: optional_text(&self.notes),
        })
    }
}

impl From<&Sale> for SaleForm {
    fn from(sale: &Sale) -> Self {
        Self {
            product_id: sale.product_id.map(|id| id.to_string()).unwrap_or_default(),
            quantity: sale.quantity.to_string(),
            unit_price: number_text(sale.unit_price),
            buying_price: sale.buying_price.map(number_text).unwrap_or_default(),
            notes: sale.notes.clone().unwrap_or_default(),
        }
    }
}

/// Client for `/api/sales`
#[derive(Debug, Clone)]
pub struct SalesApi {
    api: ApiClient,
    session: SessionContext,
}

impl SalesApi {
    pub(crate) fn new(api: ApiClient, session: SessionContext) -> Self {
        Self { api, session }
    }

    fn request(&self, method: Method, path: &str) -> FetchBuilder {
        let token = self.session.token();
        self.api.request(method, path).bearer_auth(token.as_deref())
    }

    pub async fn list(&self, params: &ListParams) -> Result<Page<Sale>> {
        let params = params.clone().with_category(None);
        self.request(Method::GET, SALES_PATH)
            .query_params(params.to_query_sized(self.api.page_size()))
            .execute()
            .await
    }

    pub async fn get(&self, id: i64) -> Result<Sale> {
        self.request(Method::GET, &format!("{}/{}", SALES_PATH, id))
            .execute()
            .await
    }

    pub async fn create(&self, request: &SaleRequest) -> Result<Sale> {
        self.request(Method::POST, SALES_PATH)
            .json(request)?
            .execute()
            .await
    }

    pub async fn remove(&self, id: i64) -> Result<()> {
        self.request(Method::DELETE, &format!("{}/{}", SALES_PATH, id))
            .execute_unit()
            .await
    }

    /// Aggregate sales figures, passed through as returned
    pub async fn summary(&self) -> Result<Value> {
        self.request(Method::GET, &format!("{}/summary", SALES_PATH))
            .execute()
            .await
    }
}

#[async_trait]
impl ListSource for SalesApi {
    type Item = Sale;

    async fn fetch(&self, params: &ListParams) -> Result<Page<Sale>> {
        self.list(params).await
    }
}

#[async_trait]
impl CrudResource for SalesApi {
    type Id = i64;
    type Form = SaleForm;

    fn id_of(item: &Sale) -> i64 {
        item.sale_id
    }

    fn form_from(item: &Sale) -> SaleForm {
        SaleForm::from(item)
    }

    async fn create(&self, form: &SaleForm) -> Result<()> {
        let request = form.to_request()?;
        SalesApi::create(self, &request).await.map(|_| ())
    }

    /// Recorded sales are immutable on the backend
    async fn update(&self, _id: i64, _form: &SaleForm) -> Result<()> {
        Err(Error::unsupported("Sales cannot be edited"))
    }

    async fn remove(&self, id: i64) -> Result<()> {
        SalesApi::remove(self, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_is_derived() {
        let form = SaleForm {
            product_id: "4".to_string(),
            quantity: "3".to_string(),
            unit_price: "12.5".to_string(),
            ..SaleForm::default()
        };
        let request = form.to_request().unwrap();
        assert_eq!(request.total_value, 37.5);
        assert_eq!(request.buying_price, None);
    }

    #[test]
    fn test_zero_quantity_is_rejected() {
        let form = SaleForm {
            product_id: "4".to_string(),
            quantity: "0".to_string(),
            unit_price: "12.5".to_string(),
            ..SaleForm::default()
        };
        assert_eq!(
            form.to_request().unwrap_err().to_string(),
            "Quantity must be at least 1"
        );
    }
}
