//! Read-only dashboard and report documents

use reqwest::Method;
use serde::{Deserialize, Deserializer, Serialize};

use crate::auth::SessionContext;
use crate::error::Result;
use crate::fetch::{ApiClient, FetchBuilder};

/// Values the backend leaves unset arrive as `null`
fn nullable<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SummaryCards {
    #[serde(deserialize_with = "nullable")]
    pub total_products: u64,
    #[serde(deserialize_with = "nullable")]
    pub total_categories: u64,
    #[serde(deserialize_with = "nullable")]
    pub total_suppliers: u64,
    #[serde(deserialize_with = "nullable")]
    pub low_stock_count: u64,
    #[serde(deserialize_with = "nullable")]
    pub on_the_way: u64,
    #[serde(deserialize_with = "nullable")]
    pub total_quantity: u64,
    #[serde(deserialize_with = "nullable")]
    pub inventory_value: f64,
}

/// One bar or point of a dashboard chart
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChartPoint {
    #[serde(deserialize_with = "nullable")]
    pub label: String,
    #[serde(deserialize_with = "nullable")]
    pub value: f64,
    pub secondary_value: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductSnapshot {
    pub product_id: Option<i64>,
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub quantity: i64,
    #[serde(deserialize_with = "nullable")]
    pub threshold_value: i64,
    pub unit: Option<String>,
}

/// `GET /api/dashboard/summary`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardSummary {
    #[serde(deserialize_with = "nullable")]
    pub summary_cards: SummaryCards,
    #[serde(deserialize_with = "nullable")]
    pub inventory_by_category: Vec<ChartPoint>,
    #[serde(deserialize_with = "nullable")]
    pub stock_movement: Vec<ChartPoint>,
    #[serde(deserialize_with = "nullable")]
    pub top_selling_stock: Vec<ProductSnapshot>,
    #[serde(deserialize_with = "nullable")]
    pub low_quantity_stock: Vec<ProductSnapshot>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SalesOverview {
    #[serde(deserialize_with = "nullable")]
    pub total_profit: f64,
    #[serde(deserialize_with = "nullable")]
    pub revenue: f64,
    #[serde(deserialize_with = "nullable")]
    pub sales: f64,
    #[serde(deserialize_with = "nullable")]
    pub net_purchase_value: f64,
    #[serde(deserialize_with = "nullable")]
    pub net_sales_value: f64,
    #[serde(deserialize_with = "nullable")]
    pub mom_profit: f64,
    #[serde(deserialize_with = "nullable")]
    pub yoy_profit: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CategoryPerformance {
    #[serde(deserialize_with = "nullable")]
    pub category: String,
    #[serde(deserialize_with = "nullable")]
    pub turn_over: f64,
    #[serde(deserialize_with = "nullable")]
    pub increase_by: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductPerformance {
    #[serde(deserialize_with = "nullable")]
    pub product: String,
    pub product_id: Option<i64>,
    pub category: Option<String>,
    pub remaining_quantity: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub turn_over: f64,
    #[serde(deserialize_with = "nullable")]
    pub increase_by: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MonthlyFigures {
    #[serde(deserialize_with = "nullable")]
    pub month: String,
    #[serde(deserialize_with = "nullable")]
    pub revenue: f64,
    #[serde(deserialize_with = "nullable")]
    pub profit: f64,
}

/// `GET /api/reports`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Reports {
    #[serde(deserialize_with = "nullable")]
    pub sales_overview: SalesOverview,
    #[serde(deserialize_with = "nullable")]
    pub best_selling_categories: Vec<CategoryPerformance>,
    #[serde(deserialize_with = "nullable")]
    pub best_selling_products: Vec<ProductPerformance>,
    #[serde(deserialize_with = "nullable")]
    pub profit_revenue_data: Vec<MonthlyFigures>,
}

fn authed(api: &ApiClient, session: &SessionContext, path: &str) -> FetchBuilder {
    let token = session.token();
    api.request(Method::GET, path).bearer_auth(token.as_deref())
}

#[derive(Debug, Clone)]
pub struct DashboardApi {
    api: ApiClient,
    session: SessionContext,
}

impl DashboardApi {
    pub(crate) fn new(api: ApiClient, session: SessionContext) -> Self {
        Self { api, session }
    }

    pub async fn summary(&self) -> Result<DashboardSummary> {
        authed(&self.api, &self.session, "/api/dashboard/summary")
            .execute()
            .await
    }
}

#[derive(Debug, Clone)]
pub struct ReportsApi {
    api: ApiClient,
    session: SessionContext,
}

impl ReportsApi {
    pub(crate) fn new(api: ApiClient, session: SessionContext) -> Self {
        Self { api, session }
    }

    pub async fn get(&self) -> Result<Reports> {
        authed(&self.api, &self.session, "/api/reports")
            .execute()
            .await
    }
}
