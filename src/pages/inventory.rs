use bytes::Bytes;
use chrono::NaiveDate;
use log::warn;

use crate::error::Result;
use crate::forms::display_or_dash;
use crate::listing::CrudPage;
use crate::pagination::ListParams;
use crate::products::{Product, ProductsApi, ReferenceData, StockStatus};

/// One row of the products table
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRow {
    pub product_id: i64,
    pub name: String,
    pub category: String,
    pub buying_price: f64,
    pub quantity: String,
    pub threshold: String,
    pub expiry_date: Option<NaiveDate>,
    pub status: StockStatus,
}

impl From<&Product> for ProductRow {
    fn from(product: &Product) -> Self {
        let unit = product.unit.as_deref().unwrap_or("").trim();
        let with_unit = |value: i64| {
            if unit.is_empty() {
                value.to_string()
            } else {
                format!("{} {}", value, unit)
            }
        };

        Self {
            product_id: product.product_id,
            name: product.product_name.clone(),
            category: display_or_dash(product.category_name.as_deref()),
            buying_price: product.buying_price,
            quantity: with_unit(product.quantity),
            threshold: with_unit(product.threshold_value),
            expiry_date: product.expiry_date,
            status: product.stock_status(),
        }
    }
}

/// Product listing with search, category filter, form and PDF export
pub struct InventoryPage {
    crud: CrudPage<ProductsApi>,
    references: ReferenceData,
}

impl InventoryPage {
    pub fn new(api: ProductsApi) -> Self {
        Self {
            crud: CrudPage::new(api, ListParams::new()),
            references: ReferenceData::default(),
        }
    }

    pub fn crud(&self) -> &CrudPage<ProductsApi> {
        &self.crud
    }

    pub fn crud_mut(&mut self) -> &mut CrudPage<ProductsApi> {
        &mut self.crud
    }

    /// Load the form options and the first page
    ///
    /// Missing options only limit the form; the list still loads.
    pub async fn load(&mut self) -> Result<()> {
        match self.crud.resource().references().await {
            Ok(references) => self.references = references,
            Err(err) => warn!("Could not load product references: {}", err),
        }
        self.crud.load().await
    }

    pub fn references(&self) -> &ReferenceData {
        &self.references
    }

    pub fn rows(&self) -> Vec<ProductRow> {
        self.crud.items().iter().map(ProductRow::from).collect()
    }

    pub async fn search(&self, text: &str) -> Result<()> {
        self.crud.list().set_search(text).await
    }

    pub async fn filter_by_category(&self, category_id: Option<i64>) -> Result<()> {
        self.crud.list().set_category(category_id).await
    }

    /// Label of the active category filter, "All categories" when unset
    pub fn category_filter_label(&self) -> String {
        let selected = self.crud.list().params().category_id;
        selected
            .and_then(|id| self.references.categories.iter().find(|option| option.id == id))
            .map(|option| option.label.clone())
            .unwrap_or_else(|| "All categories".to_string())
    }

    /// PDF of the products matching the current search and category
    pub async fn export_pdf(&self) -> Result<Bytes> {
        let params = self.crud.list().params();
        self.crud
            .resource()
            .export_pdf(params.search.as_deref(), params.category_id)
            .await
    }

    pub fn low_stock_count(&self) -> usize {
        self.crud
            .items()
            .iter()
            .filter(|product| product.is_low_stock())
            .count()
    }

    /// Stop applying list responses; used when the page is left
    pub fn close(&self) {
        self.crud.list().close();
    }
}
