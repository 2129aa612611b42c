use chrono::NaiveDateTime;

use crate::error::Result;
use crate::forms::display_or_dash;
use crate::listing::CrudPage;
use crate::pagination::ListParams;
use crate::sales::{Sale, SalesApi};

#[derive(Debug, Clone, PartialEq)]
pub struct SaleRow {
    pub sale_id: i64,
    pub code: String,
    pub product: String,
    pub quantity: i64,
    pub total_value: f64,
    pub sale_date: Option<NaiveDateTime>,
}

impl From<&Sale> for SaleRow {
    fn from(sale: &Sale) -> Self {
        Self {
            sale_id: sale.sale_id,
            code: display_or_dash(sale.sale_code.as_deref()),
            product: display_or_dash(sale.product_name.as_deref()),
            quantity: sale.quantity,
            total_value: sale.total_value,
            sale_date: sale.sale_date,
        }
    }
}

/// Sales listing; sales can be recorded and deleted but not edited
pub struct SalesPage {
    crud: CrudPage<SalesApi>,
}

impl SalesPage {
    pub fn new(api: SalesApi) -> Self {
        Self {
            crud: CrudPage::new(api, ListParams::new()),
        }
    }

    pub fn crud(&self) -> &CrudPage<SalesApi> {
        &self.crud
    }

    pub fn crud_mut(&mut self) -> &mut CrudPage<SalesApi> {
        &mut self.crud
    }

    pub async fn load(&self) -> Result<()> {
        self.crud.load().await
    }

    pub async fn search(&self, text: &str) -> Result<()> {
        self.crud.list().set_search(text).await
    }

    pub fn rows(&self) -> Vec<SaleRow> {
        self.crud.items().iter().map(SaleRow::from).collect()
    }

    /// Sum of the sales on the loaded page only
    pub fn page_total(&self) -> f64 {
        self.crud.items().iter().map(|sale| sale.total_value).sum()
    }

    pub fn close(&self) {
        self.crud.list().close();
    }
}
