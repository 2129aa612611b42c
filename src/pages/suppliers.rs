use crate::error::Result;
use crate::forms::display_or_dash;
use crate::listing::CrudPage;
use crate::pagination::ListParams;
use crate::suppliers::{Supplier, SuppliersApi};

#[derive(Debug, Clone, PartialEq)]
pub struct SupplierRow {
    pub supplier_id: i64,
    pub name: String,
    pub contact_number: String,
    pub email: String,
    pub status: &'static str,
}

impl From<&Supplier> for SupplierRow {
    fn from(supplier: &Supplier) -> Self {
        Self {
            supplier_id: supplier.supplier_id,
            name: supplier.supplier_name.clone(),
            contact_number: display_or_dash(supplier.contact_number.as_deref()),
            email: display_or_dash(supplier.email.as_deref()),
            status: supplier.status_label(),
        }
    }
}

pub struct SuppliersPage {
    crud: CrudPage<SuppliersApi>,
}

impl SuppliersPage {
    pub fn new(api: SuppliersApi) -> Self {
        Self {
            crud: CrudPage::new(api, ListParams::new()),
        }
    }

    pub fn crud(&self) -> &CrudPage<SuppliersApi> {
        &self.crud
    }

    pub fn crud_mut(&mut self) -> &mut CrudPage<SuppliersApi> {
        &mut self.crud
    }

    pub async fn load(&self) -> Result<()> {
        self.crud.load().await
    }

    pub async fn search(&self, text: &str) -> Result<()> {
        self.crud.list().set_search(text).await
    }

    pub fn rows(&self) -> Vec<SupplierRow> {
        self.crud.items().iter().map(SupplierRow::from).collect()
    }

    pub fn close(&self) {
        self.crud.list().close();
    }
}
