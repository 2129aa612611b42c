use crate::categories::{CategoriesApi, Category};
use crate::error::Result;
use crate::forms::display_or_dash;
use crate::listing::CrudPage;
use crate::pagination::ListParams;
use crate::timestamp::format_date;

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRow {
    pub category_id: i64,
    pub name: String,
    pub description: String,
    pub created: String,
}

impl From<&Category> for CategoryRow {
    fn from(category: &Category) -> Self {
        Self {
            category_id: category.category_id,
            name: category.category_name.clone(),
            description: display_or_dash(category.description.as_deref()),
            created: format_date(category.created_at.as_ref()),
        }
    }
}

pub struct CategoriesPage {
    crud: CrudPage<CategoriesApi>,
}

impl CategoriesPage {
    pub fn new(api: CategoriesApi) -> Self {
        Self {
            crud: CrudPage::new(api, ListParams::new()),
        }
    }

    pub fn crud(&self) -> &CrudPage<CategoriesApi> {
        &self.crud
    }

    pub fn crud_mut(&mut self) -> &mut CrudPage<CategoriesApi> {
        &mut self.crud
    }

    pub async fn load(&self) -> Result<()> {
        self.crud.load().await
    }

    pub fn rows(&self) -> Vec<CategoryRow> {
        self.crud.items().iter().map(CategoryRow::from).collect()
    }

    pub fn close(&self) {
        self.crud.list().close();
    }
}
