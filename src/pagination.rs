//! Paged list envelope and list filters

use serde::{Deserialize, Serialize};

use crate::fetch::QueryParams;

/// One page of a list endpoint's results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub size: u32,
    #[serde(default)]
    pub has_next: bool,
    #[serde(default)]
    pub has_previous: bool,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            content: Vec::new(),
            total_pages: 0,
            total_elements: 0,
            page: 0,
            size: 0,
            has_next: false,
            has_previous: false,
        }
    }
}

impl<T> Page<T> {
    /// Wrap an un-paged list as a single page
    pub fn from_items(items: Vec<T>) -> Self {
        let len = items.len();
        Self {
            total_pages: if len == 0 { 0 } else { 1 },
            total_elements: len as u64,
            size: len as u32,
            content: items,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// "Page 1 of 3" style label; an empty result still reads "Page 1 of 1"
    pub fn label(&self) -> String {
        format!("Page {} of {}", self.page + 1, self.total_pages.max(1))
    }
}

/// Filter and pagination parameters of a list request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    pub search: Option<String>,
    pub category_id: Option<i64>,
    pub page: u32,
    pub size: Option<u32>,
}

impl ListParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: &str) -> Self {
        self.search = Some(search.to_string());
        self
    }

    pub fn with_category(mut self, category_id: Option<i64>) -> Self {
        self.category_id = category_id;
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn with_size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    /// Query parameters in the order the backend documents them
    pub fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .with("search", self.search.as_deref().map(str::trim))
            .with("categoryId", self.category_id)
            .with("page", Some(self.page))
            .with("size", self.size)
    }

    /// Query parameters with `default_size` standing in for an unset size
    pub fn to_query_sized(&self, default_size: u32) -> QueryParams {
        let mut query = self.to_query();
        if self.size.is_none() {
            query.push("size", Some(default_size));
        }
        query
    }
}
