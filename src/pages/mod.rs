//! Page-level state for every screen of the application
//!
//! Pages hold what a screen shows and expose the actions a user can take
//! there. They read the session through the clients they are built with and
//! never write it.

mod categories;
mod dashboard;
mod inventory;
mod product_details;
mod sales;
mod settings;
mod suppliers;

pub use categories::*;
pub use dashboard::*;
pub use inventory::*;
pub use product_details::*;
pub use sales::*;
pub use settings::*;
pub use suppliers::*;

use crate::error::Result;

/// A single document loaded from the backend
///
/// Failures are kept as a page-local message; the previously loaded
/// document, if any, stays visible.
#[derive(Debug, Clone)]
pub struct Loadable<T> {
    data: Option<T>,
    loading: bool,
    error: Option<String>,
}

impl<T> Default for Loadable<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

impl<T> Loadable<T> {
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub(crate) fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub(crate) fn finish(&mut self, result: Result<T>) -> Result<()> {
        self.loading = false;
        match result {
            Ok(data) => {
                self.data = Some(data);
                Ok(())
            }
            Err(err) => {
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }
}

/// `P1,234.50` style amount
pub fn format_amount(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}P{}.{:02}", sign, grouped, cents % 100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0.0), "P0.00");
        assert_eq!(format_amount(4306.0), "P4,306.00");
        assert_eq!(format_amount(1234567.891), "P1,234,567.89");
        assert_eq!(format_amount(-12.5), "-P12.50");
    }

    #[test]
    fn test_failed_reload_keeps_previous_data() {
        let mut doc = Loadable::default();
        doc.begin();
        doc.finish(Ok(3)).unwrap();

        doc.begin();
        assert!(doc.is_loading());
        assert!(doc.finish(Err(Error::general("down"))).is_err());
        assert_eq!(doc.data(), Some(&3));
        assert_eq!(doc.error(), Some("down"));
        assert!(!doc.is_loading());
    }
}
