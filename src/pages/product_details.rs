use log::warn;

use crate::error::Result;
use crate::products::{
    Adjustment, AdjustmentForm, AdjustmentType, Product, ProductsApi, Purchase, PurchaseForm,
    PurchaseStatus,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailsTab {
    #[default]
    Overview,
    Purchases,
    Adjustments,
}

/// Figures derived from a product's history
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HistoryTotals {
    /// Spend on purchases that were not cancelled
    pub purchase_spend: f64,
    pub units_purchased: i64,
    pub units_added: i64,
    pub units_removed: i64,
}

impl HistoryTotals {
    pub fn compute(purchases: &[Purchase], adjustments: &[Adjustment]) -> Self {
        let mut totals = Self::default();
        for purchase in purchases {
            if purchase.status == Some(PurchaseStatus::Cancelled) {
                continue;
            }
            totals.purchase_spend += purchase.total_cost;
            totals.units_purchased += purchase.quantity;
        }
        for adjustment in adjustments {
            match adjustment.adjustment_type {
                AdjustmentType::Add => totals.units_added += adjustment.quantity,
                AdjustmentType::Remove => totals.units_removed += adjustment.quantity,
                AdjustmentType::Correction => {}
            }
        }
        totals
    }
}

/// One product with its purchase and adjustment history
pub struct ProductDetailsPage {
    api: ProductsApi,
    product: Product,
    tab: DetailsTab,
    purchases: Vec<Purchase>,
    adjustments: Vec<Adjustment>,
    purchase_form: PurchaseForm,
    adjustment_form: AdjustmentForm,
    error: Option<String>,
}

impl ProductDetailsPage {
    pub fn new(api: ProductsApi, product: Product) -> Self {
        Self {
            api,
            product,
            tab: DetailsTab::default(),
            purchases: Vec::new(),
            adjustments: Vec::new(),
            purchase_form: PurchaseForm::default(),
            adjustment_form: AdjustmentForm::default(),
            error: None,
        }
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn tab(&self) -> DetailsTab {
        self.tab
    }

    pub fn select_tab(&mut self, tab: DetailsTab) {
        self.tab = tab;
    }

    pub fn purchases(&self) -> &[Purchase] {
        &self.purchases
    }

    pub fn adjustments(&self) -> &[Adjustment] {
        &self.adjustments
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn totals(&self) -> HistoryTotals {
        HistoryTotals::compute(&self.purchases, &self.adjustments)
    }

    /// Load both history lists
    ///
    /// Each list loads independently; the first failure is returned and
    /// kept as the page error.
    pub async fn load(&mut self) -> Result<()> {
        let id = self.product.product_id;
        let (purchases, adjustments) =
            tokio::join!(self.api.purchases(id), self.api.adjustments(id));

        self.error = None;
        let mut failure = None;
        match purchases {
            Ok(rows) => self.purchases = rows,
            Err(err) => {
                warn!("Could not load purchases of product {}: {}", id, err);
                failure.get_or_insert(err);
            }
        }
        match adjustments {
            Ok(rows) => self.adjustments = rows,
            Err(err) => {
                warn!("Could not load adjustments of product {}: {}", id, err);
                failure.get_or_insert(err);
            }
        }

        match failure {
            Some(err) => {
                self.error = Some(err.to_string());
                Err(err)
            }
            None => Ok(()),
        }
    }

    pub fn purchase_form(&self) -> &PurchaseForm {
        &self.purchase_form
    }

    pub fn purchase_form_mut(&mut self) -> &mut PurchaseForm {
        &mut self.purchase_form
    }

    pub fn adjustment_form(&self) -> &AdjustmentForm {
        &self.adjustment_form
    }

    pub fn adjustment_form_mut(&mut self) -> &mut AdjustmentForm {
        &mut self.adjustment_form
    }

    /// Record a purchase from the form, then reload the history
    pub async fn add_purchase(&mut self) -> Result<Purchase> {
        let id = self.product.product_id;
        let result = match self.purchase_form.to_request(id) {
            Ok(request) => self.api.create_purchase(id, &request).await,
            Err(err) => Err(err),
        };
        let purchase = self.track(result)?;
        self.purchase_form = PurchaseForm::default();
        self.reload_after_write().await;
        Ok(purchase)
    }

    /// Record an adjustment from the form, then reload the history
    pub async fn add_adjustment(&mut self) -> Result<Adjustment> {
        let id = self.product.product_id;
        let result = match self.adjustment_form.to_request(id) {
            Ok(request) => self.api.create_adjustment(id, &request).await,
            Err(err) => Err(err),
        };
        let adjustment = self.track(result)?;
        self.adjustment_form = AdjustmentForm::default();
        self.reload_after_write().await;
        Ok(adjustment)
    }

    fn track<T>(&mut self, result: Result<T>) -> Result<T> {
        self.error = result.as_ref().err().map(ToString::to_string);
        result
    }

    async fn reload_after_write(&mut self) {
        if let Err(err) = self.load().await {
            warn!("Saved, but reloading the history failed: {}", err);
        }
    }
}
