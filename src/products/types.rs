//! Types for products and their purchase/adjustment history

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::forms::{
    at_least_one, non_negative, number_text, optional_date, optional_number, optional_text,
    positive_amount, required_number, required_text,
};

/// A product as the backend returns it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub product_id: i64,
    pub product_name: String,
    #[serde(default)]
    pub product_code: Option<String>,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub supplier_id: Option<i64>,
    #[serde(default)]
    pub supplier_name: Option<String>,
    #[serde(default)]
    pub buying_price: f64,
    #[serde(default)]
    pub selling_price: f64,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub threshold_value: i64,
    #[serde(default)]
    pub opening_stock: Option<i64>,
    #[serde(default)]
    pub on_the_way: Option<i64>,
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default, with = "crate::timestamp::optional")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, with = "crate::timestamp::optional")]
    pub updated_at: Option<NaiveDateTime>,
}

impl Product {
    pub fn stock_status(&self) -> StockStatus {
        StockStatus::of(self.quantity, self.threshold_value)
    }

    pub fn is_low_stock(&self) -> bool {
        self.stock_status() != StockStatus::InStock
    }
}

/// Availability shown next to a product
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

impl StockStatus {
    /// Low stock means the quantity is at or below the threshold
    pub fn of(quantity: i64, threshold: i64) -> Self {
        if quantity <= 0 {
            StockStatus::OutOfStock
        } else if quantity <= threshold {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StockStatus::InStock => "In stock",
            StockStatus::LowStock => "Low stock",
            StockStatus::OutOfStock => "Out of stock",
        }
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Body of product create and update calls
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    pub product_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_code: Option<String>,
    pub category_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<i64>,
    pub buying_price: f64,
    pub selling_price: f64,
    pub unit: String,
    pub quantity: i64,
    pub threshold_value: i64,
    pub opening_stock: i64,
    pub on_the_way: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub is_active: bool,
}

/// Product form input, one string per field
#[derive(Debug, Clone, PartialEq)]
pub struct ProductForm {
    pub product_name: String,
    pub product_code: String,
    pub category_id: String,
    pub supplier_id: String,
    pub buying_price: String,
    pub selling_price: String,
    pub unit: String,
    pub quantity: String,
    pub threshold_value: String,
    pub opening_stock: String,
    pub on_the_way: String,
    pub expiry_date: String,
    pub image_url: String,
    pub is_active: bool,
}

impl Default for ProductForm {
    fn default() -> Self {
        Self {
            product_name: String::new(),
            product_code: String::new(),
            category_id: String::new(),
            supplier_id: String::new(),
            buying_price: String::new(),
            selling_price: String::new(),
            unit: String::new(),
            quantity: String::new(),
            threshold_value: String::new(),
            opening_stock: String::new(),
            on_the_way: String::new(),
            expiry_date: String::new(),
            image_url: String::new(),
            is_active: true,
        }
    }
}

impl From<&Product> for ProductForm {
    fn from(product: &Product) -> Self {
        Self {
            product_name: product.product_name.clone(),
            product_code: product.product_code.clone().unwrap_or_default(),
            category_id: product.category_id.map(|id| id.to_string()).unwrap_or_default(),
            supplier_id: product.supplier_id.map(|id| id.to_string()).unwrap_or_default(),
            buying_price: number_text(product.buying_price),
            selling_price: number_text(product.selling_price),
            unit: product.unit.clone().unwrap_or_default(),
            quantity: product.quantity.to_string(),
            threshold_value: product.threshold_value.to_string(),
            opening_stock: product.opening_stock.map(|v| v.to_string()).unwrap_or_default(),
            on_the_way: product.on_the_way.map(|v| v.to_string()).unwrap_or_default(),
            expiry_date: product
                .expiry_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            image_url: product.image_url.clone().unwrap_or_default(),
            is_active: product.is_active.unwrap_or(true),
        }
    }
}

impl ProductForm {
    /// Validate required fields and coerce numbers
    ///
    /// An empty opening stock defaults to the quantity, an empty
    /// on-the-way count to zero.
    pub fn to_request(&self) -> Result<ProductRequest> {
        let product_name = required_text(&self.product_name, "Product name")?;
        let category_id = required_number(&self.category_id, "Category")?;
        let supplier_id = optional_number(&self.supplier_id, "Supplier")?;
        let buying_price = positive_amount(&self.buying_price, "Buying price")?;
        let selling_price = positive_amount(&self.selling_price, "Selling price")?;
        let unit = required_text(&self.unit, "Unit")?;
        let quantity = non_negative(&self.quantity, "Quantity")?;
        let threshold_value = non_negative(&self.threshold_value, "Threshold value")?;
        let opening_stock = if self.opening_stock.trim().is_empty() {
            quantity
        } else {
            non_negative(&self.opening_stock, "Opening stock")?
        };
        let on_the_way = if self.on_the_way.trim().is_empty() {
            0
        } else {
            non_negative(&self.on_the_way, "On the way quantity")?
        };

        Ok(ProductRequest {
            product_name,
            product_code: optional_text(&self.product_code),
            category_id,
            supplier_id,
            buying_price,
            selling_price,
            unit,
            quantity,
            threshold_value,
            opening_stock,
            on_the_way,
            expiry_date: optional_date(&self.expiry_date, "Expiry date")?,
            image_url: optional_text(&self.image_url),
            is_active: self.is_active,
        })
    }
}

/// One selectable option in a product form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefOption {
    pub id: i64,
    pub label: String,
}

/// Category and supplier options for the product form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceData {
    #[serde(default)]
    pub categories: Vec<RefOption>,
    #[serde(default)]
    pub suppliers: Vec<RefOption>,
}

macro_rules! wire_enum {
    ($name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(value: &str) -> Result<Self> {
                $(
                    if value.trim().eq_ignore_ascii_case($text) {
                        return Ok($name::$variant);
                    }
                )+
                Err(Error::validation(format!(
                    "Unknown {}: {}",
                    stringify!($name),
                    value
                )))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(
                &self,
                serializer: S,
            ) -> std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(
                deserializer: D,
            ) -> std::result::Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

/// Kind of manual stock correction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjustmentType {
    Add,
    Remove,
    Correction,
}

wire_enum!(AdjustmentType {
    Add => "ADD",
    Remove => "REMOVE",
    Correction => "CORRECTION",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseStatus {
    Completed,
    Cancelled,
    Pending,
}

wire_enum!(PurchaseStatus {
    Completed => "COMPLETED",
    Cancelled => "CANCELLED",
    Pending => "PENDING",
});

/// A stock purchase recorded against a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
    pub purchase_id: i64,
    #[serde(default)]
    pub purchase_code: Option<String>,
    #[serde(default)]
    pub product_id: Option<i64>,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub supplier_id: Option<i64>,
    #[serde(default)]
    pub supplier_name: Option<String>,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub unit_cost: f64,
    #[serde(default)]
    pub total_cost: f64,
    #[serde(default, with = "crate::timestamp::optional")]
    pub purchase_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub status: Option<PurchaseStatus>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRequest {
    pub product_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<i64>,
    pub quantity: i64,
    pub unit_cost: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PurchaseForm {
    pub supplier_id: String,
    pub quantity: String,
    pub unit_cost: String,
    pub notes: String,
}

impl PurchaseForm {
    pub fn to_request(&self, product_id: i64) -> Result<PurchaseRequest> {
        Ok(PurchaseRequest {
            product_id,
            supplier_id: optional_number(&self.supplier_id, "Supplier")?,
            quantity: at_least_one(&self.quantity, "Quantity")?,
            unit_cost: positive_amount(&self.unit_cost, "Unit cost")?,
            notes: optional_text(&self.notes),
        })
    }
}

/// A manual stock correction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Adjustment {
    pub adjustment_id: i64,
    #[serde(default)]
    pub product_id: Option<i64>,
    #[serde(default)]
    pub product_name: Option<String>,
    pub adjustment_type: AdjustmentType,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub performed_by: Option<String>,
    #[serde(default, with = "crate::timestamp::optional")]
    pub adjustment_date: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustmentRequest {
    pub product_id: i64,
    pub adjustment_type: AdjustmentType,
    pub quantity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdjustmentForm {
    pub adjustment_type: AdjustmentType,
    pub quantity: String,
    pub reason: String,
}

impl Default for AdjustmentForm {
    fn default() -> Self {
        Self {
            adjustment_type: AdjustmentType::Add,
            quantity: String::new(),
            reason: String::new(),
        }
    }
}

impl AdjustmentForm {
    pub fn to_request(&self, product_id: i64) -> Result<AdjustmentRequest> {
        Ok(AdjustmentRequest {
            product_id,
            adjustment_type: self.adjustment_type,
            quantity: non_negative(&self.quantity, "Quantity")?,
            reason: optional_text(&self.reason),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn filled_form() -> ProductForm {
        ProductForm {
            product_name: "Chippy (small)".to_string(),
            category_id: "3".to_string(),
            buying_price: "10".to_string(),
            selling_price: "12.50".to_string(),
            unit: "Packets".to_string(),
            quantity: "22".to_string(),
            threshold_value: "12".to_string(),
            ..ProductForm::default()
        }
    }

    #[test]
    fn test_stock_status_thresholds() {
        assert_eq!(StockStatus::of(5, 10), StockStatus::LowStock);
        assert_eq!(StockStatus::of(10, 10), StockStatus::LowStock);
        assert_eq!(StockStatus::of(20, 10), StockStatus::InStock);
        assert_eq!(StockStatus::of(0, 10), StockStatus::OutOfStock);
        assert_eq!(StockStatus::of(5, 10).to_string(), "Low stock");
    }

    #[test]
    fn test_product_form_coerces_numbers() {
        let request = filled_form().to_request().unwrap();
        assert_eq!(request.category_id, 3);
        assert_eq!(request.selling_price, 12.5);
        assert_eq!(request.quantity, 22);
        assert_eq!(request.opening_stock, 22);
        assert_eq!(request.on_the_way, 0);
        assert_eq!(request.supplier_id, None);

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["productName"], "Chippy (small)");
        assert_eq!(body["thresholdValue"], 12);
        assert!(body.get("supplierId").is_none());
    }

    #[test]
    fn test_product_form_rejects_missing_fields() {
        let mut form = filled_form();
        form.unit = " ".to_string();
        assert_eq!(form.to_request().unwrap_err().to_string(), "Unit is required");

        let mut form = filled_form();
        form.buying_price = "0".to_string();
        assert_eq!(
            form.to_request().unwrap_err().to_string(),
            "Buying price must be greater than zero"
        );
    }

    #[test]
    fn test_adjustment_type_is_case_insensitive() {
        let adjustment: Adjustment = serde_json::from_value(json!({
            "adjustmentId": 1,
            "adjustmentType": "remove",
            "quantity": 3
        }))
        .unwrap();
        assert_eq!(adjustment.adjustment_type, AdjustmentType::Remove);
        assert_eq!(
            serde_json::to_value(AdjustmentType::Correction).unwrap(),
            json!("CORRECTION")
        );
    }

    #[test]
    fn test_purchase_form_requires_positive_quantity() {
        let form = PurchaseForm {
            quantity: "0".to_string(),
            unit_cost: "16".to_string(),
            ..PurchaseForm::default()
        };
        assert!(form.to_request(1).is_err());
    }
}
