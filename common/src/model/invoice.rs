use crate::model::lenient::null_as_default;
use serde::{Deserialize, Serialize};

/// One priced line of an invoice.
///
/// `product_name` and `price` are copied from the catalog when the invoice is
/// saved, so later catalog edits never change an issued invoice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LineItem {
    #[serde(deserialize_with = "null_as_default")]
    pub product_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub product_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub quantity: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub price: f64,
    /// `quantity * price`.
    #[serde(deserialize_with = "null_as_default")]
    pub total: f64,
}

/// An invoice as persisted in `invoices.json`.
///
/// The monetary fields are derived: `subtotal` is the sum of the line totals,
/// `tax` is `subtotal * tax_rate / 100` and `total` is
/// `subtotal + tax - discount`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Invoice {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    /// Caller supplied; uniqueness is not enforced.
    #[serde(deserialize_with = "null_as_default")]
    pub invoice_number: String,
    #[serde(deserialize_with = "null_as_default")]
    pub customer_id: String,
    /// Snapshot of the customer's name taken when `customer_id` was saved.
    #[serde(deserialize_with = "null_as_default")]
    pub customer_name: String,
    /// Issue date as `YYYY-MM-DD`.
    #[serde(deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub items: Vec<LineItem>,
    #[serde(deserialize_with = "null_as_default")]
    pub subtotal: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub tax: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub discount: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub total: f64,
    /// Tax percentage the invoice was priced with. Older records written
    /// without it carry only the derived `tax` amount.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_rate: Option<f64>,
    #[serde(deserialize_with = "null_as_default")]
    pub created_at: String,
}

impl Invoice {
    /// The tax percentage this invoice was priced with.
    ///
    /// Falls back to `tax / subtotal * 100` for records that predate the
    /// stored rate, and to zero when that ratio is undefined.
    pub fn effective_tax_rate(&self) -> f64 {
        match self.tax_rate {
            Some(rate) => rate,
            None if self.subtotal != 0.0 => self.tax / self.subtotal * 100.0,
            None => 0.0,
        }
    }
}
