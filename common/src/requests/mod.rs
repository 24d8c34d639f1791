use crate::model::lenient::null_as_default;
use serde::{Deserialize, Serialize};

/// Query string of `GET /api/reports/sales`.
///
/// `period` is one of `daily`, `monthly` or `yearly`; any other value (the
/// web client sends `custom`) falls through to the explicit date range when
/// both ends are present.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesReportQuery {
    pub period: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Query string of `GET /api/reports/{report}/export`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportQuery {
    /// `pdf` (default) or `csv`.
    pub format: Option<String>,
    pub period: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl ExportQuery {
    /// The period selection, for exports of the sales report.
    pub fn sales_query(&self) -> SalesReportQuery {
        SalesReportQuery {
            period: self.period.clone(),
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
        }
    }
}

/// One requested line of an invoice: which product and how many.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DraftItem {
    #[serde(deserialize_with = "null_as_default")]
    pub product_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub quantity: u32,
}

/// Body of `POST /api/invoices`, and the shape a `PUT` patch is merged into.
///
/// Only the caller-controlled fields live here. Names, prices and totals are
/// resolved by the server when the invoice is saved.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InvoiceDraft {
    #[serde(deserialize_with = "null_as_default")]
    pub invoice_number: String,
    #[serde(deserialize_with = "null_as_default")]
    pub customer_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub items: Vec<DraftItem>,
    /// Percentage, e.g. `10` for 10%.
    #[serde(deserialize_with = "null_as_default")]
    pub tax_rate: f64,
    /// Absolute amount subtracted from the taxed subtotal.
    #[serde(alias = "discount", deserialize_with = "null_as_default")]
    pub discount_amount: f64,
}
