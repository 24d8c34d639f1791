//! Read-only summaries computed from the invoice collection.
//!
//! None of these are persisted. The customer and product rows flatten the
//! underlying record so a client sees the entity fields and its statistics
//! side by side.

use crate::model::customer::Customer;
use crate::model::invoice::Invoice;
use crate::model::product::Product;
use serde::{Deserialize, Serialize};

/// Response of `GET /api/reports/sales`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesReport {
    pub total_revenue: f64,
    pub total_invoices: usize,
    pub invoices: Vec<Invoice>,
}

/// One row of `GET /api/reports/customers`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerReport {
    #[serde(flatten)]
    pub customer: Customer,
    pub total_invoices: usize,
    pub total_amount: f64,
    pub invoices: Vec<Invoice>,
}

/// Sales figures accumulated for one product id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductStats {
    pub total_quantity: u64,
    pub total_revenue: f64,
    /// Number of line items referencing the product. An invoice listing the
    /// same product on two lines counts twice.
    pub invoice_count: u64,
}

/// One row of `GET /api/reports/products`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductReport {
    #[serde(flatten)]
    pub product: Product,
    #[serde(flatten)]
    pub stats: ProductStats,
}

/// Response of `GET /api/dashboard`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_invoices: usize,
    pub total_customers: usize,
    pub total_products: usize,
    pub total_revenue: f64,
    /// The most recently created invoices, newest first.
    pub recent_invoices: Vec<Invoice>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_report_flattens_product_and_stats() {
        let report = ProductReport {
            product: Product {
                id: "P1".to_string(),
                name: "Widget".to_string(),
                category: "Hardware".to_string(),
                price: 10.0,
                created_at: String::new(),
            },
            stats: ProductStats {
                total_quantity: 3,
                total_revenue: 30.0,
                invoice_count: 1,
            },
        };

        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["name"], "Widget");
        assert_eq!(value["totalQuantity"], 3);
        assert_eq!(value["invoiceCount"], 1);
        assert!(value.get("stats").is_none());
    }
}
