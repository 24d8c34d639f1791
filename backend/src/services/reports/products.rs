//! Revenue-by-product report.

use crate::state::AppState;
use crate::store::Collection;
use actix_web::{web, HttpResponse};
use common::model::invoice::Invoice;
use common::model::product::Product;
use common::model::report::{ProductReport, ProductStats};
use std::collections::HashMap;

/// Accumulates quantity, revenue and line count per product id over every
/// line of every invoice. Revenue uses the snapshotted unit price.
pub fn product_stats(invoices: &[Invoice]) -> HashMap<&str, ProductStats> {
    let mut stats: HashMap<&str, ProductStats> = HashMap::new();
    for item in invoices.iter().flat_map(|invoice| invoice.items.iter()) {
        let entry = stats.entry(item.product_id.as_str()).or_default();
        entry.total_quantity += u64::from(item.quantity);
        entry.total_revenue += f64::from(item.quantity) * item.price;
        entry.invoice_count += 1;
    }
    stats
}

/// One row per catalog product, in store order. Products that never sold
/// report zeros; sales of products no longer in the catalog are dropped.
pub fn product_report(products: Vec<Product>, invoices: &[Invoice]) -> Vec<ProductReport> {
    let stats = product_stats(invoices);
    products
        .into_iter()
        .map(|product| ProductReport {
            stats: stats.get(product.id.as_str()).copied().unwrap_or_default(),
            product,
        })
        .collect()
}

pub fn load_product_report(state: &AppState) -> Vec<ProductReport> {
    let invoices: Vec<Invoice> = state.store.load_all(Collection::Invoices);
    product_report(state.store.load_all(Collection::Products), &invoices)
}

pub(crate) async fn process(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(load_product_report(&state))
}
