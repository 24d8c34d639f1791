use common::model::invoice::LineItem;
use common::model::product::Product;
use common::requests::DraftItem;
use log::warn;
use std::collections::HashMap;

/// Derived monetary fields of an invoice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Totals {
    pub subtotal: f64,
    pub tax: f64,
    pub discount: f64,
    pub total: f64,
}

/// Resolves each requested line against the catalog and snapshots the
/// product's name and unit price onto it.
///
/// A product id missing from the catalog prices at zero with an empty name.
pub fn price_items(items: &[DraftItem], catalog: &[Product]) -> Vec<LineItem> {
    let by_id: HashMap<&str, &Product> = catalog.iter().map(|p| (p.id.as_str(), p)).collect();

    items
        .iter()
        .map(|item| {
            let (product_name, price) = match by_id.get(item.product_id.as_str()) {
                Some(product) => (product.name.clone(), product.price),
                None => {
                    warn!(
                        "product '{}' not in catalog, pricing line at zero",
                        item.product_id
                    );
                    (String::new(), 0.0)
                }
            };
            LineItem {
                product_id: item.product_id.clone(),
                product_name,
                quantity: item.quantity,
                price,
                total: f64::from(item.quantity) * price,
            }
        })
        .collect()
}

/// `subtotal = Σ quantity × price`, `tax = subtotal × rate / 100`,
/// `total = subtotal + tax − discount`.
///
/// The total is not floored: a discount larger than the taxed subtotal gives
/// a negative total.
pub fn compute_totals(items: &[LineItem], tax_rate: f64, discount: f64) -> Totals {
    let subtotal: f64 = items
        .iter()
        .map(|item| f64::from(item.quantity) * item.price)
        .fold(0.0, |sum, line| sum + line);
    let tax = subtotal * tax_rate / 100.0;
    Totals {
        subtotal,
        tax,
        discount,
        total: subtotal + tax - discount,
    }
}
