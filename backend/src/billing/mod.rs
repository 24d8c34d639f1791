//! Invoice pricing: line-item extension, tax, discount and grand total.

mod totals;

pub use totals::{compute_totals, price_items};
