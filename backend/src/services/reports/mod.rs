//! # Report Service Module
//!
//! Read-only summaries over the invoice collection. Nothing computed here is
//! persisted.
//!
//! ## Registered Routes
//!
//! *   **`GET /sales?period=daily|monthly|yearly&startDate=&endDate=`**
//!     (`sales::process`): invoices in the selected window with their count
//!     and revenue.
//! *   **`GET /customers`** (`customers::process`): every customer with its
//!     invoice count, total amount and invoices.
//! *   **`GET /products`** (`products::process`): every catalog product with
//!     quantity sold, revenue and line count.
//! *   **`GET /{report}/export?format=pdf|csv`** (`export::process`): one of
//!     the above as a downloadable file.

pub mod customers;
pub mod export;
pub mod products;
pub mod sales;

use actix_web::web::{get, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/reports";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/sales", get().to(sales::process))
        .route("/customers", get().to(customers::process))
        .route("/products", get().to(products::process))
        .route("/{report}/export", get().to(export::process))
}
