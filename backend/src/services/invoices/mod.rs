//! # Invoice Service Module
//!
//! Routes under `/api/invoices`:
//!
//! *   **`GET /`** lists every invoice in store order.
//! *   **`POST /`** (`save::create`) prices an `InvoiceDraft` against the
//!     current catalog and customer list and stores the result.
//! *   **`PUT /{id}`** (`save::update`) merges the supplied draft fields over
//!     the stored invoice and recomputes its totals.
//! *   **`DELETE /{id}`** removes the invoice; unknown ids still succeed.
//!
//! Listing and deletion are the generic handlers from `services::crud`.

pub mod save;

use crate::services::crud::{delete_handler, list_handler};
use actix_web::web::{delete, get, post, put, scope};
use actix_web::Scope;
use common::model::invoice::Invoice;

const API_PATH: &str = "/api/invoices";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list_handler::<Invoice>))
        .route("", post().to(save::create))
        .route("/{id}", put().to(save::update))
        .route("/{id}", delete().to(delete_handler::<Invoice>))
}
