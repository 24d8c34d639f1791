//! # Customer Service Module
//!
//! Routes under `/api/customers`:
//!
//! *   **`GET /`** lists every customer in store order.
//! *   **`POST /`** creates a customer from any subset of `name`, `email`,
//!     `phone` and `address`; the server assigns `id` and `createdAt`.
//! *   **`PUT /{id}`** merges the supplied fields over the stored customer,
//!     or answers `404 {"error": "Customer not found"}`.
//! *   **`DELETE /{id}`** removes the customer and answers `{"success": true}`
//!     whether or not it existed.
//!
//! Invoices keep their `customerName` snapshot when a customer is edited or
//! deleted; nothing cascades.

use crate::services::crud;
use actix_web::Scope;
use common::model::customer::Customer;

const API_PATH: &str = "/api/customers";

pub fn configure_routes() -> Scope {
    crud::configure_routes::<Customer>(API_PATH)
}
