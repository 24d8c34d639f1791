//! HTTP surface of the API. Each sub-module owns one path prefix and exposes
//! a `configure_routes` returning its actix `Scope`.

pub mod crud;
pub mod customers;
pub mod dashboard;
pub mod invoices;
pub mod products;
pub mod reports;

#[cfg(test)]
pub(crate) mod test_support;

use crate::error::json_error_handler;
use actix_web::web;

/// Registers every API scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(customers::configure_routes())
        .service(products::configure_routes())
        .service(invoices::configure_routes())
        .service(reports::configure_routes())
        .service(dashboard::configure_routes());
}

/// JSON extractor settings shared by every handler.
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(json_error_handler)
}
