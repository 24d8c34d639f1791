//! # Dashboard Service Module
//!
//! `GET /api/dashboard` returns the headline counts shown on the landing
//! page: number of invoices, customers and products, overall revenue, and the
//! five most recently created invoices.

use crate::state::AppState;
use crate::store::Collection;
use actix_web::web::{get, scope};
use actix_web::{web, HttpResponse, Scope};
use common::model::customer::Customer;
use common::model::invoice::Invoice;
use common::model::product::Product;
use common::model::report::DashboardStats;

const API_PATH: &str = "/api/dashboard";
const RECENT_INVOICES: usize = 5;

pub fn configure_routes() -> Scope {
    scope(API_PATH).route("", get().to(process))
}

pub fn dashboard_stats(
    mut invoices: Vec<Invoice>,
    customers: &[Customer],
    products: &[Product],
) -> DashboardStats {
    let total_revenue = invoices
        .iter()
        .fold(0.0, |sum, invoice| sum + invoice.total);
    let total_invoices = invoices.len();
    // RFC 3339 timestamps in UTC sort chronologically as strings.
    invoices.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    invoices.truncate(RECENT_INVOICES);
    DashboardStats {
        total_invoices,
        total_customers: customers.len(),
        total_products: products.len(),
        total_revenue,
        recent_invoices: invoices,
    }
}

async fn process(state: web::Data<AppState>) -> HttpResponse {
    let customers: Vec<Customer> = state.store.load_all(Collection::Customers);
    let products: Vec<Product> = state.store.load_all(Collection::Products);
    let stats = dashboard_stats(
        state.store.load_all(Collection::Invoices),
        &customers,
        &products,
    );
    HttpResponse::Ok().json(stats)
}
