//! # Product Service Module
//!
//! Routes under `/api/products`, with the same list/create/update/delete
//! contract as customers. Records carry `name`, `category` and a unit
//! `price`. Price changes only affect invoices saved afterwards; existing
//! invoices keep the price snapshotted on their line items.

use crate::services::crud;
use actix_web::Scope;
use common::model::product::Product;

const API_PATH: &str = "/api/products";

pub fn configure_routes() -> Scope {
    crud::configure_routes::<Product>(API_PATH)
}

#[cfg(test)]
mod tests {
    use crate::services::test_support::{read_json, test_app, test_state};
    use actix_web::http::StatusCode;
    use actix_web::test;
    use common::model::product::Product;
    use common::responses::ErrorBody;
    use serde_json::json;

    #[actix_web::test]
    async fn full_lifecycle() {
        let (_dir, state) = test_state();
        let app = test::init_service(test_app(state)).await;

        let request = test::TestRequest::post()
            .uri("/api/products")
            .set_json(json!({"name": "Widget", "category": "Hardware", "price": 10}))
            .to_request();
        let created: Product = test::call_and_read_body_json(&app, request).await;
        assert_eq!(created.price, 10.0);

        let request = test::TestRequest::put()
            .uri(&format!("/api/products/{}", created.id))
            .set_json(json!({"price": 11.5}))
            .to_request();
        let updated: Product = test::call_and_read_body_json(&app, request).await;
        assert_eq!(updated.price, 11.5);
        assert_eq!(updated.category, "Hardware");

        let request = test::TestRequest::delete()
            .uri(&format!("/api/products/{}", created.id))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);

        let request = test::TestRequest::get().uri("/api/products").to_request();
        let listed: Vec<Product> = test::call_and_read_body_json(&app, request).await;
        assert!(listed.is_empty());
    }

    #[actix_web::test]
    async fn mistyped_price_is_rejected() {
        let (_dir, state) = test_state();
        let app = test::init_service(test_app(state)).await;

        let request = test::TestRequest::post()
            .uri("/api/products")
            .set_json(json!({"name": "Widget", "price": "cheap"}))
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: ErrorBody = read_json(response).await;
        assert!(body.error.contains("invalid type"));
    }

    #[actix_web::test]
    async fn update_missing_product_is_404() {
        let (_dir, state) = test_state();
        let app = test::init_service(test_app(state)).await;

        let request = test::TestRequest::put()
            .uri("/api/products/1")
            .set_json(json!({"price": 1}))
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: ErrorBody = read_json(response).await;
        assert_eq!(body.error, "Product not found");
    }
}
