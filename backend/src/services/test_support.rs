//! Helpers for handler tests: an isolated data directory and an app wired
//! the same way `main` wires it.

use crate::services::{configure, json_config};
use crate::state::AppState;
use crate::store::RecordStore;
use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{test, web, App};
use serde::de::DeserializeOwned;
use tempfile::TempDir;

const TEST_JSON_LIMIT: usize = 64 * 1024;

/// The `TempDir` must outlive the state; drop it last.
pub(crate) fn test_state() -> (TempDir, AppState) {
    let dir = TempDir::new().unwrap();
    let store = RecordStore::new(dir.path().join("data"));
    store.init().unwrap();
    let state = AppState::new(store, dir.path().join("fonts"));
    (dir, state)
}

pub(crate) fn test_app(
    state: AppState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(json_config(TEST_JSON_LIMIT))
        .configure(configure)
}

/// Reads a response body as JSON regardless of its status code.
pub(crate) async fn read_json<B, T>(response: ServiceResponse<B>) -> T
where
    B: MessageBody,
    T: DeserializeOwned,
{
    let body = test::read_body(response).await;
    serde_json::from_slice(&body).unwrap()
}
