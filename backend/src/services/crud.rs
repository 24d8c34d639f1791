//! Generic list/create/update/delete over one persisted collection.
//!
//! Customers and products are served entirely by these handlers; invoices
//! reuse `list` and `delete` and bring their own save path. Creation assigns
//! the identifier and creation timestamp, update shallow-merges the supplied
//! JSON fields over the stored record, delete removes every record with the
//! identifier and succeeds even when there is none.

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use crate::store::{Collection, RecordStore};
use actix_web::web::{delete, get, post, put, scope};
use actix_web::{web, HttpResponse, Scope};
use chrono::{DateTime, SecondsFormat, Utc};
use common::model::customer::Customer;
use common::model::invoice::Invoice;
use common::model::product::Product;
use common::responses::Success;
use log::info;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

/// Fields owned by the server; request bodies can never set them.
pub const ID_FIELD: &str = "id";
pub const CREATED_AT_FIELD: &str = "createdAt";

/// A record type stored in its own collection.
pub trait Entity: Serialize + DeserializeOwned + Clone + 'static {
    const COLLECTION: Collection;
    /// Human readable name used in error messages.
    const NAME: &'static str;

    fn id(&self) -> &str;
}

impl Entity for Customer {
    const COLLECTION: Collection = Collection::Customers;
    const NAME: &'static str = "Customer";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for Product {
    const COLLECTION: Collection = Collection::Products;
    const NAME: &'static str = "Product";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for Invoice {
    const COLLECTION: Collection = Collection::Invoices;
    const NAME: &'static str = "Invoice";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Creation timestamps use the `2024-03-05T10:00:00.000Z` form.
pub fn timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Millisecond epoch of `now` as a decimal string, bumped until it does not
/// collide with an identifier already in `records`.
pub fn next_id<T: Entity>(records: &[T], now: DateTime<Utc>) -> String {
    let mut candidate = now.timestamp_millis();
    loop {
        let id = candidate.to_string();
        if !records.iter().any(|r| r.id() == id) {
            return id;
        }
        candidate += 1;
    }
}

/// Drops the server-owned keys from a caller-supplied field map.
pub fn strip_server_fields(fields: &mut Map<String, Value>) {
    fields.remove(ID_FIELD);
    fields.remove(CREATED_AT_FIELD);
}

/// Serialises a record into its JSON field map.
pub fn to_fields<T: Serialize>(record: &T) -> ApiResult<Map<String, Value>> {
    match serde_json::to_value(record)? {
        Value::Object(fields) => Ok(fields),
        other => Err(ApiError::InvalidRequest(format!(
            "expected a JSON object, found {other}"
        ))),
    }
}

/// Builds a record from caller-supplied fields. Shape errors are the
/// caller's fault and surface as 400.
pub fn from_fields<T: DeserializeOwned>(fields: Map<String, Value>) -> ApiResult<T> {
    serde_json::from_value(Value::Object(fields)).map_err(|e| ApiError::InvalidRequest(e.to_string()))
}

/// Shallow merge: every key in `patch` replaces the stored value, every other
/// stored field is kept. The identifier and creation timestamp never change.
pub fn merge_fields<T: Entity>(existing: &T, mut patch: Map<String, Value>) -> ApiResult<T> {
    strip_server_fields(&mut patch);
    let mut merged = to_fields(existing)?;
    merged.extend(patch);
    from_fields(merged)
}

pub fn list<T: Entity>(store: &RecordStore) -> Vec<T> {
    store.load_all(T::COLLECTION)
}

pub async fn create<T: Entity>(
    store: &RecordStore,
    mut fields: Map<String, Value>,
    now: DateTime<Utc>,
) -> ApiResult<T> {
    strip_server_fields(&mut fields);
    store
        .mutate(T::COLLECTION, move |records: &mut Vec<T>| {
            let id = next_id(records, now);
            fields.insert(ID_FIELD.to_string(), Value::String(id));
            fields.insert(CREATED_AT_FIELD.to_string(), Value::String(timestamp(now)));
            let record: T = from_fields(fields)?;
            records.push(record.clone());
            Ok(record)
        })
        .await
}

pub async fn update<T: Entity>(
    store: &RecordStore,
    id: &str,
    patch: Map<String, Value>,
) -> ApiResult<T> {
    store
        .mutate(T::COLLECTION, |records: &mut Vec<T>| {
            let slot = records
                .iter_mut()
                .find(|r| r.id() == id)
                .ok_or(ApiError::NotFound(T::NAME))?;
            *slot = merge_fields(slot, patch)?;
            Ok(slot.clone())
        })
        .await
}

pub async fn remove<T: Entity>(store: &RecordStore, id: &str) -> ApiResult<()> {
    store
        .mutate(T::COLLECTION, |records: &mut Vec<T>| {
            let before = records.len();
            records.retain(|r| r.id() != id);
            if records.len() != before {
                info!("deleted {} {}", T::NAME, id);
            }
            Ok(())
        })
        .await
}

pub(crate) async fn list_handler<T: Entity>(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(list::<T>(&state.store))
}

pub(crate) async fn create_handler<T: Entity>(
    state: web::Data<AppState>,
    body: web::Json<Map<String, Value>>,
) -> ApiResult<HttpResponse> {
    let record: T = create(&state.store, body.into_inner(), Utc::now()).await?;
    info!("created {} {}", T::NAME, record.id());
    Ok(HttpResponse::Ok().json(record))
}

pub(crate) async fn update_handler<T: Entity>(
    state: web::Data<AppState>,
    id: web::Path<String>,
    body: web::Json<Map<String, Value>>,
) -> ApiResult<HttpResponse> {
    let record: T = update(&state.store, &id, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(record))
}

pub(crate) async fn delete_handler<T: Entity>(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> ApiResult<HttpResponse> {
    remove::<T>(&state.store, &id).await?;
    Ok(HttpResponse::Ok().json(Success { success: true }))
}

/// Registers `GET`/`POST` on `path` and `PUT`/`DELETE` on `path/{id}`.
pub fn configure_routes<T: Entity>(path: &str) -> Scope {
    scope(path)
        .route("", get().to(list_handler::<T>))
        .route("", post().to(create_handler::<T>))
        .route("/{id}", put().to(update_handler::<T>))
        .route("/{id}", delete().to(delete_handler::<T>))
}
