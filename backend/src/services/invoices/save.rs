//! Invoice save path.
//!
//! Every stored invoice is assembled here, so the derived fields always agree
//! with the line items: names and unit prices are snapshotted from the catalog
//! and the totals come from `billing::compute_totals`.
//!
//! On update, snapshots are only refreshed for what the patch touches: a patch
//! carrying `items` re-prices every line against the current catalog, a patch
//! carrying `customerId` re-reads the customer's name. Anything else keeps
//! the invoice as it was issued, and only the totals are recomputed.

use crate::billing::{compute_totals, price_items};
use crate::error::{ApiError, ApiResult};
use crate::services::crud::{self, from_fields, strip_server_fields, to_fields, Entity};
use crate::state::AppState;
use crate::store::{Collection, RecordStore};
use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use common::model::customer::Customer;
use common::model::invoice::{Invoice, LineItem};
use common::model::product::Product;
use common::requests::{DraftItem, InvoiceDraft};
use log::{info, warn};
use serde_json::{Map, Value};

const ITEMS_FIELD: &str = "items";
const CUSTOMER_ID_FIELD: &str = "customerId";
const DISCOUNT_FIELD: &str = "discount";
const DISCOUNT_AMOUNT_FIELD: &str = "discountAmount";

pub(crate) async fn create(
    state: web::Data<AppState>,
    body: web::Json<InvoiceDraft>,
) -> ApiResult<HttpResponse> {
    let invoice = create_invoice(&state.store, body.into_inner(), Utc::now()).await?;
    info!(
        "created invoice {} ({}) total {:.2}",
        invoice.id, invoice.invoice_number, invoice.total
    );
    Ok(HttpResponse::Ok().json(invoice))
}

pub(crate) async fn update(
    state: web::Data<AppState>,
    id: web::Path<String>,
    body: web::Json<Map<String, Value>>,
) -> ApiResult<HttpResponse> {
    let invoice = update_invoice(&state.store, &id, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(invoice))
}

/// Prices `draft`, assigns an identifier and appends the invoice.
pub async fn create_invoice(
    store: &RecordStore,
    draft: InvoiceDraft,
    now: DateTime<Utc>,
) -> ApiResult<Invoice> {
    let catalog: Vec<Product> = store.load_all(Collection::Products);
    let customers: Vec<Customer> = store.load_all(Collection::Customers);
    let items = price_items(&draft.items, &catalog);
    let customer_name = resolve_customer_name(&customers, &draft.customer_id);

    store
        .mutate(Collection::Invoices, move |invoices: &mut Vec<Invoice>| {
            let id = crud::next_id(invoices, now);
            let invoice = assemble(id, crud::timestamp(now), draft, customer_name, items);
            invoices.push(invoice.clone());
            Ok(invoice)
        })
        .await
}

/// Merges `patch` over the stored invoice's draft and saves the result.
pub async fn update_invoice(
    store: &RecordStore,
    id: &str,
    mut patch: Map<String, Value>,
) -> ApiResult<Invoice> {
    strip_server_fields(&mut patch);
    if let Some(discount) = patch.remove(DISCOUNT_FIELD) {
        patch
            .entry(DISCOUNT_AMOUNT_FIELD.to_string())
            .or_insert(discount);
    }

    let reprice = patch.contains_key(ITEMS_FIELD);
    let rename = patch.contains_key(CUSTOMER_ID_FIELD);
    let catalog: Vec<Product> = if reprice {
        store.load_all(Collection::Products)
    } else {
        Vec::new()
    };
    let customers: Vec<Customer> = if rename {
        store.load_all(Collection::Customers)
    } else {
        Vec::new()
    };

    store
        .mutate(Collection::Invoices, move |invoices: &mut Vec<Invoice>| {
            let slot = invoices
                .iter_mut()
                .find(|invoice| invoice.id == id)
                .ok_or(ApiError::NotFound(Invoice::NAME))?;

            let mut fields = to_fields(&draft_of(slot))?;
            fields.extend(patch);
            let draft: InvoiceDraft = from_fields(fields)?;

            let items = if reprice {
                price_items(&draft.items, &catalog)
            } else {
                slot.items.clone()
            };
            let customer_name = if rename {
                resolve_customer_name(&customers, &draft.customer_id)
            } else {
                slot.customer_name.clone()
            };

            *slot = assemble(
                slot.id.clone(),
                slot.created_at.clone(),
                draft,
                customer_name,
                items,
            );
            Ok(slot.clone())
        })
        .await
}

/// The caller-controlled view of a stored invoice.
fn draft_of(invoice: &Invoice) -> InvoiceDraft {
    InvoiceDraft {
        invoice_number: invoice.invoice_number.clone(),
        customer_id: invoice.customer_id.clone(),
        date: invoice.date.clone(),
        items: invoice
            .items
            .iter()
            .map(|item| DraftItem {
                product_id: item.product_id.clone(),
                quantity: item.quantity,
            })
            .collect(),
        tax_rate: invoice.effective_tax_rate(),
        discount_amount: invoice.discount,
    }
}

fn resolve_customer_name(customers: &[Customer], customer_id: &str) -> String {
    match customers.iter().find(|c| c.id == customer_id) {
        Some(customer) => customer.name.clone(),
        None => {
            warn!("customer '{}' not found, saving invoice without a name", customer_id);
            String::new()
        }
    }
}

fn assemble(
    id: String,
    created_at: String,
    draft: InvoiceDraft,
    customer_name: String,
    items: Vec<LineItem>,
) -> Invoice {
    let totals = compute_totals(&items, draft.tax_rate, draft.discount_amount);
    Invoice {
        id,
        invoice_number: draft.invoice_number,
        customer_id: draft.customer_id,
        customer_name,
        date: draft.date,
        items,
        subtotal: totals.subtotal,
        tax: totals.tax,
        discount: totals.discount,
        total: totals.total,
        tax_rate: Some(draft.tax_rate),
        created_at,
    }
}
