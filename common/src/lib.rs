//! Data model shared between the InvoiceBuddy API server and its clients.
//!
//! Every type serialises with camelCase keys, which is the wire format of the
//! JSON collections on disk and of the HTTP API.

pub mod model;
pub mod requests;
pub mod responses;
