use crate::model::lenient::null_as_default;
use serde::{Deserialize, Serialize};

/// A customer record as persisted in `customers.json`.
///
/// All descriptive fields are optional on the wire; anything the caller omits
/// deserialises to an empty string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Customer {
    /// Decimal millisecond timestamp assigned by the server at creation.
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(deserialize_with = "null_as_default")]
    pub address: String,
    /// RFC 3339 creation timestamp.
    #[serde(deserialize_with = "null_as_default")]
    pub created_at: String,
}
