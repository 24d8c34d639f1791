//! Field deserialisers for records written by older clients.

use serde::{Deserialize, Deserializer};

/// Reads `null` as the field type's default. Cleared number inputs used to
/// be stored as `null`; such records still load, with the field zeroed.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Sample {
        #[serde(deserialize_with = "null_as_default")]
        amount: f64,
        #[serde(deserialize_with = "null_as_default")]
        label: String,
    }

    #[test]
    fn null_and_missing_fields_fall_back_to_default() {
        let sample: Sample = serde_json::from_str(r#"{"amount": null}"#).unwrap();
        assert_eq!(sample.amount, 0.0);
        assert_eq!(sample.label, "");
    }

    #[test]
    fn present_values_are_kept() {
        let sample: Sample = serde_json::from_str(r#"{"amount": 2.5, "label": "x"}"#).unwrap();
        assert_eq!(sample.amount, 2.5);
        assert_eq!(sample.label, "x");
    }

    #[test]
    fn wrong_types_are_still_rejected() {
        assert!(serde_json::from_str::<Sample>(r#"{"amount": "ten"}"#).is_err());
    }
}
