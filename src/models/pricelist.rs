use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use super::product::Product;
use super::wire::null_as_default;
use crate::config::CREATED_AT_FORMAT;
use crate::error::Result;

// ---------------------------------------------------------------------------
// Metadata — Feed generation info
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    #[serde(deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(deserialize_with = "null_as_default")]
    pub base_url: String,
}

impl Metadata {
    /// Parse `created_at` (`YYYY-MM-DD HH:MM:SS`, no zone).
    pub fn created_at_time(&self) -> Result<NaiveDateTime> {
        Ok(NaiveDateTime::parse_from_str(&self.created_at, CREATED_AT_FORMAT)?)
    }

    /// `created_at` read as UTC.
    pub fn created_at_utc(&self) -> Result<DateTime<Utc>> {
        Ok(self.created_at_time()?.and_utc())
    }
}

// ---------------------------------------------------------------------------
// Pricelist — Response envelope
// ---------------------------------------------------------------------------

/// Decoded price list: the feed metadata and its products in feed order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pricelist {
    #[serde(deserialize_with = "null_as_default")]
    pub meta: Metadata,
    #[serde(deserialize_with = "null_as_default")]
    pub data: Vec<Product>,
}

impl Pricelist {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.data.iter()
    }

    /// Split into the products and the metadata.
    pub fn into_parts(self) -> (Vec<Product>, Metadata) {
        (self.data, self.meta)
    }
}

impl IntoIterator for Pricelist {
    type Item = Product;
    type IntoIter = std::vec::IntoIter<Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<'a> IntoIterator for &'a Pricelist {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone};

    use super::*;
    use crate::error::CardKingdomError;

    fn meta(created_at: &str) -> Metadata {
        Metadata {
            created_at: created_at.to_string(),
            base_url: "https://www.cardkingdom.com/".to_string(),
        }
    }

    #[test]
    fn created_at_parses_fixed_layout() {
        let t = meta("2024-01-15 10:30:00").created_at_time().unwrap();
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        assert_eq!(t, expected);
    }

    #[test]
    fn created_at_utc_is_same_wall_clock() {
        let t = meta("2024-01-15 10:30:00").created_at_utc().unwrap();
        assert_eq!(t, Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap());
    }

    #[test]
    fn created_at_rejects_garbage() {
        let err = meta("not-a-date").created_at_time().unwrap_err();
        assert!(matches!(err, CardKingdomError::Timestamp(_)));
    }

    #[test]
    fn null_or_missing_envelope_parts_are_empty() {
        let list: Pricelist = serde_json::from_str(r#"{"data":null}"#).unwrap();
        assert!(list.is_empty());
        assert_eq!(list.meta, Metadata::default());

        let list: Pricelist = serde_json::from_str(r#"{"meta":null,"data":[{"id":3}]}"#).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list.data[0].id, 3);
    }

    #[test]
    fn mistyped_envelope_still_fails() {
        assert!(serde_json::from_str::<Pricelist>(r#"{"data":{}}"#).is_err());
    }

    #[test]
    fn unknown_envelope_fields_are_ignored() {
        let json = r#"{"meta":{"created_at":"2024-01-15 10:30:00","base_url":"x","version":2},
                       "data":[],"extra":true}"#;
        let list: Pricelist = serde_json::from_str(json).unwrap();
        assert!(list.is_empty());
        assert_eq!(list.meta.base_url, "x");
    }
}
