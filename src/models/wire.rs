//! Serde adapters for the feed's loose JSON.
//!
//! Prices and the foil flag arrive as strings. A `null` anywhere decodes to
//! the field's zero value; only a value of the wrong type fails.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::de::{self, Deserializer, Unexpected, Visitor};
use serde::{Deserialize, Serializer};

/// `null` -> `T::default()`, anything else decoded as `T`.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// `"true"` / `"false"` <-> `bool`. Any other string is rejected.
pub mod bool_string {
    use super::*;
    use std::fmt;

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *value { "true" } else { "false" })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        struct BoolString;

        impl<'de> Visitor<'de> for BoolString {
            type Value = bool;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(r#"a string "true" or "false""#)
            }

            fn visit_none<E: de::Error>(self) -> Result<bool, E> {
                Ok(false)
            }

            fn visit_unit<E: de::Error>(self) -> Result<bool, E> {
                Ok(false)
            }

            fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<bool, D::Error> {
                deserializer.deserialize_str(self)
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<bool, E> {
                match v {
                    "true" => Ok(true),
                    "false" => Ok(false),
                    other => Err(E::invalid_value(Unexpected::Str(other), &self)),
                }
            }
        }

        deserializer.deserialize_option(BoolString)
    }
}

/// Decimal string <-> [`Decimal`], keeping the scale (`"12.50"` stays `"12.50"`).
pub mod decimal_string {
    use super::*;
    use std::fmt;

    pub fn serialize<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
        struct DecimalString;

        impl<'de> Visitor<'de> for DecimalString {
            type Value = Decimal;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a decimal number encoded as a string")
            }

            fn visit_none<E: de::Error>(self) -> Result<Decimal, E> {
                Ok(Decimal::ZERO)
            }

            fn visit_unit<E: de::Error>(self) -> Result<Decimal, E> {
                Ok(Decimal::ZERO)
            }

            fn visit_some<D: Deserializer<'de>>(
                self,
                deserializer: D,
            ) -> Result<Decimal, D::Error> {
                deserializer.deserialize_str(self)
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Decimal, E> {
                Decimal::from_str(v).map_err(|_| E::invalid_value(Unexpected::Str(v), &self))
            }
        }

        deserializer.deserialize_option(DecimalString)
    }
}
