use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::wire::{bool_string, decimal_string, null_as_default};

// ---------------------------------------------------------------------------
// Product — One listing for a card/printing/finish combination
// ---------------------------------------------------------------------------

/// Absent or `null` fields decode to their zero value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub sku: String,
    #[serde(deserialize_with = "null_as_default")]
    pub scryfall_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub variation: String,
    #[serde(deserialize_with = "null_as_default")]
    pub edition: String,
    #[serde(with = "bool_string")]
    pub is_foil: bool,
    #[serde(with = "decimal_string")]
    pub price_retail: Decimal,
    #[serde(deserialize_with = "null_as_default")]
    pub qty_retail: i64,
    #[serde(with = "decimal_string")]
    pub price_buy: Decimal,
    #[serde(deserialize_with = "null_as_default")]
    pub qty_buying: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub condition_values: ConditionValue,
}

// ---------------------------------------------------------------------------
// ConditionValue — Price and stock per condition grade
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConditionValue {
    #[serde(with = "decimal_string")]
    pub nm_price: Decimal,
    #[serde(deserialize_with = "null_as_default")]
    pub nm_qty: i64,
    #[serde(with = "decimal_string")]
    pub ex_price: Decimal,
    #[serde(deserialize_with = "null_as_default")]
    pub ex_qty: i64,
    #[serde(with = "decimal_string")]
    pub vg_price: Decimal,
    #[serde(deserialize_with = "null_as_default")]
    pub vg_qty: i64,
    #[serde(with = "decimal_string")]
    pub g_price: Decimal,
    #[serde(deserialize_with = "null_as_default")]
    pub g_qty: i64,
}

/// Physical condition tier, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionGrade {
    NearMint,
    Excellent,
    VeryGood,
    Good,
}

impl ConditionGrade {
    pub const ALL: [ConditionGrade; 4] = [
        ConditionGrade::NearMint,
        ConditionGrade::Excellent,
        ConditionGrade::VeryGood,
        ConditionGrade::Good,
    ];

    /// Card Kingdom's short code (`"nm"`, `"ex"`, `"vg"`, `"g"`).
    pub fn code(self) -> &'static str {
        match self {
            ConditionGrade::NearMint => "nm",
            ConditionGrade::Excellent => "ex",
            ConditionGrade::VeryGood => "vg",
            ConditionGrade::Good => "g",
        }
    }
}

impl ConditionValue {
    pub fn price(&self, grade: ConditionGrade) -> Decimal {
        match grade {
            ConditionGrade::NearMint => self.nm_price,
            ConditionGrade::Excellent => self.ex_price,
            ConditionGrade::VeryGood => self.vg_price,
            ConditionGrade::Good => self.g_price,
        }
    }

    pub fn quantity(&self, grade: ConditionGrade) -> i64 {
        match grade {
            ConditionGrade::NearMint => self.nm_qty,
            ConditionGrade::Excellent => self.ex_qty,
            ConditionGrade::VeryGood => self.vg_qty,
            ConditionGrade::Good => self.g_qty,
        }
    }
}
