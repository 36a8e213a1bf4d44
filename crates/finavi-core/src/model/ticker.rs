use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use super::hash::hash_fields;

/// Compact search-result row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ticker {
    #[serde(rename = "s")]
    pub symbol: Option<String>,
    #[serde(rename = "a")]
    pub average_price: Option<f64>,
    #[serde(rename = "r")]
    pub change_rate: Option<f64>,
}

// JSON numbers are never NaN.
impl Eq for Ticker {}

impl Hash for Ticker {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_fields!(state; &self.symbol, &self.average_price, &self.change_rate);
    }
}
