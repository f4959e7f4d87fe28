use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// One asset's position in the index on a given day.
///
/// Deserialised straight from the composition dataset; field names
/// match the dataset's JSON keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetHolding {
    /// Display name (e.g., "Uniswap")
    pub component: String,

    /// Stable project identifier, used for external links (e.g., "uniswap")
    pub id: String,

    /// Portfolio weight in [0, 1]
    pub weight: f64,

    /// Unit quantity held
    pub tokens: f64,

    /// Unit price in USD
    pub price: f64,

    /// Sales-to-price figure the backtest ranked this asset by.
    /// Carried for display only; nothing in the core computes with it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sp: Option<f64>,
}

impl AssetHolding {
    /// USD value of the position: `tokens * price`.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.tokens * self.price
    }

    /// Check the numeric fields against their documented domains.
    /// `day` is only used to label the error.
    pub fn validate(&self, day: &str) -> Result<(), CoreError> {
        if self.component.trim().is_empty() {
            return Err(CoreError::malformed(day, "holding has an empty component name"));
        }
        if self.id.trim().is_empty() {
            return Err(CoreError::malformed(
                day,
                format!("holding {} has an empty id", self.component),
            ));
        }
        if !self.weight.is_finite() || !(0.0..=1.0).contains(&self.weight) {
            return Err(CoreError::malformed(
                day,
                format!("weight {} of {} is outside [0, 1]", self.weight, self.component),
            ));
        }
        if !self.tokens.is_finite() || self.tokens < 0.0 {
            return Err(CoreError::malformed(
                day,
                format!("negative or non-finite token count for {}", self.component),
            ));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(CoreError::malformed(
                day,
                format!("negative or non-finite price for {}", self.component),
            ));
        }
        Ok(())
    }
}
