//! Investment ledger domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{errors::ValidationError, Error, Result};

/// A single gold purchase, immutable once written.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Investment {
    pub id: i64,
    pub account_id: String,
    /// Cash spent, in USD.
    pub cash_amount: Decimal,
    /// Price the buyer observed, in USD per troy ounce.
    pub unit_price: Decimal,
    /// Gold bought, in troy ounces. Always `cash_amount / unit_price` as
    /// computed at write time; never re-derived from a later price.
    pub quantity: Decimal,
    pub created_at: NaiveDateTime,
}

/// Input model for recording a new investment.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInvestment {
    pub account_id: String,
    pub cash_amount: Decimal,
    pub unit_price: Decimal,
}

impl NewInvestment {
    /// Validates the entry; both amounts must be strictly positive.
    pub fn validate(&self) -> Result<()> {
        if self.account_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "accountId".to_string(),
            )));
        }
        if self.cash_amount <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "investmentAmount must be a positive number".to_string(),
            )));
        }
        if self.unit_price <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "pricePerOz must be a positive number".to_string(),
            )));
        }
        Ok(())
    }

    /// Gold quantity bought at the supplied price.
    pub fn quantity(&self) -> Result<Decimal> {
        self.cash_amount.checked_div(self.unit_price).ok_or_else(|| {
            Error::Validation(ValidationError::InvalidInput(
                "investmentAmount / pricePerOz is not representable".to_string(),
            ))
        })
    }
}

/// Aggregate view over one account's ledger.
///
/// Derived, never stored: recomputed from the ledger rows on every read,
/// so staleness is impossible at O(entries per account) cost.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub total_invested: Decimal,
    pub total_quantity: Decimal,
    pub average_unit_price: Decimal,
}

impl PortfolioSummary {
    /// The empty portfolio: all zeroes, not an error.
    pub fn empty() -> Self {
        Self::default()
    }
}
