//! Database model for ledger entries.
//!
//! Monetary columns are stored as TEXT and parsed back into `Decimal`, so
//! no binary float ever touches a persisted amount.

use std::str::FromStr;

use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use goldfolio_core::investments::Investment;

/// Database model for investments
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::investments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct InvestmentDB {
    #[diesel(skip_insertion)]
    pub id: i64,
    pub account_id: String,
    pub cash_amount: String,
    pub unit_price: String,
    pub quantity: String,
    #[diesel(skip_insertion)]
    pub created_at: NaiveDateTime,
}

impl From<InvestmentDB> for Investment {
    fn from(db: InvestmentDB) -> Self {
        // These columns are only ever written from Decimal values; a parse
        // failure here means the row is corrupt, not user input.
        Self {
            id: db.id,
            account_id: db.account_id,
            cash_amount: Decimal::from_str(&db.cash_amount).unwrap_or_default(),
            unit_price: Decimal::from_str(&db.unit_price).unwrap_or_default(),
            quantity: Decimal::from_str(&db.quantity).unwrap_or_default(),
            created_at: db.created_at,
        }
    }
}
