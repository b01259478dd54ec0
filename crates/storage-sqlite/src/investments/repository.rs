use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;
use rust_decimal::Decimal;

use goldfolio_core::investments::{
    Investment, InvestmentRepositoryTrait, NewInvestment, PortfolioSummary,
};
use goldfolio_core::Result;

use super::model::InvestmentDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::investments;

/// Repository for the append-only investment ledger.
///
/// Exposes insert and read operations only; updates and deletes do not
/// exist at this layer either.
pub struct InvestmentRepository {
    pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl InvestmentRepository {
    /// Creates a new InvestmentRepository instance
    pub fn new(pool: Arc<Pool<ConnectionManager<SqliteConnection>>>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl InvestmentRepositoryTrait for InvestmentRepository {
    fn get_investments_by_account_id(&self, account_id: &str) -> Result<Vec<Investment>> {
        let mut conn = get_connection(&self.pool)?;

        let investments_db = investments::table
            .filter(investments::account_id.eq(account_id))
            .select(InvestmentDB::as_select())
            // id breaks ties between entries written in the same second
            .order((investments::created_at.desc(), investments::id.desc()))
            .load::<InvestmentDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(investments_db.into_iter().map(Investment::from).collect())
    }

    fn get_investments(&self) -> Result<Vec<Investment>> {
        let mut conn = get_connection(&self.pool)?;

        let investments_db = investments::table
            .select(InvestmentDB::as_select())
            .order((investments::created_at.desc(), investments::id.desc()))
            .load::<InvestmentDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(investments_db.into_iter().map(Investment::from).collect())
    }

    fn summarize(&self, account_id: &str) -> Result<PortfolioSummary> {
        let mut conn = get_connection(&self.pool)?;

        #[derive(QueryableByName, Debug)]
        struct SummaryRow {
            #[diesel(sql_type = diesel::sql_types::Text)]
            total_invested: String,
            #[diesel(sql_type = diesel::sql_types::Text)]
            total_quantity: String,
            #[diesel(sql_type = diesel::sql_types::Text)]
            average_unit_price: String,
        }

        // Aggregated in SQL on every read; REAL casts keep the division
        // out of SQLite's integer arithmetic.
        let row: SummaryRow = diesel::sql_query(
            r#"
            SELECT
                CAST(COALESCE(SUM(CAST(cash_amount AS REAL)), 0) AS TEXT) AS total_invested,
                CAST(COALESCE(SUM(CAST(quantity AS REAL)), 0) AS TEXT) AS total_quantity,
                CASE
                    WHEN COALESCE(SUM(CAST(quantity AS REAL)), 0) > 0
                    THEN CAST(SUM(CAST(cash_amount AS REAL)) / SUM(CAST(quantity AS REAL)) AS TEXT)
                    ELSE '0'
                END AS average_unit_price
            FROM investments
            WHERE account_id = ?1
            "#,
        )
        .bind::<diesel::sql_types::Text, _>(account_id)
        .get_result(&mut conn)
        .map_err(StorageError::from)?;

        Ok(PortfolioSummary {
            total_invested: Decimal::from_str(&row.total_invested).unwrap_or_default(),
            total_quantity: Decimal::from_str(&row.total_quantity).unwrap_or_default(),
            average_unit_price: Decimal::from_str(&row.average_unit_price).unwrap_or_default(),
        })
    }

    async fn create_investment(
        &self,
        new_investment: NewInvestment,
        quantity: Decimal,
    ) -> Result<Investment> {
        new_investment.validate()?;

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Investment> {
                let row = InvestmentDB {
                    id: 0, // assigned by SQLite on insert
                    account_id: new_investment.account_id,
                    cash_amount: new_investment.cash_amount.to_string(),
                    unit_price: new_investment.unit_price.to_string(),
                    quantity: quantity.to_string(),
                    created_at: NaiveDateTime::default(), // filled by the database default
                };
                let inserted_investment = diesel::insert_into(investments::table)
                    .values(&row)
                    .get_result::<InvestmentDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(Investment::from(inserted_investment))
            })
            .await
    }
}
