use super::investments_model::{Investment, NewInvestment, PortfolioSummary};
use crate::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;

/// Trait defining the contract for Investment repository operations.
///
/// Deliberately has no update or delete: the ledger is append-only.
#[async_trait]
pub trait InvestmentRepositoryTrait: Send + Sync {
    /// One account's entries, newest first.
    fn get_investments_by_account_id(&self, account_id: &str) -> Result<Vec<Investment>>;
    /// Every entry in the ledger, newest first.
    fn get_investments(&self) -> Result<Vec<Investment>>;
    /// Aggregates over one account; zeroed fields when it has no entries.
    fn summarize(&self, account_id: &str) -> Result<PortfolioSummary>;
    /// Persists one entry atomically. `quantity` is computed by the service
    /// at write time and stored verbatim.
    async fn create_investment(
        &self,
        new_investment: NewInvestment,
        quantity: Decimal,
    ) -> Result<Investment>;
}

/// Trait defining the contract for Investment service operations.
#[async_trait]
pub trait InvestmentServiceTrait: Send + Sync {
    fn get_investments_by_account_id(&self, account_id: &str) -> Result<Vec<Investment>>;
    fn get_investments(&self) -> Result<Vec<Investment>>;
    fn summarize(&self, account_id: &str) -> Result<PortfolioSummary>;
    async fn record_investment(&self, new_investment: NewInvestment) -> Result<Investment>;
}
