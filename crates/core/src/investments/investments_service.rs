use log::debug;
use std::sync::Arc;

use super::investments_model::{Investment, NewInvestment, PortfolioSummary};
use super::investments_traits::{InvestmentRepositoryTrait, InvestmentServiceTrait};
use crate::errors::Result;

/// Service for the append-only investment ledger.
pub struct InvestmentService {
    repository: Arc<dyn InvestmentRepositoryTrait>,
}

impl InvestmentService {
    /// Creates a new InvestmentService instance
    pub fn new(repository: Arc<dyn InvestmentRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl InvestmentServiceTrait for InvestmentService {
    fn get_investments_by_account_id(&self, account_id: &str) -> Result<Vec<Investment>> {
        self.repository.get_investments_by_account_id(account_id)
    }

    fn get_investments(&self) -> Result<Vec<Investment>> {
        self.repository.get_investments()
    }

    fn summarize(&self, account_id: &str) -> Result<PortfolioSummary> {
        self.repository.summarize(account_id)
    }

    async fn record_investment(&self, new_investment: NewInvestment) -> Result<Investment> {
        new_investment.validate()?;
        // The quantity is fixed here, once, from the price the buyer saw.
        let quantity = new_investment.quantity()?;
        debug!(
            "Recording investment: {} USD at {} USD/oz for account {}",
            new_investment.cash_amount, new_investment.unit_price, new_investment.account_id
        );
        self.repository
            .create_investment(new_investment, quantity)
            .await
    }
}
