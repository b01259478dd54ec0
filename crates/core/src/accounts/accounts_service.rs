use log::debug;
use std::sync::Arc;

use super::accounts_model::{Account, NewAccount};
use super::accounts_traits::{AccountRepositoryTrait, AccountServiceTrait};
use crate::errors::Result;

/// Service for managing accounts
pub struct AccountService {
    repository: Arc<dyn AccountRepositoryTrait>,
}

impl AccountService {
    /// Creates a new AccountService instance
    pub fn new(repository: Arc<dyn AccountRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl AccountServiceTrait for AccountService {
    fn get_account(&self, account_id: &str) -> Result<Account> {
        self.repository.get_account(account_id)
    }

    fn get_account_by_email(&self, email: &str) -> Result<Option<Account>> {
        // Lookups use the same normalization as storage.
        self.repository
            .get_account_by_email(&email.trim().to_lowercase())
    }

    fn list_accounts(&self) -> Result<Vec<Account>> {
        self.repository.list_accounts()
    }

    async fn create_account(&self, new_account: NewAccount) -> Result<Account> {
        new_account.validate()?;
        debug!("Creating account for {}", new_account.normalized_email());
        self.repository.create_account(new_account).await
    }
}
