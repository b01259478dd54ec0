use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;
use uuid::Uuid;

use goldfolio_core::accounts::{Account, AccountRepositoryTrait, NewAccount};
use goldfolio_core::Result;

use super::model::AccountDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::accounts;

/// Repository for managing account data in the database
pub struct AccountRepository {
    pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl AccountRepository {
    /// Creates a new AccountRepository instance
    pub fn new(pool: Arc<Pool<ConnectionManager<SqliteConnection>>>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl AccountRepositoryTrait for AccountRepository {
    fn get_account(&self, account_id: &str) -> Result<Account> {
        let mut conn = get_connection(&self.pool)?;
        let account_db = accounts::table
            .select(AccountDB::as_select())
            .find(account_id)
            .first::<AccountDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(Account::from(account_db))
    }

    fn get_account_by_email(&self, email: &str) -> Result<Option<Account>> {
        let mut conn = get_connection(&self.pool)?;
        let account_db = accounts::table
            .filter(accounts::email.eq(email))
            .select(AccountDB::as_select())
            .first::<AccountDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(account_db.map(Account::from))
    }

    fn list_accounts(&self) -> Result<Vec<Account>> {
        let mut conn = get_connection(&self.pool)?;
        let accounts_db = accounts::table
            .select(AccountDB::as_select())
            .order(accounts::created_at.asc())
            .load::<AccountDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(accounts_db.into_iter().map(Account::from).collect())
    }

    async fn create_account(&self, new_account: NewAccount) -> Result<Account> {
        new_account.validate()?;
        let account_db_owned: AccountDB = new_account.into();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Account> {
                let mut account_to_insert = account_db_owned;
                account_to_insert.id = Uuid::new_v4().to_string();
                let inserted_account = diesel::insert_into(accounts::table)
                    .values(&account_to_insert)
                    .get_result::<AccountDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(Account::from(inserted_account))
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use goldfolio_core::errors::{DatabaseError, Error};

    use super::*;
    use crate::db;

    fn new_account(email: &str) -> NewAccount {
        NewAccount {
            name: "Test User".to_string(),
            username: "testuser".to_string(),
            email: email.to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$abc$def".to_string(),
        }
    }

    async fn setup() -> (AccountRepository, TempDir) {
        let tmp = TempDir::new().unwrap();
        let db_path = db::init(tmp.path().join("test.db").to_str().unwrap()).unwrap();
        let pool = db::create_pool(&db_path).unwrap();
        db::run_migrations(&pool).unwrap();
        let writer = db::spawn_writer((*pool).clone());
        (AccountRepository::new(pool, writer), tmp)
    }

    #[tokio::test]
    async fn test_create_and_fetch_account() {
        let (repository, _tmp) = setup().await;

        let created = repository
            .create_account(new_account("User@Example.com"))
            .await
            .unwrap();
        assert!(!created.id.is_empty());
        // Stored lowercased, looked up lowercased.
        assert_eq!(created.email, "user@example.com");

        let fetched = repository.get_account(&created.id).unwrap();
        assert_eq!(fetched.username, "testuser");

        let by_email = repository
            .get_account_by_email("user@example.com")
            .unwrap()
            .unwrap();
        assert_eq!(by_email.id, created.id);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_a_unique_violation() {
        let (repository, _tmp) = setup().await;

        repository
            .create_account(new_account("dup@example.com"))
            .await
            .unwrap();
        let err = repository
            .create_account(new_account("dup@example.com"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Database(DatabaseError::UniqueViolation(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_account_is_not_found() {
        let (repository, _tmp) = setup().await;

        let err = repository.get_account("no-such-id").unwrap_err();
        assert!(matches!(err, Error::Database(DatabaseError::NotFound(_))));

        assert!(repository
            .get_account_by_email("ghost@example.com")
            .unwrap()
            .is_none());
    }
}
