//! Database model for accounts.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use goldfolio_core::accounts::{Account, NewAccount};

/// Database model for accounts
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
#[diesel(table_name = crate::schema::accounts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AccountDB {
    pub id: String,
    pub name: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    #[diesel(skip_insertion)]
    pub created_at: NaiveDateTime,
}

// Conversion implementations
impl From<AccountDB> for Account {
    fn from(db: AccountDB) -> Self {
        Self {
            id: db.id,
            name: db.name,
            username: db.username,
            email: db.email,
            password_hash: db.password_hash,
            created_at: db.created_at,
        }
    }
}

impl From<NewAccount> for AccountDB {
    fn from(domain: NewAccount) -> Self {
        let email = domain.normalized_email();
        Self {
            id: String::new(), // assigned by the repository at insert time
            name: domain.name.trim().to_string(),
            username: domain.username.trim().to_string(),
            email,
            password_hash: domain.password_hash,
            created_at: NaiveDateTime::default(), // filled by the database default
        }
    }
}
