//! Account repository for account CRUD and the default-account invariant.
//!
//! An owner with at least one account always has exactly one default
//! account. Creation of the first account forces it to be the default;
//! the default account cannot be deleted until another account takes
//! its place.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::{accounts, sea_orm_active_enums::AccountKind, transactions};

/// Error types for account operations.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// Account not found.
    #[error("Account not found: {0}")]
    NotFound(Uuid),

    /// The default account cannot be deleted.
    #[error("Cannot delete the default account; set another account as default first")]
    DefaultUndeletable(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating an account.
#[derive(Debug, Clone)]
pub struct CreateAccountInput {
    /// Owning user.
    pub owner_id: Uuid,
    /// Display name.
    pub name: String,
    /// Account type.
    pub kind: AccountKind,
    /// Initial balance.
    pub balance: Decimal,
    /// Whether to make this the default account.
    pub is_default: bool,
}

/// Input for updating an account.
///
/// Name, kind, and balance are written as given; the balance write is the
/// explicit-edit path and bypasses transaction reconciliation on purpose.
#[derive(Debug, Clone)]
pub struct UpdateAccountInput {
    /// New display name.
    pub name: String,
    /// New account type.
    pub kind: AccountKind,
    /// New balance, set directly.
    pub balance: Decimal,
    /// When true, this account becomes the owner's default.
    pub is_default: bool,
}

/// Account detail with its transactions, newest first.
#[derive(Debug, Clone)]
pub struct AccountWithTransactions {
    /// The account.
    pub account: accounts::Model,
    /// Transactions ordered by date descending.
    pub transactions: Vec<transactions::Model>,
}

/// Account repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an account.
    ///
    /// The owner's first account becomes the default regardless of the
    /// requested flag. When the new account is the default, any previous
    /// default is cleared in the same database transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails.
    pub async fn create(&self, input: CreateAccountInput) -> Result<accounts::Model, AccountError> {
        let txn = self.db.begin().await?;

        let existing = accounts::Entity::find()
            .filter(accounts::Column::OwnerId.eq(input.owner_id))
            .all(&txn)
            .await?;
        let make_default = input.is_default || existing.is_empty();

        if make_default {
            Self::clear_default(&txn, input.owner_id).await?;
        }

        let now = Utc::now().into();
        let account = accounts::ActiveModel {
            id: Set(Uuid::new_v4()),
            owner_id: Set(input.owner_id),
            name: Set(input.name),
            kind: Set(input.kind),
            balance: Set(input.balance),
            is_default: Set(make_default),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let account = account.insert(&txn).await?;

        txn.commit().await?;
        Ok(account)
    }

    /// Lists the owner's accounts, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_for_owner(&self, owner_id: Uuid) -> Result<Vec<accounts::Model>, DbErr> {
        accounts::Entity::find()
            .filter(accounts::Column::OwnerId.eq(owner_id))
            .order_by_desc(accounts::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    /// Fetches a single account scoped to its owner.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::NotFound`] if the account does not exist or
    /// belongs to another owner.
    pub async fn get(&self, owner_id: Uuid, id: Uuid) -> Result<accounts::Model, AccountError> {
        accounts::Entity::find_by_id(id)
            .filter(accounts::Column::OwnerId.eq(owner_id))
            .one(&self.db)
            .await?
            .ok_or(AccountError::NotFound(id))
    }

    /// Fetches an account together with its transactions, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::NotFound`] if the account does not exist or
    /// belongs to another owner.
    pub async fn get_with_transactions(
        &self,
        owner_id: Uuid,
        id: Uuid,
    ) -> Result<AccountWithTransactions, AccountError> {
        let account = self.get(owner_id, id).await?;

        let transactions = transactions::Entity::find()
            .filter(transactions::Column::AccountId.eq(id))
            .order_by_desc(transactions::Column::Date)
            .all(&self.db)
            .await?;

        Ok(AccountWithTransactions {
            account,
            transactions,
        })
    }

    /// Makes the given account the owner's default, clearing any previous
    /// default in the same database transaction.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::NotFound`] if the account does not exist or
    /// belongs to another owner.
    pub async fn set_default(
        &self,
        owner_id: Uuid,
        id: Uuid,
    ) -> Result<accounts::Model, AccountError> {
        let txn = self.db.begin().await?;

        let account = accounts::Entity::find_by_id(id)
            .filter(accounts::Column::OwnerId.eq(owner_id))
            .one(&txn)
            .await?
            .ok_or(AccountError::NotFound(id))?;

        Self::clear_default(&txn, owner_id).await?;

        let mut active: accounts::ActiveModel = account.into();
        active.is_default = Set(true);
        active.updated_at = Set(Utc::now().into());
        let account = active.update(&txn).await?;

        txn.commit().await?;
        Ok(account)
    }

    /// Updates an account's name, type, balance, and default flag.
    ///
    /// A `true` default flag clears any previous default in the same
    /// database transaction; a `false` flag leaves the current default
    /// untouched, so demotion only ever happens by promoting another
    /// account.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::NotFound`] if the account does not exist or
    /// belongs to another owner.
    pub async fn update(
        &self,
        owner_id: Uuid,
        id: Uuid,
        input: UpdateAccountInput,
    ) -> Result<accounts::Model, AccountError> {
        let txn = self.db.begin().await?;

        let account = accounts::Entity::find_by_id(id)
            .filter(accounts::Column::OwnerId.eq(owner_id))
            .one(&txn)
            .await?
            .ok_or(AccountError::NotFound(id))?;

        if input.is_default && !account.is_default {
            Self::clear_default(&txn, owner_id).await?;
        }

        let make_default = input.is_default || account.is_default;

        let mut active: accounts::ActiveModel = account.into();
        active.name = Set(input.name);
        active.kind = Set(input.kind);
        active.balance = Set(input.balance);
        active.is_default = Set(make_default);
        active.updated_at = Set(Utc::now().into());
        let account = active.update(&txn).await?;

        txn.commit().await?;
        Ok(account)
    }

    /// Deletes an account and, via cascade, its transactions.
    ///
    /// The default account is never deleted; the caller must promote
    /// another account first.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::NotFound`] if the account does not exist or
    /// belongs to another owner, and [`AccountError::DefaultUndeletable`]
    /// if it is the owner's default account.
    pub async fn delete(&self, owner_id: Uuid, id: Uuid) -> Result<(), AccountError> {
        let account = accounts::Entity::find_by_id(id)
            .filter(accounts::Column::OwnerId.eq(owner_id))
            .one(&self.db)
            .await?
            .ok_or(AccountError::NotFound(id))?;

        if account.is_default {
            return Err(AccountError::DefaultUndeletable(id));
        }

        accounts::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }

    /// Clears the owner's current default flag, if any.
    async fn clear_default(txn: &DatabaseTransaction, owner_id: Uuid) -> Result<(), DbErr> {
        accounts::Entity::update_many()
            .col_expr(
                accounts::Column::IsDefault,
                sea_orm::sea_query::Expr::value(false),
            )
            .col_expr(
                accounts::Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(Utc::now()),
            )
            .filter(accounts::Column::OwnerId.eq(owner_id))
            .filter(accounts::Column::IsDefault.eq(true))
            .exec(txn)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_undeletable_message_names_the_remedy() {
        let err = AccountError::DefaultUndeletable(Uuid::nil());
        assert_eq!(
            err.to_string(),
            "Cannot delete the default account; set another account as default first"
        );
    }

    #[test]
    fn test_not_found_message_carries_the_id() {
        let id = Uuid::nil();
        let err = AccountError::NotFound(id);
        assert_eq!(
            err.to_string(),
            "Account not found: 00000000-0000-0000-0000-000000000000"
        );
    }
}
