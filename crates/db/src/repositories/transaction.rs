//! Transaction repository: the mutation orchestrator.
//!
//! Every mutation follows the same shape: ownership-scoped loads, a pure
//! [`MutationPlan`] from `centry-core`, then row writes plus atomic
//! `balance` / `current_amount` increments, all inside one database
//! transaction. Cached amounts are adjusted with
//! `UPDATE ... SET col = col + delta`, never read-modify-write.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use sea_orm::sea_query::Expr;
use uuid::Uuid;

use centry_core::ledger::{CacheKey, LedgerError, LedgerService, MutationPlan, TransactionDraft};

use crate::entities::{accounts, goals, transactions};

/// Error types for transaction operations.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// Transaction not found.
    #[error("Transaction not found: {0}")]
    NotFound(Uuid),

    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(Uuid),

    /// Goal not found.
    #[error("Goal not found: {0}")]
    GoalNotFound(Uuid),

    /// A bulk delete matched no transactions.
    #[error("No transactions matched the requested ids")]
    NoTransactionsMatched,

    /// Draft failed ledger validation.
    #[error(transparent)]
    Validation(#[from] LedgerError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Outcome of a create or update mutation.
#[derive(Debug, Clone)]
pub struct TransactionMutation {
    /// The written transaction row.
    pub transaction: transactions::Model,
    /// Cache keys the caller must invalidate.
    pub invalidations: Vec<CacheKey>,
}

/// Outcome of a bulk delete.
#[derive(Debug, Clone)]
pub struct BulkDeleteOutcome {
    /// Number of rows deleted.
    pub deleted: u64,
    /// Cache keys the caller must invalidate.
    pub invalidations: Vec<CacheKey>,
}

/// Transaction repository for mutations and reads.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    db: DatabaseConnection,
}

impl TransactionRepository {
    /// Creates a new transaction repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a transaction and reconciles the account balance and any
    /// linked goal in the same database transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the draft is invalid, the account or goal is
    /// missing or not owner-scoped, or a database operation fails.
    pub async fn create(
        &self,
        owner_id: Uuid,
        draft: TransactionDraft,
    ) -> Result<TransactionMutation, TransactionError> {
        self.check_account(owner_id, draft.account_id).await?;
        self.check_goal(owner_id, draft.goal_id).await?;

        let plan = LedgerService::plan_create(&draft)?;

        let txn = self.db.begin().await?;

        let now = Utc::now().into();
        let row = transactions::ActiveModel {
            id: Set(Uuid::new_v4()),
            owner_id: Set(owner_id),
            account_id: Set(draft.account_id),
            goal_id: Set(draft.goal_id),
            kind: Set(draft.kind.into()),
            amount: Set(draft.amount),
            category: Set(draft.category.clone()),
            description: Set(draft.description.clone()),
            date: Set(draft.date),
            is_recurring: Set(draft.is_recurring),
            recurring_interval: Set(draft.recurring_interval.map(Into::into)),
            next_recurring_date: Set(plan.next_recurring_date),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let transaction = row.insert(&txn).await?;

        Self::apply_balance_updates(&txn, &plan).await?;
        Self::apply_goal_updates(&txn, &plan).await?;

        txn.commit().await?;

        tracing::debug!(transaction_id = %transaction.id, "transaction created");

        Ok(TransactionMutation {
            transaction,
            invalidations: plan.invalidations,
        })
    }

    /// Updates a transaction and reconciles the balances and goal amounts
    /// affected by the change, including account and goal reassignment.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction, target account, or target goal
    /// is missing or not owner-scoped, the draft is invalid, or a database
    /// operation fails.
    pub async fn update(
        &self,
        owner_id: Uuid,
        id: Uuid,
        draft: TransactionDraft,
    ) -> Result<TransactionMutation, TransactionError> {
        let original = self.get(owner_id, id).await?;
        self.check_account(owner_id, draft.account_id).await?;
        self.check_goal(owner_id, draft.goal_id).await?;

        let plan = LedgerService::plan_update(&original.to_view(), &draft)?;

        let txn = self.db.begin().await?;

        let mut row: transactions::ActiveModel = original.into();
        row.account_id = Set(draft.account_id);
        row.goal_id = Set(draft.goal_id);
        row.kind = Set(draft.kind.into());
        row.amount = Set(draft.amount);
        row.category = Set(draft.category.clone());
        row.description = Set(draft.description.clone());
        row.date = Set(draft.date);
        row.is_recurring = Set(draft.is_recurring);
        row.recurring_interval = Set(draft.recurring_interval.map(Into::into));
        row.next_recurring_date = Set(plan.next_recurring_date);
        row.updated_at = Set(Utc::now().into());
        let transaction = row.update(&txn).await?;

        Self::apply_balance_updates(&txn, &plan).await?;
        Self::apply_goal_updates(&txn, &plan).await?;

        txn.commit().await?;

        tracing::debug!(transaction_id = %transaction.id, "transaction updated");

        Ok(TransactionMutation {
            transaction,
            invalidations: plan.invalidations,
        })
    }

    /// Deletes a set of the owner's transactions as one atomic unit.
    ///
    /// Goal amounts are decremented per transaction, then the rows are
    /// deleted, then per-account balance aggregates are applied.
    ///
    /// # Errors
    ///
    /// Returns [`TransactionError::NoTransactionsMatched`] if none of the
    /// ids resolve to an owned transaction; otherwise errors on database
    /// failure.
    pub async fn bulk_delete(
        &self,
        owner_id: Uuid,
        ids: &[Uuid],
    ) -> Result<BulkDeleteOutcome, TransactionError> {
        let rows = transactions::Entity::find()
            .filter(transactions::Column::OwnerId.eq(owner_id))
            .filter(transactions::Column::Id.is_in(ids.to_vec()))
            .all(&self.db)
            .await?;

        if rows.is_empty() {
            return Err(TransactionError::NoTransactionsMatched);
        }

        let views: Vec<_> = rows.iter().map(transactions::Model::to_view).collect();
        let plan = LedgerService::plan_bulk_delete(&views)?;

        let matched: Vec<Uuid> = rows.iter().map(|row| row.id).collect();

        let txn = self.db.begin().await?;

        Self::apply_goal_updates(&txn, &plan).await?;

        let result = transactions::Entity::delete_many()
            .filter(transactions::Column::Id.is_in(matched))
            .exec(&txn)
            .await?;

        Self::apply_balance_updates(&txn, &plan).await?;

        txn.commit().await?;

        tracing::debug!(deleted = result.rows_affected, "transactions deleted");

        Ok(BulkDeleteOutcome {
            deleted: result.rows_affected,
            invalidations: plan.invalidations,
        })
    }

    /// Deletes a single transaction. Routes through [`Self::bulk_delete`]
    /// so the compensation logic has exactly one implementation.
    ///
    /// # Errors
    ///
    /// Returns [`TransactionError::NotFound`] if the transaction does not
    /// exist or belongs to another owner.
    pub async fn delete(
        &self,
        owner_id: Uuid,
        id: Uuid,
    ) -> Result<BulkDeleteOutcome, TransactionError> {
        match self.bulk_delete(owner_id, &[id]).await {
            Err(TransactionError::NoTransactionsMatched) => Err(TransactionError::NotFound(id)),
            other => other,
        }
    }

    /// Fetches a single transaction scoped to its owner.
    ///
    /// # Errors
    ///
    /// Returns [`TransactionError::NotFound`] if the transaction does not
    /// exist or belongs to another owner.
    pub async fn get(
        &self,
        owner_id: Uuid,
        id: Uuid,
    ) -> Result<transactions::Model, TransactionError> {
        transactions::Entity::find_by_id(id)
            .filter(transactions::Column::OwnerId.eq(owner_id))
            .one(&self.db)
            .await?
            .ok_or(TransactionError::NotFound(id))
    }

    /// Lists an account's transactions, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_for_account(
        &self,
        owner_id: Uuid,
        account_id: Uuid,
    ) -> Result<Vec<transactions::Model>, DbErr> {
        transactions::Entity::find()
            .filter(transactions::Column::OwnerId.eq(owner_id))
            .filter(transactions::Column::AccountId.eq(account_id))
            .order_by_desc(transactions::Column::Date)
            .all(&self.db)
            .await
    }

    /// Verifies the account exists and belongs to the owner.
    async fn check_account(&self, owner_id: Uuid, id: Uuid) -> Result<(), TransactionError> {
        accounts::Entity::find_by_id(id)
            .filter(accounts::Column::OwnerId.eq(owner_id))
            .one(&self.db)
            .await?
            .ok_or(TransactionError::AccountNotFound(id))?;
        Ok(())
    }

    /// Verifies the goal, when linked, exists and belongs to the owner.
    async fn check_goal(&self, owner_id: Uuid, goal_id: Option<Uuid>) -> Result<(), TransactionError> {
        if let Some(id) = goal_id {
            goals::Entity::find_by_id(id)
                .filter(goals::Column::OwnerId.eq(owner_id))
                .one(&self.db)
                .await?
                .ok_or(TransactionError::GoalNotFound(id))?;
        }
        Ok(())
    }

    /// Applies the plan's per-account balance deltas as atomic increments.
    async fn apply_balance_updates(
        txn: &DatabaseTransaction,
        plan: &MutationPlan,
    ) -> Result<(), DbErr> {
        for update in &plan.balance_updates {
            accounts::Entity::update_many()
                .col_expr(
                    accounts::Column::Balance,
                    Expr::col(accounts::Column::Balance).add(update.delta),
                )
                .col_expr(
                    accounts::Column::UpdatedAt,
                    Expr::value(Utc::now()),
                )
                .filter(accounts::Column::Id.eq(update.account_id))
                .exec(txn)
                .await?;
        }
        Ok(())
    }

    /// Applies the plan's per-transaction goal deltas as atomic increments.
    async fn apply_goal_updates(
        txn: &DatabaseTransaction,
        plan: &MutationPlan,
    ) -> Result<(), DbErr> {
        for update in &plan.goal_updates {
            goals::Entity::update_many()
                .col_expr(
                    goals::Column::CurrentAmount,
                    Expr::col(goals::Column::CurrentAmount).add(update.delta),
                )
                .col_expr(
                    goals::Column::UpdatedAt,
                    Expr::value(Utc::now()),
                )
                .filter(goals::Column::Id.eq(update.goal_id))
                .exec(txn)
                .await?;
        }
        Ok(())
    }
}
