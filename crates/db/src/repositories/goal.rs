//! Goal repository for goal CRUD.
//!
//! `current_amount` starts at zero and is only ever written by the
//! transaction orchestrator's reconciliation path; goal CRUD never
//! touches it.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::goals;

/// Error types for goal operations.
#[derive(Debug, thiserror::Error)]
pub enum GoalError {
    /// Goal not found.
    #[error("Goal not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a goal.
#[derive(Debug, Clone)]
pub struct CreateGoalInput {
    /// Owning user.
    pub owner_id: Uuid,
    /// Funding account, if any.
    pub account_id: Option<Uuid>,
    /// Display name.
    pub name: String,
    /// Target amount to reach.
    pub target_amount: Decimal,
    /// Optional target date.
    pub target_date: Option<NaiveDate>,
}

/// Input for updating a goal. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateGoalInput {
    /// New display name.
    pub name: Option<String>,
    /// New target amount.
    pub target_amount: Option<Decimal>,
    /// New funding account. The outer `Option` is "change or not", the
    /// inner one is the new value, which may be "no account".
    pub account_id: Option<Option<Uuid>>,
    /// New target date.
    pub target_date: Option<Option<NaiveDate>>,
}

/// Goal repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct GoalRepository {
    db: DatabaseConnection,
}

impl GoalRepository {
    /// Creates a new goal repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a goal with zero progress.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn create(&self, input: CreateGoalInput) -> Result<goals::Model, GoalError> {
        let now = Utc::now().into();
        let goal = goals::ActiveModel {
            id: Set(Uuid::new_v4()),
            owner_id: Set(input.owner_id),
            account_id: Set(input.account_id),
            name: Set(input.name),
            target_amount: Set(input.target_amount),
            current_amount: Set(Decimal::ZERO),
            target_date: Set(input.target_date),
            created_at: Set(now),
            updated_at: Set(now),
        };
        Ok(goal.insert(&self.db).await?)
    }

    /// Lists the owner's goals in creation order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_for_owner(&self, owner_id: Uuid) -> Result<Vec<goals::Model>, DbErr> {
        goals::Entity::find()
            .filter(goals::Column::OwnerId.eq(owner_id))
            .order_by_asc(goals::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    /// Fetches a single goal scoped to its owner.
    ///
    /// # Errors
    ///
    /// Returns [`GoalError::NotFound`] if the goal does not exist or
    /// belongs to another owner.
    pub async fn get(&self, owner_id: Uuid, id: Uuid) -> Result<goals::Model, GoalError> {
        goals::Entity::find_by_id(id)
            .filter(goals::Column::OwnerId.eq(owner_id))
            .one(&self.db)
            .await?
            .ok_or(GoalError::NotFound(id))
    }

    /// Updates a goal's metadata. Progress is never touched here.
    ///
    /// # Errors
    ///
    /// Returns [`GoalError::NotFound`] if the goal does not exist or
    /// belongs to another owner.
    pub async fn update(
        &self,
        owner_id: Uuid,
        id: Uuid,
        input: UpdateGoalInput,
    ) -> Result<goals::Model, GoalError> {
        let goal = self.get(owner_id, id).await?;

        let mut active: goals::ActiveModel = goal.into();
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(target_amount) = input.target_amount {
            active.target_amount = Set(target_amount);
        }
        if let Some(account_id) = input.account_id {
            active.account_id = Set(account_id);
        }
        if let Some(target_date) = input.target_date {
            active.target_date = Set(target_date);
        }
        active.updated_at = Set(Utc::now().into());

        Ok(active.update(&self.db).await?)
    }

    /// Deletes a goal. Referencing transactions keep their rows but lose
    /// the link (`goal_id` is set to null by the store).
    ///
    /// # Errors
    ///
    /// Returns [`GoalError::NotFound`] if the goal does not exist or
    /// belongs to another owner.
    pub async fn delete(&self, owner_id: Uuid, id: Uuid) -> Result<(), GoalError> {
        let goal = self.get(owner_id, id).await?;
        goal.delete(&self.db).await?;
        Ok(())
    }
}
