//! Goal entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Savings goal with a cached progress amount.
///
/// `current_amount` is derived state: it always equals the sum of the
/// amounts of surviving income transactions linked to the goal.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "goals")]
pub struct Model {
    /// Unique identifier.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Owning user.
    pub owner_id: Uuid,
    /// Funding account, if any.
    pub account_id: Option<Uuid>,
    /// Display name.
    pub name: String,
    /// Target amount to reach.
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub target_amount: Decimal,
    /// Cached progress toward the target.
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub current_amount: Decimal,
    /// Optional target date.
    pub target_date: Option<Date>,
    /// Creation timestamp.
    pub created_at: DateTimeWithTimeZone,
    /// Last update timestamp.
    pub updated_at: DateTimeWithTimeZone,
}

/// Goal relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// A goal belongs to a user.
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::OwnerId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Users,
    /// A goal may be funded from an account.
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::AccountId",
        to = "super::accounts::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Accounts,
    /// A goal has many linked transactions.
    #[sea_orm(has_many = "super::transactions::Entity")]
    Transactions,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Accounts.def()
    }
}

impl Related<super::transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
