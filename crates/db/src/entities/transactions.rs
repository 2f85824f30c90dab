//! Transaction entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{RecurringInterval, TransactionKind};

/// Ledger transaction.
///
/// `amount` is stored unsigned; `kind` carries the sign. A recurring
/// transaction always has an interval and a projected next occurrence.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    /// Unique identifier.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Owning user.
    pub owner_id: Uuid,
    /// Account the transaction posts to.
    pub account_id: Uuid,
    /// Goal linked to this transaction, if any.
    pub goal_id: Option<Uuid>,
    /// Income or expense.
    pub kind: TransactionKind,
    /// Unsigned amount.
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub amount: Decimal,
    /// Free-form category label.
    pub category: String,
    /// Optional description.
    pub description: Option<String>,
    /// Posting date.
    pub date: Date,
    /// Whether the transaction recurs.
    pub is_recurring: bool,
    /// Recurrence interval, present iff `is_recurring`.
    pub recurring_interval: Option<RecurringInterval>,
    /// Projected next occurrence, present iff `is_recurring`.
    pub next_recurring_date: Option<Date>,
    /// Creation timestamp.
    pub created_at: DateTimeWithTimeZone,
    /// Last update timestamp.
    pub updated_at: DateTimeWithTimeZone,
}

/// Transaction relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// A transaction belongs to a user.
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::OwnerId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Users,
    /// A transaction posts to an account.
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::AccountId",
        to = "super::accounts::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Accounts,
    /// A transaction may be linked to a goal.
    #[sea_orm(
        belongs_to = "super::goals::Entity",
        from = "Column::GoalId",
        to = "super::goals::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Goals,
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

impl Related<super::goals::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Goals.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Projects this row into the core ledger view used for planning.
    #[must_use]
    pub fn to_view(&self) -> centry_core::ledger::TransactionView {
        centry_core::ledger::TransactionView {
            id: self.id,
            account_id: self.account_id,
            kind: self.kind.clone().into(),
            amount: self.amount,
            goal_id: self.goal_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use rust_decimal_macros::dec;

    // Money fields go over the wire as decimal strings so no precision is
    // lost to binary floating point on either side.
    #[test]
    fn test_amount_serializes_as_decimal_string() {
        let model = Model {
            id: Uuid::nil(),
            owner_id: Uuid::nil(),
            account_id: Uuid::nil(),
            goal_id: None,
            kind: TransactionKind::Expense,
            amount: dec!(1234.56),
            category: "groceries".to_string(),
            description: None,
            date: NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
            is_recurring: false,
            recurring_interval: None,
            next_recurring_date: None,
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        };

        let json = serde_json::to_value(&model).unwrap();
        assert_eq!(json["amount"], serde_json::json!("1234.56"));
        assert_eq!(json["kind"], serde_json::json!("EXPENSE"));
    }
}
