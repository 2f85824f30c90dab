//! User repository backing the identity contract.
//!
//! Users are provisioned lazily: the identity provider owns sign-up, and
//! the first authenticated request materializes the matching row so that
//! owner foreign keys resolve.

use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{DatabaseConnection, DbErr, EntityTrait, Set};
use uuid::Uuid;

use crate::entities::users;

/// User repository for identity-backed provisioning and lookup.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Ensures a user row exists for the given id, creating it on first
    /// sight with whatever identity attributes the token carried.
    ///
    /// Concurrent first requests race on the insert; the conflict target
    /// makes the loser a no-op and both callers observe the same row.
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails.
    pub async fn ensure(
        &self,
        id: Uuid,
        email: Option<&str>,
        name: Option<&str>,
    ) -> Result<users::Model, DbErr> {
        if let Some(user) = users::Entity::find_by_id(id).one(&self.db).await? {
            return Ok(user);
        }

        let now = Utc::now().into();
        let user = users::ActiveModel {
            id: Set(id),
            email: Set(email.map(ToString::to_string)),
            name: Set(name.unwrap_or("member").to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        users::Entity::insert(user)
            .on_conflict(
                OnConflict::column(users::Column::Id)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        users::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("user {id}")))
    }
}
