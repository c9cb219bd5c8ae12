//! User repository contract and its SeaORM implementation with soft delete.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, SubsecRound, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, SqlErr,
};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use common::{AppError, AppResult, OptionExt};
use domain::User;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Lookups fail with `AppError::NotFound` when no live record matches.
/// Deleted records are invisible to every operation.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user. The caller supplies `id`, `name` and `email`;
    /// the store assigns both timestamps. Fails on a duplicate email.
    async fn create(&self, user: &User) -> AppResult<()>;

    /// Find a user by ID
    async fn get_by_id(&self, id: &str) -> AppResult<User>;

    /// Find a user by email address
    async fn get_by_email(&self, email: &str) -> AppResult<User>;

    /// Persist mutable fields of an existing user and refresh `updated_at`.
    /// Returns the stored record.
    async fn update(&self, user: &User) -> AppResult<User>;

    /// Remove a user. Deleting an unknown ID is not an error.
    async fn delete_by_id(&self, id: &str) -> AppResult<()>;

    /// One page of users (1-based `page`) plus the total count of all users.
    async fn list(&self, page: u64, page_size: u64) -> AppResult<(Vec<User>, u64)>;
}

/// Concrete implementation of UserRepository with soft delete
pub struct UserStore {
    db: Arc<DatabaseConnection>,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

/// Current time at the precision PostgreSQL stores (microseconds).
fn stored_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Map a failed write, turning a unique-index violation into a conflict.
fn map_write_error(err: DbErr, email: &str) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::conflict(format!("user with email {} already exists", email))
        }
        _ => AppError::from(err),
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn create(&self, user: &User) -> AppResult<()> {
        if user.id.is_empty() || user.name.is_empty() || user.email.is_empty() {
            return Err(AppError::validation("user id, name and email are required"));
        }

        let now = stored_now();
        let active_model = ActiveModel {
            id: Set(user.id.clone()),
            name: Set(user.name.clone()),
            email: Set(user.email.clone()),
            age: Set(user.age),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
        };

        UserEntity::insert(active_model)
            .exec_without_returning(self.db.as_ref())
            .await
            .map_err(|e| map_write_error(e, &user.email))?;

        tracing::info!(user_id = %user.id, "Created user");
        Ok(())
    }

    async fn get_by_id(&self, id: &str) -> AppResult<User> {
        UserEntity::find_by_id(id.to_owned())
            .filter(user::Column::DeletedAt.is_null())
            .one(self.db.as_ref())
            .await?
            .map(User::from)
            .ok_or_not_found()
    }

    async fn get_by_email(&self, email: &str) -> AppResult<User> {
        UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .filter(user::Column::DeletedAt.is_null())
            .one(self.db.as_ref())
            .await?
            .map(User::from)
            .ok_or_not_found()
    }

    async fn update(&self, user: &User) -> AppResult<User> {
        let now = stored_now();
        let result = UserEntity::update_many()
            .col_expr(user::Column::Name, Expr::value(user.name.clone()))
            .col_expr(user::Column::Age, Expr::value(user.age))
            .col_expr(user::Column::UpdatedAt, Expr::value(now))
            .filter(user::Column::Id.eq(user.id.as_str()))
            .filter(user::Column::DeletedAt.is_null())
            .exec(self.db.as_ref())
            .await
            .map_err(|e| map_write_error(e, &user.email))?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        tracing::info!(user_id = %user.id, "Updated user");
        Ok(User {
            updated_at: now,
            ..user.clone()
        })
    }

    async fn delete_by_id(&self, id: &str) -> AppResult<()> {
        // Soft delete: set deleted_at timestamp
        let now = stored_now();
        let result = UserEntity::update_many()
            .col_expr(user::Column::DeletedAt, Expr::value(Some(now)))
            .col_expr(user::Column::UpdatedAt, Expr::value(now))
            .filter(user::Column::Id.eq(id))
            .filter(user::Column::DeletedAt.is_null())
            .exec(self.db.as_ref())
            .await?;

        tracing::info!(user_id = %id, rows = result.rows_affected, "Deleted user");
        Ok(())
    }

    async fn list(&self, page: u64, page_size: u64) -> AppResult<(Vec<User>, u64)> {
        let total = UserEntity::find()
            .filter(user::Column::DeletedAt.is_null())
            .count(self.db.as_ref())
            .await?;

        let offset = page.saturating_sub(1).saturating_mul(page_size);
        let models = UserEntity::find()
            .filter(user::Column::DeletedAt.is_null())
            .order_by_asc(user::Column::CreatedAt)
            .order_by_asc(user::Column::Id)
            .offset(offset)
            .limit(page_size)
            .all(self.db.as_ref())
            .await?;

        Ok((models.into_iter().map(User::from).collect(), total))
    }
}
