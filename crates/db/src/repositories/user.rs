//! User repository for account creation and lookup.

use arenavault_shared::types::UserId;
use rust_decimal::Decimal;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::entities::users;
use crate::repositories::ledger::is_unique_violation;

/// Error types for user operations.
#[derive(Debug, thiserror::Error)]
pub enum UserError {
    /// Username or email is already registered.
    #[error("Username or email is already registered")]
    AlreadyExists,

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl UserError {
    /// Stable machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::AlreadyExists => "USER_ALREADY_EXISTS",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// HTTP status code a transport layer should map this error to.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::AlreadyExists => 400,
            Self::Database(_) => 500,
        }
    }
}

/// Input for creating a user account.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Unique display name.
    pub username: String,
    /// Unique contact email.
    pub email: String,
    /// Optional contact phone.
    pub phone: Option<String>,
}

/// User repository for account operations.
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

    /// Creates a user with an empty wallet.
    ///
    /// # Errors
    ///
    /// Returns [`UserError::AlreadyExists`] when the username or email is
    /// taken, or a database error.
    pub async fn create(&self, input: NewUser) -> Result<users::Model, UserError> {
        let now: DateTimeWithTimeZone = chrono::Utc::now().into();
        let user = users::ActiveModel {
            id: Set(UserId::new().into_inner()),
            username: Set(input.username),
            email: Set(input.email),
            phone: Set(input.phone),
            deposit_balance: Set(Decimal::ZERO),
            winning_balance: Set(Decimal::ZERO),
            wallet_version: Set(0),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        match user.insert(&self.db).await {
            Ok(user) => Ok(user),
            Err(e) if is_unique_violation(&e) => Err(UserError::AlreadyExists),
            Err(e) => Err(UserError::Database(e.to_string())),
        }
    }

    /// Finds a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn find_by_id(&self, id: UserId) -> Result<Option<users::Model>, UserError> {
        users::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(|e| UserError::Database(e.to_string()))
    }

    /// Finds a user by email.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<users::Model>, UserError> {
        users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| UserError::Database(e.to_string()))
    }
}
