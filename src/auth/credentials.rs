//! The credential store: account creation and password checks on top of `users`.

use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::{LoginRequest, PasswordHasher, RegisterRequest};
use crate::error::AppError;
use crate::models::User;

pub const EMAIL_EXISTS_MESSAGE: &str = "Email already exists";

/// Creates an account for `request.email`.
///
/// The `UNIQUE` constraint on `users.email` is the only duplicate check, so two
/// concurrent registrations of one address cannot both succeed.
pub async fn register(
    pool: &PgPool,
    hasher: &PasswordHasher,
    request: &RegisterRequest,
) -> Result<User, AppError> {
    let password_hash = hasher.hash(&request.password)?;

    match User::insert(pool, &request.email, &password_hash).await {
        Ok(user) => Ok(user),
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            Err(AppError::Conflict(EMAIL_EXISTS_MESSAGE.into()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Checks `request` against the stored hash and returns the user's id.
pub async fn login(
    pool: &PgPool,
    hasher: &PasswordHasher,
    request: &LoginRequest,
) -> Result<Uuid, AppError> {
    let user = User::find_by_email(pool, &request.email)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    if hasher.verify(&request.password, &user.password_hash)? {
        Ok(user.id)
    } else {
        Err(AppError::Unauthorized("Invalid credentials".into()))
    }
}
