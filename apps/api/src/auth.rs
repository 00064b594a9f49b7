use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use chrono::Utc;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::user::UserRow;
use crate::state::AppState;

/// The authenticated caller, resolved from the bearer token.
///
/// Token issuance belongs to the external auth service; this API only reads
/// the `auth_sessions` table it writes. Missing, malformed, or expired tokens
/// reject with 401; a subject email that no longer resolves to a user row
/// rejects with 404.
pub struct CurrentUser(pub UserRow);

#[axum::async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(AppError::Unauthorized)?;

        let email = resolve_subject(&state.db, token)
            .await?
            .ok_or(AppError::Unauthorized)?;

        let user: Option<UserRow> = sqlx::query_as("SELECT * FROM users WHERE email = $1")
            .bind(&email)
            .fetch_optional(&state.db)
            .await?;

        let user = user.ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
        Ok(CurrentUser(user))
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Looks up a live session for the token and returns its subject email.
async fn resolve_subject(db: &PgPool, token: &str) -> Result<Option<String>, AppError> {
    let subject: Option<String> = sqlx::query_scalar(
        "SELECT subject_email FROM auth_sessions WHERE token = $1 AND expires_at > $2",
    )
    .bind(token)
    .bind(Utc::now())
    .fetch_optional(db)
    .await?;

    Ok(subject)
}
