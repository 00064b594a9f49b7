use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use sqlx::types::Json as SqlJson;
use tracing::info;

use crate::auth::CurrentUser;
use crate::errors::AppError;
use crate::models::user::{EducationRecord, ExperienceRecord, UserRow};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct UserUpdateRequest {
    pub full_name: Option<String>,
    pub skills: Option<Vec<String>>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub education: Option<Vec<EducationRecord>>,
    pub experience: Option<Vec<ExperienceRecord>>,
}

/// GET /api/v1/users/me
pub async fn handle_get_me(CurrentUser(user): CurrentUser) -> Json<UserRow> {
    Json(user)
}

/// PUT /api/v1/users/me
pub async fn handle_update_me(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<UserUpdateRequest>,
) -> Result<Json<UserRow>, AppError> {
    let updated: UserRow = sqlx::query_as(
        r#"
        UPDATE users
        SET full_name = COALESCE($1, full_name),
            skills = COALESCE($2, skills),
            bio = COALESCE($3, bio),
            location = COALESCE($4, location),
            education = COALESCE($5, education),
            experience = COALESCE($6, experience),
            updated_at = now()
        WHERE id = $7
        RETURNING *
        "#,
    )
    .bind(&req.full_name)
    .bind(&req.skills)
    .bind(&req.bio)
    .bind(&req.location)
    .bind(req.education.map(SqlJson))
    .bind(req.experience.map(SqlJson))
    .bind(user.id)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(updated))
}

/// DELETE /api/v1/users/me
/// Removing the user row cascades to saved jobs, skills, experience, career
/// profile, career paths, assessment results, progress, and match history.
pub async fn handle_delete_me(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<StatusCode, AppError> {
    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user.id)
        .execute(&state.db)
        .await?;

    info!("Deleted user {} and all owned records", user.id);
    Ok(StatusCode::NO_CONTENT)
}
