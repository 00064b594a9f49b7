use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::errors::AppError;
use crate::models::career::{SkillLevel, UserSkillRow};
use crate::state::AppState;

fn default_skill_level() -> SkillLevel {
    SkillLevel::Beginner
}

#[derive(Deserialize)]
pub struct SkillCreateRequest {
    pub skill_name: String,
    #[serde(default = "default_skill_level")]
    pub level: SkillLevel,
    #[serde(default)]
    pub years_experience: f64,
    pub description: Option<String>,
}

#[derive(Deserialize)]
pub struct SkillUpdateRequest {
    pub level: Option<SkillLevel>,
    pub years_experience: Option<f64>,
    pub description: Option<String>,
}

/// POST /api/v1/career/skills
/// Skill names are unique per user, compared case-sensitively.
pub async fn handle_add_skill(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<SkillCreateRequest>,
) -> Result<Json<UserSkillRow>, AppError> {
    let existing: Option<Uuid> =
        sqlx::query_scalar("SELECT id FROM user_skills WHERE user_id = $1 AND skill_name = $2")
            .bind(user.id)
            .bind(&req.skill_name)
            .fetch_optional(&state.db)
            .await?;

    if existing.is_some() {
        return Err(AppError::Conflict(format!(
            "Skill '{}' already exists",
            req.skill_name
        )));
    }

    let skill: UserSkillRow = sqlx::query_as(
        r#"
        INSERT INTO user_skills (user_id, skill_name, level, years_experience, description)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(user.id)
    .bind(&req.skill_name)
    .bind(req.level)
    .bind(req.years_experience)
    .bind(&req.description)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(skill))
}

/// GET /api/v1/career/skills
pub async fn handle_list_skills(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<UserSkillRow>>, AppError> {
    let skills: Vec<UserSkillRow> =
        sqlx::query_as("SELECT * FROM user_skills WHERE user_id = $1")
            .bind(user.id)
            .fetch_all(&state.db)
            .await?;

    Ok(Json(skills))
}

/// PUT /api/v1/career/skills/:id
/// Partial update; any touch of a skill also stamps `last_used`.
pub async fn handle_update_skill(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Json(req): Json<SkillUpdateRequest>,
) -> Result<Json<UserSkillRow>, AppError> {
    let skill: Option<UserSkillRow> = sqlx::query_as(
        r#"
        UPDATE user_skills
        SET level = COALESCE($1, level),
            years_experience = COALESCE($2, years_experience),
            description = COALESCE($3, description),
            last_used = now(),
            updated_at = now()
        WHERE id = $4 AND user_id = $5
        RETURNING *
        "#,
    )
    .bind(req.level)
    .bind(req.years_experience)
    .bind(&req.description)
    .bind(id)
    .bind(user.id)
    .fetch_optional(&state.db)
    .await?;

    skill
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Skill not found".to_string()))
}

/// DELETE /api/v1/career/skills/:id
pub async fn handle_delete_skill(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let deleted = sqlx::query("DELETE FROM user_skills WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user.id)
        .execute(&state.db)
        .await?;

    if deleted.rows_affected() == 0 {
        return Err(AppError::NotFound("Skill not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
