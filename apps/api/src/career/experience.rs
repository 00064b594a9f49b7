use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::errors::AppError;
use crate::models::career::{CareerLevel, UserExperienceRow};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ExperienceCreateRequest {
    pub company: String,
    pub position: String,
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    /// None while the position is still held.
    pub end_date: Option<DateTime<Utc>>,
    pub level_at_position: Option<CareerLevel>,
    pub technologies: Option<String>,
}

#[derive(Deserialize)]
pub struct ExperienceUpdateRequest {
    pub company: Option<String>,
    pub position: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub level_at_position: Option<CareerLevel>,
    pub technologies: Option<String>,
}

/// POST /api/v1/career/experience
pub async fn handle_add_experience(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<ExperienceCreateRequest>,
) -> Result<Json<UserExperienceRow>, AppError> {
    let experience: UserExperienceRow = sqlx::query_as(
        r#"
        INSERT INTO user_experience
            (user_id, company, position, description, start_date, end_date,
             level_at_position, technologies)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(user.id)
    .bind(&req.company)
    .bind(&req.position)
    .bind(&req.description)
    .bind(req.start_date)
    .bind(req.end_date)
    .bind(req.level_at_position)
    .bind(&req.technologies)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(experience))
}

/// GET /api/v1/career/experience
pub async fn handle_list_experience(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<UserExperienceRow>>, AppError> {
    let experience: Vec<UserExperienceRow> = sqlx::query_as(
        "SELECT * FROM user_experience WHERE user_id = $1 ORDER BY start_date DESC",
    )
    .bind(user.id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(experience))
}

/// PUT /api/v1/career/experience/:id
pub async fn handle_update_experience(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Json(req): Json<ExperienceUpdateRequest>,
) -> Result<Json<UserExperienceRow>, AppError> {
    let experience: Option<UserExperienceRow> = sqlx::query_as(
        r#"
        UPDATE user_experience
        SET company = COALESCE($1, company),
            position = COALESCE($2, position),
            description = COALESCE($3, description),
            start_date = COALESCE($4, start_date),
            end_date = COALESCE($5, end_date),
            level_at_position = COALESCE($6, level_at_position),
            technologies = COALESCE($7, technologies),
            updated_at = now()
        WHERE id = $8 AND user_id = $9
        RETURNING *
        "#,
    )
    .bind(&req.company)
    .bind(&req.position)
    .bind(&req.description)
    .bind(req.start_date)
    .bind(req.end_date)
    .bind(req.level_at_position)
    .bind(&req.technologies)
    .bind(id)
    .bind(user.id)
    .fetch_optional(&state.db)
    .await?;

    experience
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Experience not found".to_string()))
}

/// DELETE /api/v1/career/experience/:id
pub async fn handle_delete_experience(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let deleted = sqlx::query("DELETE FROM user_experience WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user.id)
        .execute(&state.db)
        .await?;

    if deleted.rows_affected() == 0 {
        return Err(AppError::NotFound("Experience not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
