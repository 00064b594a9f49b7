use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::errors::AppError;
use crate::models::career::{CareerLevel, CareerPathRow, CareerPathStatus};
use crate::state::AppState;

fn default_created_by() -> String {
    "ai".to_string()
}

#[derive(Deserialize)]
pub struct CareerPathCreateRequest {
    pub from_level: CareerLevel,
    pub to_level: CareerLevel,
    #[serde(default)]
    pub plan: String,
    pub milestones: Option<String>,
    pub required_skills: Option<String>,
    pub recommended_projects: Option<String>,
    #[serde(default = "default_created_by")]
    pub created_by: String,
}

#[derive(Deserialize)]
pub struct CareerPathUpdateRequest {
    pub plan: Option<String>,
    pub status: Option<CareerPathStatus>,
    /// Caller supplies the version; there is no automatic increment.
    pub version: Option<i32>,
}

/// GET /api/v1/career/paths
pub async fn handle_list_paths(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<CareerPathRow>>, AppError> {
    let paths: Vec<CareerPathRow> =
        sqlx::query_as("SELECT * FROM career_paths WHERE user_id = $1 AND status = 'active'")
            .bind(user.id)
            .fetch_all(&state.db)
            .await?;

    Ok(Json(paths))
}

/// POST /api/v1/career/paths
/// At most one active plan per (from_level, to_level) transition.
pub async fn handle_create_path(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<CareerPathCreateRequest>,
) -> Result<Json<CareerPathRow>, AppError> {
    let existing: Option<Uuid> = sqlx::query_scalar(
        r#"
        SELECT id FROM career_paths
        WHERE user_id = $1 AND from_level = $2 AND to_level = $3 AND status = 'active'
        "#,
    )
    .bind(user.id)
    .bind(req.from_level)
    .bind(req.to_level)
    .fetch_optional(&state.db)
    .await?;

    if existing.is_some() {
        return Err(AppError::Conflict(
            "Career path already exists for this transition".to_string(),
        ));
    }

    let path: CareerPathRow = sqlx::query_as(
        r#"
        INSERT INTO career_paths
            (user_id, from_level, to_level, plan, milestones, required_skills,
             recommended_projects, created_by)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(user.id)
    .bind(req.from_level)
    .bind(req.to_level)
    .bind(&req.plan)
    .bind(&req.milestones)
    .bind(&req.required_skills)
    .bind(&req.recommended_projects)
    .bind(&req.created_by)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(path))
}

/// GET /api/v1/career/paths/:id
pub async fn handle_get_path(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<CareerPathRow>, AppError> {
    let path: Option<CareerPathRow> =
        sqlx::query_as("SELECT * FROM career_paths WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user.id)
            .fetch_optional(&state.db)
            .await?;

    path.map(Json)
        .ok_or_else(|| AppError::NotFound("Career path not found".to_string()))
}

/// PUT /api/v1/career/paths/:id
pub async fn handle_update_path(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Json(req): Json<CareerPathUpdateRequest>,
) -> Result<Json<CareerPathRow>, AppError> {
    let path: Option<CareerPathRow> = sqlx::query_as(
        r#"
        UPDATE career_paths
        SET plan = COALESCE($1, plan),
            status = COALESCE($2, status),
            version = COALESCE($3, version),
            updated_at = now()
        WHERE id = $4 AND user_id = $5
        RETURNING *
        "#,
    )
    .bind(&req.plan)
    .bind(req.status)
    .bind(req.version)
    .bind(id)
    .bind(user.id)
    .fetch_optional(&state.db)
    .await?;

    path.map(Json)
        .ok_or_else(|| AppError::NotFound("Career path not found".to_string()))
}
