use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::PgConnection;
use uuid::Uuid;

use crate::assessment::scoring::classify_level;
use crate::auth::CurrentUser;
use crate::errors::AppError;
use crate::models::career::{CareerLevel, CareerProfileRow};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ProfileUpdateRequest {
    pub current_level: Option<CareerLevel>,
    pub target_level: Option<CareerLevel>,
    pub years_total_experience: Option<f64>,
    pub specialization: Option<String>,
    pub primary_profession: Option<String>,
}

/// GET /api/v1/career/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<CareerProfileRow>, AppError> {
    let mut conn = state.db.acquire().await?;
    let profile = get_or_create_profile(&mut conn, user.id).await?;
    Ok(Json(profile))
}

/// PUT /api/v1/career/profile
pub async fn handle_update_profile(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<ProfileUpdateRequest>,
) -> Result<Json<CareerProfileRow>, AppError> {
    let mut conn = state.db.acquire().await?;
    get_or_create_profile(&mut conn, user.id).await?;

    let profile: CareerProfileRow = sqlx::query_as(
        r#"
        UPDATE user_career_profile
        SET current_level = COALESCE($1, current_level),
            target_level = COALESCE($2, target_level),
            years_total_experience = COALESCE($3, years_total_experience),
            specialization = COALESCE($4, specialization),
            primary_profession = COALESCE($5, primary_profession),
            updated_at = now()
        WHERE user_id = $6
        RETURNING *
        "#,
    )
    .bind(req.current_level)
    .bind(req.target_level)
    .bind(req.years_total_experience)
    .bind(&req.specialization)
    .bind(&req.primary_profession)
    .bind(user.id)
    .fetch_one(&mut *conn)
    .await?;

    Ok(Json(profile))
}

#[derive(Deserialize)]
pub struct AssessmentScoreQuery {
    /// 0-100.
    pub score: f64,
}

#[derive(Serialize)]
pub struct AssessmentCompletedResponse {
    pub message: String,
    pub score: f64,
    pub level: CareerLevel,
    pub xp_earned: i32,
}

/// POST /api/v1/career/profile/assessment
///
/// Shortcut that records an externally computed assessment score on the
/// profile. Uses the same level thresholds as the assessment engine but does
/// not touch the gamification counters.
pub async fn handle_complete_assessment(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(params): Query<AssessmentScoreQuery>,
) -> Result<Json<AssessmentCompletedResponse>, AppError> {
    let level = classify_level(params.score);

    let mut conn = state.db.acquire().await?;
    get_or_create_profile(&mut conn, user.id).await?;

    sqlx::query(
        r#"
        UPDATE user_career_profile
        SET current_level = $1, last_assessment_score = $2,
            last_assessment_date = $3, assessment_completed = TRUE, updated_at = now()
        WHERE user_id = $4
        "#,
    )
    .bind(level)
    .bind(params.score)
    .bind(Utc::now())
    .bind(user.id)
    .execute(&mut *conn)
    .await?;

    Ok(Json(AssessmentCompletedResponse {
        message: "Assessment completed".to_string(),
        score: params.score,
        level,
        xp_earned: (params.score * 10.0) as i32,
    }))
}

/// Get-or-create for the per-user career profile singleton: insert-if-absent
/// then re-read (first writer wins).
pub async fn get_or_create_profile(
    conn: &mut PgConnection,
    user_id: Uuid,
) -> Result<CareerProfileRow, sqlx::Error> {
    sqlx::query(
        "INSERT INTO user_career_profile (user_id) VALUES ($1) ON CONFLICT (user_id) DO NOTHING",
    )
    .bind(user_id)
    .execute(&mut *conn)
    .await?;

    sqlx::query_as("SELECT * FROM user_career_profile WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(&mut *conn)
        .await
}
