use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use sqlx::types::Json as SqlJson;
use sqlx::PgConnection;
use tracing::info;
use uuid::Uuid;

use crate::assessment::progress::{apply_xp, award_first_assessment, update_streak};
use crate::assessment::scoring::{grade, AnswerSubmission};
use crate::auth::CurrentUser;
use crate::errors::AppError;
use crate::models::assessment::{
    AssessmentQuestionRow, AssessmentResultRow, AssessmentType, QuestionView, UserProgressRow,
};
use crate::state::AppState;

fn default_assessment_type() -> AssessmentType {
    AssessmentType::General
}

#[derive(Deserialize)]
pub struct QuestionsQuery {
    #[serde(default = "default_assessment_type")]
    pub assessment_type: AssessmentType,
}

#[derive(Deserialize)]
pub struct SubmissionRequest {
    pub assessment_type: AssessmentType,
    pub answers: Vec<AnswerSubmission>,
    pub time_taken_seconds: Option<i32>,
}

/// GET /api/v1/assessment/questions
/// Correct answers and option point values never leave the server here;
/// `QuestionView` strips them.
pub async fn handle_get_questions(
    State(state): State<AppState>,
    _user: CurrentUser,
    Query(params): Query<QuestionsQuery>,
) -> Result<Json<Vec<QuestionView>>, AppError> {
    let questions: Vec<AssessmentQuestionRow> = sqlx::query_as(
        "SELECT * FROM assessment_questions WHERE assessment_type = $1 AND is_active",
    )
    .bind(params.assessment_type)
    .fetch_all(&state.db)
    .await?;

    if questions.is_empty() {
        return Err(AppError::NotFound("No questions found".to_string()));
    }

    Ok(Json(questions.into_iter().map(QuestionView::from).collect()))
}

/// POST /api/v1/assessment/submit
///
/// Grades the submission, updates the gamification counters, syncs the career
/// profile when one exists, and appends the immutable result row. Everything
/// after grading runs in one transaction.
pub async fn handle_submit(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<SubmissionRequest>,
) -> Result<Json<AssessmentResultRow>, AppError> {
    let question_ids: Vec<Uuid> = req.answers.iter().map(|a| a.question_id).collect();
    let questions: Vec<AssessmentQuestionRow> =
        sqlx::query_as("SELECT * FROM assessment_questions WHERE id = ANY($1)")
            .bind(&question_ids)
            .fetch_all(&state.db)
            .await?;

    let graded = grade(&questions, &req.answers);
    let now = Utc::now();

    let mut tx = state.db.begin().await?;

    let mut progress = get_or_create_progress(&mut *tx, user.id).await?;
    progress.assessments_completed += 1;
    apply_xp(&mut progress, graded.xp_earned);
    update_streak(&mut progress, now);
    award_first_assessment(&mut progress, now);

    sqlx::query(
        r#"
        UPDATE user_progress
        SET total_xp = $1, current_level = $2, xp_to_next_level = $3,
            current_streak = $4, longest_streak = $5, last_activity_date = $6,
            achievements = $7, assessments_completed = $8, updated_at = now()
        WHERE user_id = $9
        "#,
    )
    .bind(progress.total_xp)
    .bind(progress.current_level)
    .bind(progress.xp_to_next_level)
    .bind(progress.current_streak)
    .bind(progress.longest_streak)
    .bind(progress.last_activity_date)
    .bind(&progress.achievements)
    .bind(progress.assessments_completed)
    .bind(user.id)
    .execute(&mut *tx)
    .await?;

    // The career profile is only synced when it already exists; submitting an
    // assessment does not create one.
    sqlx::query(
        r#"
        UPDATE user_career_profile
        SET current_level = $1, last_assessment_score = $2,
            last_assessment_date = $3, assessment_completed = TRUE, updated_at = now()
        WHERE user_id = $4
        "#,
    )
    .bind(graded.level)
    .bind(graded.score)
    .bind(now)
    .bind(user.id)
    .execute(&mut *tx)
    .await?;

    let result: AssessmentResultRow = sqlx::query_as(
        r#"
        INSERT INTO assessment_results
            (user_id, assessment_type, total_questions, correct_answers, total_score,
             determined_level, detailed_results, recommendations, strengths, weaknesses,
             time_taken_seconds, xp_earned)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        RETURNING *
        "#,
    )
    .bind(user.id)
    .bind(req.assessment_type)
    .bind(graded.total_questions)
    .bind(graded.correct_answers)
    .bind(graded.score)
    .bind(graded.level)
    .bind(SqlJson(&graded.details))
    .bind(&graded.recommendations)
    .bind(&graded.strengths)
    .bind(&graded.weaknesses)
    .bind(req.time_taken_seconds)
    .bind(graded.xp_earned)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    info!(
        "User {} scored {:.2} ({:?}) and earned {} XP",
        user.id, graded.score, graded.level, graded.xp_earned
    );

    Ok(Json(result))
}

/// GET /api/v1/assessment/results
pub async fn handle_get_results(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<AssessmentResultRow>>, AppError> {
    let results: Vec<AssessmentResultRow> = sqlx::query_as(
        "SELECT * FROM assessment_results WHERE user_id = $1 ORDER BY completed_at DESC",
    )
    .bind(user.id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(results))
}

/// GET /api/v1/assessment/progress
pub async fn handle_get_progress(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<UserProgressRow>, AppError> {
    let mut conn = state.db.acquire().await?;
    let progress = get_or_create_progress(&mut conn, user.id).await?;
    Ok(Json(progress))
}

/// Get-or-create for the per-user progress singleton: insert-if-absent then
/// re-read, so concurrent first reads converge on one row (first writer wins).
async fn get_or_create_progress(
    conn: &mut PgConnection,
    user_id: Uuid,
) -> Result<UserProgressRow, sqlx::Error> {
    sqlx::query("INSERT INTO user_progress (user_id) VALUES ($1) ON CONFLICT (user_id) DO NOTHING")
        .bind(user_id)
        .execute(&mut *conn)
        .await?;

    sqlx::query_as("SELECT * FROM user_progress WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(&mut *conn)
        .await
}
