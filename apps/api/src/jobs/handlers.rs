use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::errors::AppError;
use crate::jobs::matching::{match_skills, EmptyRequiredPolicy};
use crate::models::job::{JobPosting, JobStats, SavedJobRow};
use crate::state::AppState;

fn default_location() -> String {
    "Germany".to_string()
}

#[derive(Deserialize)]
pub struct JobSearchRequest {
    pub skills: Vec<String>,
    #[serde(default = "default_location")]
    pub location: String,
    #[serde(default)]
    pub min_match_percentage: i32,
}

#[derive(Deserialize)]
pub struct SaveJobRequest {
    pub job_id: String,
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub required_skills: Vec<String>,
    pub salary_min: Option<i32>,
    pub salary_max: Option<i32>,
    #[serde(default = "default_eur")]
    pub currency: String,
    pub source: Option<String>,
    pub external_url: Option<String>,
}

fn default_eur() -> String {
    "EUR".to_string()
}

/// Scores each posting against the requested skills, drops those below the
/// threshold, and orders by descending match. The sort is stable, so ties keep
/// the provider's original order.
fn annotate_and_rank(
    mut jobs: Vec<JobPosting>,
    skills: &[String],
    min_match_percentage: i32,
) -> Vec<JobPosting> {
    for job in &mut jobs {
        let result = match_skills(skills, &job.required_skills, EmptyRequiredPolicy::NoMatch);
        job.match_percentage = Some(result.percentage);
    }

    jobs.retain(|j| j.match_percentage.unwrap_or(0) >= min_match_percentage);
    jobs.sort_by(|a, b| b.match_percentage.cmp(&a.match_percentage));
    jobs
}

/// POST /api/v1/jobs/search
pub async fn handle_search(
    State(state): State<AppState>,
    _user: CurrentUser,
    Json(req): Json<JobSearchRequest>,
) -> Result<Json<Vec<JobPosting>>, AppError> {
    if req.skills.is_empty() {
        return Err(AppError::Validation(
            "At least one skill is required".to_string(),
        ));
    }

    let jobs = state.job_search.search(&req.skills, &req.location).await?;
    Ok(Json(annotate_and_rank(
        jobs,
        &req.skills,
        req.min_match_percentage,
    )))
}

/// POST /api/v1/jobs/saved
pub async fn handle_save_job(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<SaveJobRequest>,
) -> Result<(StatusCode, Json<SavedJobRow>), AppError> {
    let existing: Option<Uuid> =
        sqlx::query_scalar("SELECT id FROM saved_jobs WHERE user_id = $1 AND job_id = $2")
            .bind(user.id)
            .bind(&req.job_id)
            .fetch_optional(&state.db)
            .await?;

    if existing.is_some() {
        return Err(AppError::Conflict("Job already saved".to_string()));
    }

    // Frozen at save time against the user's flat skill list; never recomputed.
    let result = match_skills(&user.skills, &req.required_skills, EmptyRequiredPolicy::NoMatch);

    let saved: SavedJobRow = sqlx::query_as(
        r#"
        INSERT INTO saved_jobs
            (user_id, job_id, title, company, location, salary_min, salary_max,
             currency, description, required_skills, match_percentage, source, external_url)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
        RETURNING *
        "#,
    )
    .bind(user.id)
    .bind(&req.job_id)
    .bind(&req.title)
    .bind(&req.company)
    .bind(&req.location)
    .bind(req.salary_min)
    .bind(req.salary_max)
    .bind(&req.currency)
    .bind(&req.description)
    .bind(&req.required_skills)
    .bind(result.percentage)
    .bind(&req.source)
    .bind(&req.external_url)
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(saved)))
}

/// GET /api/v1/jobs/saved
pub async fn handle_list_saved(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<SavedJobRow>>, AppError> {
    let jobs: Vec<SavedJobRow> =
        sqlx::query_as("SELECT * FROM saved_jobs WHERE user_id = $1 ORDER BY saved_at DESC")
            .bind(user.id)
            .fetch_all(&state.db)
            .await?;

    Ok(Json(jobs))
}

/// DELETE /api/v1/jobs/saved/:id
pub async fn handle_unsave_job(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let deleted = sqlx::query("DELETE FROM saved_jobs WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user.id)
        .execute(&state.db)
        .await?;

    if deleted.rows_affected() == 0 {
        return Err(AppError::NotFound("Saved job not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
pub struct StatsQuery {
    /// Comma-separated skill list.
    pub skills: String,
    #[serde(default = "default_location")]
    pub location: String,
}

fn parse_skills_param(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// GET /api/v1/jobs/stats
///
/// Skills arrive as one comma-separated `skills` parameter
/// (`?skills=Python,React`), not as repeated `skills=` keys: plain
/// `Query` deserialization does not collect repeated keys into a Vec.
pub async fn handle_stats(
    State(state): State<AppState>,
    _user: CurrentUser,
    Query(params): Query<StatsQuery>,
) -> Result<Json<JobStats>, AppError> {
    let skills = parse_skills_param(&params.skills);

    if skills.is_empty() {
        return Err(AppError::Validation(
            "At least one skill is required".to_string(),
        ));
    }

    let stats = state.job_search.stats(&skills, &params.location).await?;
    Ok(Json(stats))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(id: &str, required: &[&str]) -> JobPosting {
        JobPosting {
            job_id: id.to_string(),
            title: "Engineer".to_string(),
            company: "Acme".to_string(),
            location: None,
            salary_min: None,
            salary_max: None,
            currency: "EUR".to_string(),
            description: None,
            required_skills: required.iter().map(|s| s.to_string()).collect(),
            match_percentage: None,
            source: None,
            external_url: None,
        }
    }

    fn skills(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_rank_sorts_descending_keeping_provider_order_on_ties() {
        let jobs = vec![
            job("low", &["rust", "go", "kafka", "sql"]),
            job("tie_first", &["rust", "go"]),
            job("tie_second", &["rust", "sql"]),
            job("high", &["rust"]),
        ];
        let ranked = annotate_and_rank(jobs, &skills(&["rust"]), 0);
        let ids: Vec<&str> = ranked.iter().map(|j| j.job_id.as_str()).collect();
        assert_eq!(ids, vec!["high", "tie_first", "tie_second", "low"]);
    }

    #[test]
    fn test_rank_filters_below_threshold() {
        let jobs = vec![
            job("keep", &["rust", "go"]),
            job("drop", &["go", "kafka", "sql"]),
        ];
        let ranked = annotate_and_rank(jobs, &skills(&["rust"]), 50);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].job_id, "keep");
        assert_eq!(ranked[0].match_percentage, Some(50));
    }

    #[test]
    fn test_rank_scores_empty_required_as_zero() {
        let jobs = vec![job("empty", &[])];
        let ranked = annotate_and_rank(jobs, &skills(&["rust"]), 0);
        assert_eq!(ranked[0].match_percentage, Some(0));
    }

    #[test]
    fn test_stats_skills_param_is_comma_separated() {
        assert_eq!(
            parse_skills_param("Python, React ,Docker"),
            skills(&["Python", "React", "Docker"])
        );
        assert_eq!(parse_skills_param(",, "), Vec::<String>::new());
    }
}
