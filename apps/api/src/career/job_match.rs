use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::auth::CurrentUser;
use crate::errors::AppError;
use crate::jobs::matching::{match_skills, recommend, EmptyRequiredPolicy, SkillMatch};
use crate::models::career::{CareerLevel, JobMatchRow};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct JobMatchRequest {
    #[serde(default)]
    pub job_id: String,
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub required_skills: Vec<String>,
    pub job_level: Option<CareerLevel>,
}

#[derive(Serialize)]
pub struct JobMatchReport {
    pub match_percentage: i32,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub recommendation: &'static str,
    pub suggestions: String,
}

fn build_suggestions(result: &SkillMatch) -> String {
    if result.missing.is_empty() {
        "You're ready to apply!".to_string()
    } else {
        format!("You need to learn: {}", result.missing.join(", "))
    }
}

/// POST /api/v1/career/job-match
///
/// Scores against the structured skill ledger, not the flat profile skill
/// list. An empty required-skills list counts as a vacuous full match here,
/// unlike the search and save paths.
pub async fn handle_analyze_job_match(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<JobMatchRequest>,
) -> Result<Json<JobMatchReport>, AppError> {
    let user_skills: Vec<String> =
        sqlx::query_scalar("SELECT skill_name FROM user_skills WHERE user_id = $1")
            .bind(user.id)
            .fetch_all(&state.db)
            .await?;

    let result = match_skills(
        &user_skills,
        &req.required_skills,
        EmptyRequiredPolicy::FullMatch,
    );
    let recommendation = recommend(result.percentage);

    sqlx::query(
        r#"
        INSERT INTO job_match_results
            (user_id, job_id, job_title, company, match_percentage,
             matched_skills, missing_skills, job_level, recommendation)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        "#,
    )
    .bind(user.id)
    .bind(&req.job_id)
    .bind(&req.job_title)
    .bind(&req.company)
    .bind(result.percentage)
    .bind(&result.matched)
    .bind(&result.missing)
    .bind(req.job_level)
    .bind(recommendation.as_str())
    .execute(&state.db)
    .await?;

    let suggestions = build_suggestions(&result);
    Ok(Json(JobMatchReport {
        match_percentage: result.percentage,
        matched_skills: result.matched,
        missing_skills: result.missing,
        recommendation: recommendation.as_str(),
        suggestions,
    }))
}

/// GET /api/v1/career/job-matches
pub async fn handle_list_job_matches(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<JobMatchRow>>, AppError> {
    let matches: Vec<JobMatchRow> = sqlx::query_as(
        "SELECT * FROM job_match_results WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user.id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(matches))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggestions_list_missing_skills() {
        let result = SkillMatch {
            percentage: 33,
            matched: vec!["python".to_string()],
            missing: vec!["django".to_string(), "aws".to_string()],
        };
        assert_eq!(build_suggestions(&result), "You need to learn: django, aws");
    }

    #[test]
    fn test_suggestions_positive_when_nothing_missing() {
        let result = SkillMatch {
            percentage: 100,
            matched: vec!["python".to_string()],
            missing: vec![],
        };
        assert_eq!(build_suggestions(&result), "You're ready to apply!");
    }
}
