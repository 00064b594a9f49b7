use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

fn default_currency() -> String {
    "EUR".to_string()
}

/// A candidate posting as returned by the job search provider. The match
/// percentage is filled in by the search handler, not the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPosting {
    pub job_id: String,
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub salary_min: Option<i32>,
    pub salary_max: Option<i32>,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub description: Option<String>,
    #[serde(default)]
    pub required_skills: Vec<String>,
    pub match_percentage: Option<i32>,
    pub source: Option<String>,
    pub external_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct SavedJobRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub job_id: String,
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub salary_min: Option<i32>,
    pub salary_max: Option<i32>,
    pub currency: String,
    pub description: Option<String>,
    pub required_skills: Vec<String>,
    /// Frozen at save time; never recomputed.
    pub match_percentage: i32,
    pub source: Option<String>,
    pub external_url: Option<String>,
    pub saved_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillDemand {
    pub skill: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleDemand {
    pub role: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationDemand {
    pub location: String,
    pub count: i64,
}

/// Aggregate market statistics for a skill set and location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobStats {
    pub total_jobs: i64,
    pub avg_salary: Option<f64>,
    pub top_skills: Vec<SkillDemand>,
    pub top_roles: Vec<RoleDemand>,
    pub locations: Vec<LocationDemand>,
}
