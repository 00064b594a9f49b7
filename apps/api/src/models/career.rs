use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Proficiency with a single skill, beginner through expert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "skill_level", rename_all = "snake_case")]
pub enum SkillLevel {
    Beginner,
    Elementary,
    Intermediate,
    Advanced,
    Expert,
}

/// Career rank: junior, middle, senior, team_lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "career_level", rename_all = "snake_case")]
pub enum CareerLevel {
    Junior,
    Middle,
    Senior,
    TeamLead,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "career_path_status", rename_all = "snake_case")]
pub enum CareerPathStatus {
    Active,
    Completed,
    Archived,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct UserSkillRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub skill_name: String,
    pub level: SkillLevel,
    pub years_experience: f64,
    pub description: Option<String>,
    pub last_used: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct UserExperienceRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub company: String,
    pub position: String,
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    /// None while the position is still held.
    pub end_date: Option<DateTime<Utc>>,
    pub level_at_position: Option<CareerLevel>,
    pub technologies: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Singleton per user, created lazily on first access.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CareerProfileRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub current_level: CareerLevel,
    pub target_level: Option<CareerLevel>,
    pub years_total_experience: f64,
    pub specialization: Option<String>,
    pub primary_profession: Option<String>,
    pub career_switch_readiness: f64,
    pub assessment_completed: bool,
    pub last_assessment_score: Option<f64>,
    pub last_assessment_date: Option<DateTime<Utc>>,
    pub total_xp: i32,
    pub current_level_xp: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CareerPathRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub from_level: CareerLevel,
    pub to_level: CareerLevel,
    pub plan: String,
    pub milestones: Option<String>,
    pub required_skills: Option<String>,
    pub recommended_projects: Option<String>,
    pub created_by: String,
    pub status: CareerPathStatus,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Append-only audit row, one per job-match analysis.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct JobMatchRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub job_id: String,
    pub job_title: String,
    pub company: String,
    pub match_percentage: i32,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub job_level: Option<CareerLevel>,
    pub level_match: bool,
    pub recommendation: String,
    pub created_at: DateTime<Utc>,
}
