use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use uuid::Uuid;

/// A single education record on the user profile. The flat profile keeps these
/// as tagged records rather than free-form JSON; the structured skill and
/// experience ledgers live in their own tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EducationRecord {
    pub school: String,
    pub degree: String,
    pub year: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceRecord {
    pub company: String,
    pub role: String,
    pub years: Option<f64>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub hashed_password: String,
    pub full_name: Option<String>,
    pub skills: Vec<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub education: Json<Vec<EducationRecord>>,
    pub experience: Json<Vec<ExperienceRecord>>,
    pub is_active: bool,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}
