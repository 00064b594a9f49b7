use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use uuid::Uuid;

use crate::models::career::CareerLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "assessment_type", rename_all = "snake_case")]
pub enum AssessmentType {
    Technical,
    SoftSkills,
    Leadership,
    General,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "question_difficulty", rename_all = "snake_case")]
pub enum QuestionDifficulty {
    Junior,
    Middle,
    Senior,
    Expert,
}

/// One selectable answer. Point values must never reach clients before
/// submission; the listing view strips them via `QuestionOptionView`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionOption {
    pub id: String,
    pub text: String,
    pub points: i32,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct AssessmentQuestionRow {
    pub id: Uuid,
    pub assessment_type: AssessmentType,
    pub category: String,
    pub question_text: String,
    pub difficulty: QuestionDifficulty,
    pub options: Json<Vec<QuestionOption>>,
    pub correct_answer: String,
    pub max_points: i32,
    pub explanation: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Client-facing option: text only, no point value.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionOptionView {
    pub id: String,
    pub text: String,
}

/// Client-facing question: no correct answer, no points.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionView {
    pub id: Uuid,
    pub assessment_type: AssessmentType,
    pub category: String,
    pub question_text: String,
    pub difficulty: QuestionDifficulty,
    pub options: Vec<QuestionOptionView>,
}

impl From<AssessmentQuestionRow> for QuestionView {
    fn from(row: AssessmentQuestionRow) -> Self {
        QuestionView {
            id: row.id,
            assessment_type: row.assessment_type,
            category: row.category,
            question_text: row.question_text,
            difficulty: row.difficulty,
            options: row
                .options
                .0
                .into_iter()
                .map(|o| QuestionOptionView {
                    id: o.id,
                    text: o.text,
                })
                .collect(),
        }
    }
}

/// Per-question grading detail stored on the result row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionDetail {
    pub question_id: Uuid,
    pub category: String,
    pub user_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
    pub points: i32,
}

/// Immutable record of one completed submission.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct AssessmentResultRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub assessment_type: AssessmentType,
    pub total_questions: i32,
    pub correct_answers: i32,
    pub total_score: f64,
    pub determined_level: CareerLevel,
    pub detailed_results: Json<Vec<QuestionDetail>>,
    pub recommendations: Option<String>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub time_taken_seconds: Option<i32>,
    pub xp_earned: i32,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub name: String,
    pub description: String,
    pub earned_at: DateTime<Utc>,
}

/// Gamification singleton per user, created lazily on first access.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct UserProgressRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub total_xp: i32,
    pub current_level: i32,
    pub xp_to_next_level: i32,
    pub current_streak: i32,
    pub longest_streak: i32,
    pub last_activity_date: Option<DateTime<Utc>>,
    pub achievements: Json<Vec<Achievement>>,
    pub assessments_completed: i32,
    pub skills_mastered: i32,
    pub career_paths_completed: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}
