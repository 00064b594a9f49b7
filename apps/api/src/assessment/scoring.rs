//! Submission grading: one pass from raw answers to a scored, classified,
//! recommendation-carrying outcome. Pure functions, no IO.

use serde::Deserialize;
use uuid::Uuid;

use crate::models::assessment::{AssessmentQuestionRow, QuestionDetail};
use crate::models::career::CareerLevel;

#[derive(Debug, Clone, Deserialize)]
pub struct AnswerSubmission {
    pub question_id: Uuid,
    /// Option id: "a", "b", "c", "d".
    pub user_answer: String,
}

/// Everything derived from one graded submission.
#[derive(Debug, Clone)]
pub struct GradedAssessment {
    pub total_questions: i32,
    pub correct_answers: i32,
    /// 0-100, rounded to two decimals.
    pub score: f64,
    pub level: CareerLevel,
    pub details: Vec<QuestionDetail>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub recommendations: String,
    /// floor(score * 10), so 0-1000.
    pub xp_earned: i32,
}

/// Grades a submission against the question bank rows that matched its ids.
/// Answers referencing unknown questions are silently skipped, and only the
/// first answer per question counts, so earned points never exceed
/// `max_possible_points` and the score stays within 0-100. A submission with
/// zero matched questions grades to score 0, level junior.
pub fn grade(questions: &[AssessmentQuestionRow], answers: &[AnswerSubmission]) -> GradedAssessment {
    let max_possible_points: i32 = questions.iter().map(|q| q.max_points).sum();

    let mut correct_answers = 0;
    let mut total_points = 0;
    let mut details = Vec::new();
    let mut graded_ids: Vec<Uuid> = Vec::new();
    // (category, correct, total) in first-seen order so reports are stable.
    let mut category_scores: Vec<(String, i32, i32)> = Vec::new();

    for answer in answers {
        let Some(question) = questions.iter().find(|q| q.id == answer.question_id) else {
            continue;
        };
        if graded_ids.contains(&question.id) {
            continue;
        }
        graded_ids.push(question.id);

        let is_correct = answer.user_answer == question.correct_answer;
        let points = if is_correct { question.max_points } else { 0 };

        if is_correct {
            correct_answers += 1;
        }
        total_points += points;

        match category_scores
            .iter_mut()
            .find(|(c, _, _)| *c == question.category)
        {
            Some((_, correct, total)) => {
                *total += 1;
                if is_correct {
                    *correct += 1;
                }
            }
            None => category_scores.push((
                question.category.clone(),
                if is_correct { 1 } else { 0 },
                1,
            )),
        }

        details.push(QuestionDetail {
            question_id: question.id,
            category: question.category.clone(),
            user_answer: answer.user_answer.clone(),
            correct_answer: question.correct_answer.clone(),
            is_correct,
            points,
        });
    }

    let score = if max_possible_points > 0 {
        let raw = total_points as f64 / max_possible_points as f64 * 100.0;
        (raw * 100.0).round() / 100.0
    } else {
        0.0
    };

    let level = classify_level(score);

    let mut strengths = Vec::new();
    let mut weaknesses = Vec::new();
    for (category, correct, total) in &category_scores {
        let percentage = *correct as f64 / *total as f64 * 100.0;
        if percentage >= 70.0 {
            strengths.push(category.clone());
        } else if percentage < 50.0 {
            weaknesses.push(category.clone());
        }
        // 50-70% is neutral: reported in neither list.
    }

    let recommendations = build_recommendations(level, &weaknesses);
    let xp_earned = (score * 10.0) as i32;

    GradedAssessment {
        total_questions: questions.len() as i32,
        correct_answers,
        score,
        level,
        details,
        strengths,
        weaknesses,
        recommendations,
        xp_earned,
    }
}

/// Closed-open boundaries: a score of exactly 30 is middle, 60 senior,
/// 85 team_lead.
pub fn classify_level(score: f64) -> CareerLevel {
    if score < 30.0 {
        CareerLevel::Junior
    } else if score < 60.0 {
        CareerLevel::Middle
    } else if score < 85.0 {
        CareerLevel::Senior
    } else {
        CareerLevel::TeamLead
    }
}

/// Fixed per-level advice, with weak categories appended when any exist.
pub fn build_recommendations(level: CareerLevel, weaknesses: &[String]) -> String {
    let mut parts: Vec<String> = match level {
        CareerLevel::Junior => vec![
            "Focus on building strong fundamentals in programming.".to_string(),
            "Practice coding challenges daily on platforms like LeetCode.".to_string(),
        ],
        CareerLevel::Middle => vec![
            "Work on system design and architecture patterns.".to_string(),
            "Contribute to open-source projects to gain experience.".to_string(),
        ],
        CareerLevel::Senior => vec![
            "Develop leadership and mentoring skills.".to_string(),
            "Focus on strategic thinking and technical decision-making.".to_string(),
        ],
        CareerLevel::TeamLead => vec![
            "Enhance team management and project planning skills.".to_string(),
            "Focus on cross-functional collaboration and stakeholder management.".to_string(),
        ],
    };

    if !weaknesses.is_empty() {
        parts.push(format!("Areas to improve: {}", weaknesses.join(", ")));
    }

    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assessment::{AssessmentType, QuestionDifficulty, QuestionOption};
    use chrono::Utc;
    use sqlx::types::Json;

    fn question(category: &str, correct: &str, max_points: i32) -> AssessmentQuestionRow {
        AssessmentQuestionRow {
            id: Uuid::new_v4(),
            assessment_type: AssessmentType::Technical,
            category: category.to_string(),
            question_text: "?".to_string(),
            difficulty: QuestionDifficulty::Junior,
            options: Json(vec![
                QuestionOption { id: "a".to_string(), text: "A".to_string(), points: max_points },
                QuestionOption { id: "b".to_string(), text: "B".to_string(), points: 0 },
            ]),
            correct_answer: correct.to_string(),
            max_points,
            explanation: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    fn answer(q: &AssessmentQuestionRow, choice: &str) -> AnswerSubmission {
        AnswerSubmission {
            question_id: q.id,
            user_answer: choice.to_string(),
        }
    }

    #[test]
    fn test_perfect_submission_scores_100() {
        let questions = vec![question("Programming", "a", 10), question("DevOps", "a", 10)];
        let answers: Vec<_> = questions.iter().map(|q| answer(q, "a")).collect();

        let graded = grade(&questions, &answers);
        assert_eq!(graded.score, 100.0);
        assert_eq!(graded.correct_answers, 2);
        assert_eq!(graded.level, CareerLevel::TeamLead);
        assert_eq!(graded.xp_earned, 1000);
    }

    #[test]
    fn test_zero_matched_questions_grades_to_junior_zero() {
        let answers = vec![AnswerSubmission {
            question_id: Uuid::new_v4(),
            user_answer: "a".to_string(),
        }];
        let graded = grade(&[], &answers);
        assert_eq!(graded.score, 0.0);
        assert_eq!(graded.level, CareerLevel::Junior);
        assert_eq!(graded.xp_earned, 0);
        assert!(graded.details.is_empty());
    }

    #[test]
    fn test_unknown_question_ids_are_silently_skipped() {
        let questions = vec![question("Programming", "a", 10)];
        let mut answers = vec![answer(&questions[0], "a")];
        answers.push(AnswerSubmission {
            question_id: Uuid::new_v4(),
            user_answer: "b".to_string(),
        });

        let graded = grade(&questions, &answers);
        assert_eq!(graded.details.len(), 1);
        assert_eq!(graded.score, 100.0);
    }

    #[test]
    fn test_duplicate_answers_count_once() {
        // The same question answered correctly twice must not push the score
        // past 100; only the first answer per question is graded.
        let questions = vec![question("Programming", "a", 10)];
        let answers = vec![answer(&questions[0], "a"), answer(&questions[0], "a")];

        let graded = grade(&questions, &answers);
        assert_eq!(graded.score, 100.0);
        assert_eq!(graded.correct_answers, 1);
        assert_eq!(graded.xp_earned, 1000);
        assert_eq!(graded.details.len(), 1);
    }

    #[test]
    fn test_duplicate_answer_first_occurrence_wins() {
        let questions = vec![question("Programming", "a", 10), question("DevOps", "a", 10)];
        // Wrong first, then a correct retry of the same question: the retry
        // is ignored, so only the DevOps answer scores.
        let answers = vec![
            answer(&questions[0], "b"),
            answer(&questions[0], "a"),
            answer(&questions[1], "a"),
        ];

        let graded = grade(&questions, &answers);
        assert_eq!(graded.score, 50.0);
        assert_eq!(graded.correct_answers, 1);
        assert_eq!(graded.details.len(), 2);
        assert!(!graded.details[0].is_correct);
    }

    #[test]
    fn test_classification_boundaries_are_closed_open() {
        assert_eq!(classify_level(0.0), CareerLevel::Junior);
        assert_eq!(classify_level(29.99), CareerLevel::Junior);
        assert_eq!(classify_level(30.0), CareerLevel::Middle);
        assert_eq!(classify_level(59.99), CareerLevel::Middle);
        assert_eq!(classify_level(60.0), CareerLevel::Senior);
        assert_eq!(classify_level(84.99), CareerLevel::Senior);
        assert_eq!(classify_level(85.0), CareerLevel::TeamLead);
        assert_eq!(classify_level(100.0), CareerLevel::TeamLead);
    }

    #[test]
    fn test_category_strength_and_weakness_thresholds() {
        // Programming: 3/4 = 75% -> strength.
        // DevOps: 1/2 = 50% -> neutral, in neither list.
        // Testing: 0/2 = 0% -> weakness.
        let programming: Vec<_> = (0..4).map(|_| question("Programming", "a", 10)).collect();
        let devops: Vec<_> = (0..2).map(|_| question("DevOps", "a", 10)).collect();
        let testing: Vec<_> = (0..2).map(|_| question("Testing", "a", 10)).collect();

        let mut questions = Vec::new();
        questions.extend(programming.clone());
        questions.extend(devops.clone());
        questions.extend(testing.clone());

        let mut answers = Vec::new();
        answers.push(answer(&programming[0], "a"));
        answers.push(answer(&programming[1], "a"));
        answers.push(answer(&programming[2], "a"));
        answers.push(answer(&programming[3], "b"));
        answers.push(answer(&devops[0], "a"));
        answers.push(answer(&devops[1], "b"));
        answers.push(answer(&testing[0], "b"));
        answers.push(answer(&testing[1], "b"));

        let graded = grade(&questions, &answers);
        assert_eq!(graded.strengths, vec!["Programming".to_string()]);
        assert_eq!(graded.weaknesses, vec!["Testing".to_string()]);
    }

    #[test]
    fn test_recommendations_name_weak_categories() {
        let text = build_recommendations(
            CareerLevel::Middle,
            &["System Design".to_string(), "Testing".to_string()],
        );
        assert!(text.contains("system design and architecture"));
        assert!(text.contains("Areas to improve: System Design, Testing"));
    }

    #[test]
    fn test_recommendations_omit_clause_without_weaknesses() {
        let text = build_recommendations(CareerLevel::Senior, &[]);
        assert!(!text.contains("Areas to improve"));
    }

    #[test]
    fn test_xp_is_floor_of_score_times_ten() {
        // 2 of 3 questions: score 66.67, xp floor(666.7) = 666.
        let questions = vec![
            question("Programming", "a", 10),
            question("Programming", "a", 10),
            question("Programming", "a", 10),
        ];
        let answers = vec![
            answer(&questions[0], "a"),
            answer(&questions[1], "a"),
            answer(&questions[2], "b"),
        ];
        let graded = grade(&questions, &answers);
        assert_eq!(graded.score, 66.67);
        assert_eq!(graded.xp_earned, 666);
    }
}
