//! XP leveling, daily streaks, and achievements. Pure mutations over the
//! progress row; the submit handler persists the result in its transaction.

use chrono::{DateTime, Duration, Utc};

use crate::models::assessment::{Achievement, UserProgressRow};

/// XP required to clear the given player level.
pub fn next_level_xp(current_level: i32) -> i32 {
    100 * current_level
}

/// Adds earned XP and levels up while the total clears the threshold. A large
/// award can cascade through several levels in one call.
pub fn apply_xp(progress: &mut UserProgressRow, xp_earned: i32) {
    progress.total_xp += xp_earned;

    while progress.total_xp >= progress.xp_to_next_level {
        progress.current_level += 1;
        progress.total_xp -= progress.xp_to_next_level;
        progress.xp_to_next_level = next_level_xp(progress.current_level);
    }
}

/// Same calendar day leaves the streak alone, the day after the last activity
/// extends it, anything else (including first activity) resets it to 1. The
/// activity timestamp always moves to `now`.
pub fn update_streak(progress: &mut UserProgressRow, now: DateTime<Utc>) {
    let today = now.date_naive();

    match progress.last_activity_date {
        Some(last) => {
            let last_day = last.date_naive();
            if last_day == today {
                // Already active today.
            } else if last_day == today - Duration::days(1) {
                progress.current_streak += 1;
            } else {
                progress.current_streak = 1;
            }
        }
        None => progress.current_streak = 1,
    }

    progress.last_activity_date = Some(now);
    if progress.current_streak > progress.longest_streak {
        progress.longest_streak = progress.current_streak;
    }
}

/// Appends the "first_assessment" achievement on exactly the first completed
/// assessment. `assessments_completed` must already include the submission
/// being processed.
pub fn award_first_assessment(progress: &mut UserProgressRow, now: DateTime<Utc>) {
    if progress.assessments_completed == 1 {
        progress.achievements.0.push(Achievement {
            id: "first_assessment".to_string(),
            name: "First Step".to_string(),
            description: "Complete your first assessment".to_string(),
            earned_at: now,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use sqlx::types::Json;
    use uuid::Uuid;

    fn fresh_progress() -> UserProgressRow {
        UserProgressRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            total_xp: 0,
            current_level: 1,
            xp_to_next_level: 100,
            current_streak: 0,
            longest_streak: 0,
            last_activity_date: None,
            achievements: Json(Vec::new()),
            assessments_completed: 0,
            skills_mastered: 0,
            career_paths_completed: 0,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_apply_xp_below_threshold_does_not_level() {
        let mut p = fresh_progress();
        apply_xp(&mut p, 99);
        assert_eq!(p.current_level, 1);
        assert_eq!(p.total_xp, 99);
        assert_eq!(p.xp_to_next_level, 100);
    }

    #[test]
    fn test_apply_xp_cascades_through_multiple_levels() {
        let mut p = fresh_progress();
        p.total_xp = 250;
        apply_xp(&mut p, 50);
        // 300 clears level 1 (100) to 200, clears level 2 (200) to 0.
        assert_eq!(p.current_level, 3);
        assert_eq!(p.total_xp, 0);
        assert_eq!(p.xp_to_next_level, 300);
        assert!(p.total_xp < p.xp_to_next_level);
    }

    #[test]
    fn test_apply_xp_exact_threshold_levels_once() {
        let mut p = fresh_progress();
        apply_xp(&mut p, 100);
        assert_eq!(p.current_level, 2);
        assert_eq!(p.total_xp, 0);
        assert_eq!(p.xp_to_next_level, 200);
    }

    #[test]
    fn test_first_activity_starts_streak_at_one() {
        let mut p = fresh_progress();
        let now = at(2024, 3, 10, 12);
        update_streak(&mut p, now);
        assert_eq!(p.current_streak, 1);
        assert_eq!(p.longest_streak, 1);
        assert_eq!(p.last_activity_date, Some(now));
    }

    #[test]
    fn test_same_day_activity_leaves_streak_unchanged() {
        let mut p = fresh_progress();
        update_streak(&mut p, at(2024, 3, 10, 9));
        update_streak(&mut p, at(2024, 3, 10, 21));
        assert_eq!(p.current_streak, 1);
        assert_eq!(p.last_activity_date, Some(at(2024, 3, 10, 21)));
    }

    #[test]
    fn test_consecutive_days_increment_streak() {
        let mut p = fresh_progress();
        update_streak(&mut p, at(2024, 3, 10, 12));
        update_streak(&mut p, at(2024, 3, 11, 12));
        update_streak(&mut p, at(2024, 3, 12, 12));
        assert_eq!(p.current_streak, 3);
        assert_eq!(p.longest_streak, 3);
    }

    #[test]
    fn test_gap_of_two_days_resets_streak() {
        let mut p = fresh_progress();
        update_streak(&mut p, at(2024, 3, 10, 12));
        update_streak(&mut p, at(2024, 3, 11, 12));
        update_streak(&mut p, at(2024, 3, 14, 12));
        assert_eq!(p.current_streak, 1);
        assert_eq!(p.longest_streak, 2);
    }

    #[test]
    fn test_first_assessment_achievement_awarded_exactly_once() {
        let mut p = fresh_progress();
        let now = at(2024, 3, 10, 12);

        p.assessments_completed += 1;
        award_first_assessment(&mut p, now);
        assert_eq!(p.achievements.0.len(), 1);
        assert_eq!(p.achievements.0[0].id, "first_assessment");

        p.assessments_completed += 1;
        award_first_assessment(&mut p, now);
        assert_eq!(p.achievements.0.len(), 1);
    }
}
