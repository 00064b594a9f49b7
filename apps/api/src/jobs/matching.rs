//! Skill-match scoring shared by job search, saved jobs, and the job-match
//! analyzer. Pure functions, no IO.

/// How an empty required-skills list scores.
///
/// Job search and saved jobs treat it as "nothing to match" (0%); the
/// job-match analyzer treats it as a vacuous full match (100%). The two paths
/// diverged in the original product and clients depend on both behaviors, so
/// the divergence is kept explicit here instead of being unified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyRequiredPolicy {
    NoMatch,
    FullMatch,
}

/// Result of comparing a user skill set against a job's required skills.
/// `matched` and `missing` keep the order of the required-skills input,
/// lowercased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillMatch {
    pub percentage: i32,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

/// Compares case-insensitively and rounds the percentage to the nearest
/// integer.
pub fn match_skills(
    user_skills: &[String],
    required_skills: &[String],
    empty_policy: EmptyRequiredPolicy,
) -> SkillMatch {
    let user_lower: Vec<String> = user_skills.iter().map(|s| s.to_lowercase()).collect();

    let mut matched = Vec::new();
    let mut missing = Vec::new();
    for skill in required_skills {
        let lower = skill.to_lowercase();
        if user_lower.contains(&lower) {
            matched.push(lower);
        } else {
            missing.push(lower);
        }
    }

    let percentage = if required_skills.is_empty() {
        match empty_policy {
            EmptyRequiredPolicy::NoMatch => 0,
            EmptyRequiredPolicy::FullMatch => 100,
        }
    } else {
        (100.0 * matched.len() as f64 / required_skills.len() as f64).round() as i32
    };

    SkillMatch {
        percentage,
        matched,
        missing,
    }
}

/// Apply/prepare/skip tier used by the job-match analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendation {
    Apply,
    Prepare,
    Skip,
}

impl Recommendation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::Apply => "apply",
            Recommendation::Prepare => "prepare",
            Recommendation::Skip => "skip",
        }
    }
}

pub fn recommend(match_percentage: i32) -> Recommendation {
    if match_percentage >= 80 {
        Recommendation::Apply
    } else if match_percentage >= 60 {
        Recommendation::Prepare
    } else {
        Recommendation::Skip
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let result = match_skills(
            &skills(&["python", "docker"]),
            &skills(&["Python", "Django", "AWS"]),
            EmptyRequiredPolicy::NoMatch,
        );
        assert_eq!(result.matched, skills(&["python"]));
        assert_eq!(result.missing, skills(&["django", "aws"]));
        assert_eq!(result.percentage, 33);
    }

    #[test]
    fn test_percentage_always_within_bounds() {
        let user = skills(&["a", "b", "c"]);
        let required = skills(&["a", "b", "c", "d", "e", "f", "g"]);
        let result = match_skills(&user, &required, EmptyRequiredPolicy::NoMatch);
        assert!((0..=100).contains(&result.percentage));

        let full = match_skills(&user, &skills(&["a", "b"]), EmptyRequiredPolicy::NoMatch);
        assert_eq!(full.percentage, 100);
    }

    #[test]
    fn test_empty_required_diverges_by_policy() {
        // Search/save path reports 0 for an empty required list; the analyzer
        // reports 100. Both behaviors are load-bearing.
        let user = skills(&["python"]);
        let none = match_skills(&user, &[], EmptyRequiredPolicy::NoMatch);
        let full = match_skills(&user, &[], EmptyRequiredPolicy::FullMatch);
        assert_eq!(none.percentage, 0);
        assert_eq!(full.percentage, 100);
        assert!(none.matched.is_empty() && none.missing.is_empty());
        assert!(full.matched.is_empty() && full.missing.is_empty());
    }

    #[test]
    fn test_matched_and_missing_preserve_required_order() {
        let result = match_skills(
            &skills(&["rust", "sql"]),
            &skills(&["Go", "Rust", "Kafka", "SQL"]),
            EmptyRequiredPolicy::NoMatch,
        );
        assert_eq!(result.matched, skills(&["rust", "sql"]));
        assert_eq!(result.missing, skills(&["go", "kafka"]));
    }

    #[test]
    fn test_percentage_rounds_to_nearest() {
        // 2 of 3 = 66.67 -> 67
        let result = match_skills(
            &skills(&["a", "b"]),
            &skills(&["a", "b", "c"]),
            EmptyRequiredPolicy::NoMatch,
        );
        assert_eq!(result.percentage, 67);
    }

    #[test]
    fn test_recommendation_tiers() {
        assert_eq!(recommend(100), Recommendation::Apply);
        assert_eq!(recommend(80), Recommendation::Apply);
        assert_eq!(recommend(79), Recommendation::Prepare);
        assert_eq!(recommend(60), Recommendation::Prepare);
        assert_eq!(recommend(59), Recommendation::Skip);
        assert_eq!(recommend(0), Recommendation::Skip);
    }

    #[test]
    fn test_partial_overlap_python_django_aws() {
        let result = match_skills(
            &skills(&["python", "docker"]),
            &skills(&["Python", "Django", "AWS"]),
            EmptyRequiredPolicy::FullMatch,
        );
        assert_eq!(result.percentage, 33);
        assert_eq!(recommend(result.percentage), Recommendation::Skip);
    }
}
