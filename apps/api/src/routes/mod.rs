pub mod health;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::assessment::handlers as assessment;
use crate::career::{experience, job_match, paths, profile, skills};
use crate::jobs::handlers as jobs;
use crate::state::AppState;
use crate::users;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Users
        .route(
            "/api/v1/users/me",
            get(users::handle_get_me)
                .put(users::handle_update_me)
                .delete(users::handle_delete_me),
        )
        // Jobs
        .route("/api/v1/jobs/search", post(jobs::handle_search))
        .route(
            "/api/v1/jobs/saved",
            post(jobs::handle_save_job).get(jobs::handle_list_saved),
        )
        .route("/api/v1/jobs/saved/:id", delete(jobs::handle_unsave_job))
        .route("/api/v1/jobs/stats", get(jobs::handle_stats))
        // Skills
        .route(
            "/api/v1/career/skills",
            post(skills::handle_add_skill).get(skills::handle_list_skills),
        )
        .route(
            "/api/v1/career/skills/:id",
            put(skills::handle_update_skill).delete(skills::handle_delete_skill),
        )
        // Experience
        .route(
            "/api/v1/career/experience",
            post(experience::handle_add_experience).get(experience::handle_list_experience),
        )
        .route(
            "/api/v1/career/experience/:id",
            put(experience::handle_update_experience)
                .delete(experience::handle_delete_experience),
        )
        // Career profile
        .route(
            "/api/v1/career/profile",
            get(profile::handle_get_profile).put(profile::handle_update_profile),
        )
        .route(
            "/api/v1/career/profile/assessment",
            post(profile::handle_complete_assessment),
        )
        // Career paths
        .route(
            "/api/v1/career/paths",
            get(paths::handle_list_paths).post(paths::handle_create_path),
        )
        .route(
            "/api/v1/career/paths/:id",
            get(paths::handle_get_path).put(paths::handle_update_path),
        )
        // Job matching
        .route(
            "/api/v1/career/job-match",
            post(job_match::handle_analyze_job_match),
        )
        .route(
            "/api/v1/career/job-matches",
            get(job_match::handle_list_job_matches),
        )
        // Assessment
        .route(
            "/api/v1/assessment/questions",
            get(assessment::handle_get_questions),
        )
        .route("/api/v1/assessment/submit", post(assessment::handle_submit))
        .route(
            "/api/v1/assessment/results",
            get(assessment::handle_get_results),
        )
        .route(
            "/api/v1/assessment/progress",
            get(assessment::handle_get_progress),
        )
        .with_state(state)
}
