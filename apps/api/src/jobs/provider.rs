//! Job search backends. The trait is held in `AppState` as
//! `Arc<dyn JobSearchProvider>`; the Adzuna client is used when credentials
//! are configured, otherwise the static feed serves local development.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::job::{JobPosting, JobStats, LocationDemand, RoleDemand, SkillDemand};

#[async_trait]
pub trait JobSearchProvider: Send + Sync {
    /// Returns candidate postings for the given skills and location. Postings
    /// come back unscored; the search handler annotates match percentages.
    async fn search(&self, skills: &[String], location: &str)
        -> Result<Vec<JobPosting>, AppError>;

    /// Aggregate market statistics for the given skills and location.
    async fn stats(&self, skills: &[String], location: &str) -> Result<JobStats, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Adzuna client
// ────────────────────────────────────────────────────────────────────────────

pub struct AdzunaProvider {
    http: reqwest::Client,
    base_url: String,
    app_id: String,
    app_key: String,
}

#[derive(Deserialize)]
struct AdzunaSearchPage {
    #[serde(default)]
    count: i64,
    #[serde(default)]
    results: Vec<AdzunaResult>,
}

#[derive(Deserialize)]
struct AdzunaResult {
    id: String,
    title: String,
    company: AdzunaCompany,
    location: Option<AdzunaLocation>,
    salary_min: Option<f64>,
    salary_max: Option<f64>,
    description: Option<String>,
    redirect_url: Option<String>,
}

#[derive(Deserialize)]
struct AdzunaCompany {
    display_name: Option<String>,
}

#[derive(Deserialize)]
struct AdzunaLocation {
    display_name: Option<String>,
}

impl AdzunaProvider {
    pub fn new(base_url: String, app_id: String, app_key: String) -> Self {
        AdzunaProvider {
            http: reqwest::Client::new(),
            base_url,
            app_id,
            app_key,
        }
    }

    async fn fetch_page(
        &self,
        skills: &[String],
        location: &str,
    ) -> Result<AdzunaSearchPage, AppError> {
        // Adzuna partitions its API by country; the product currently targets
        // the German market only.
        let url = format!("{}/jobs/de/search/1", self.base_url);
        let what = skills.join(" ");

        let response = self
            .http
            .get(&url)
            .query(&[
                ("app_id", self.app_id.as_str()),
                ("app_key", self.app_key.as_str()),
                ("what", what.as_str()),
                ("where", location),
                ("results_per_page", "50"),
                ("content-type", "application/json"),
            ])
            .send()
            .await
            .map_err(|e| AppError::JobSearch(format!("Adzuna request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(AppError::JobSearch(format!(
                "Adzuna returned HTTP {}",
                response.status()
            )));
        }

        response
            .json::<AdzunaSearchPage>()
            .await
            .map_err(|e| AppError::JobSearch(format!("Adzuna response parse failed: {e}")))
    }
}

/// Adzuna does not expose a required-skills field, so we derive one by scanning
/// the description for the skills the caller searched for.
fn skills_in_description(description: Option<&str>, skills: &[String]) -> Vec<String> {
    let Some(text) = description else {
        return Vec::new();
    };
    let text_lower = text.to_lowercase();
    skills
        .iter()
        .filter(|s| text_lower.contains(&s.to_lowercase()))
        .cloned()
        .collect()
}

#[async_trait]
impl JobSearchProvider for AdzunaProvider {
    async fn search(
        &self,
        skills: &[String],
        location: &str,
    ) -> Result<Vec<JobPosting>, AppError> {
        let page = self.fetch_page(skills, location).await?;

        Ok(page
            .results
            .into_iter()
            .map(|r| JobPosting {
                job_id: format!("adzuna_{}", r.id),
                title: r.title,
                company: r.company.display_name.unwrap_or_default(),
                location: r.location.and_then(|l| l.display_name),
                salary_min: r.salary_min.map(|s| s as i32),
                salary_max: r.salary_max.map(|s| s as i32),
                currency: "EUR".to_string(),
                required_skills: skills_in_description(r.description.as_deref(), skills),
                description: r.description,
                match_percentage: None,
                source: Some("adzuna".to_string()),
                external_url: r.redirect_url,
            })
            .collect())
    }

    async fn stats(&self, skills: &[String], location: &str) -> Result<JobStats, AppError> {
        let page = self.fetch_page(skills, location).await?;

        let salaries: Vec<f64> = page
            .results
            .iter()
            .filter_map(|r| match (r.salary_min, r.salary_max) {
                (Some(lo), Some(hi)) => Some((lo + hi) / 2.0),
                (Some(lo), None) => Some(lo),
                (None, Some(hi)) => Some(hi),
                (None, None) => None,
            })
            .collect();
        let avg_salary = if salaries.is_empty() {
            None
        } else {
            Some(salaries.iter().sum::<f64>() / salaries.len() as f64)
        };

        let mut skill_counts: Vec<SkillDemand> = skills
            .iter()
            .map(|s| SkillDemand {
                skill: s.clone(),
                count: page
                    .results
                    .iter()
                    .filter(|r| {
                        r.description
                            .as_deref()
                            .map(|d| d.to_lowercase().contains(&s.to_lowercase()))
                            .unwrap_or(false)
                    })
                    .count() as i64,
            })
            .collect();
        skill_counts.sort_by(|a, b| b.count.cmp(&a.count));

        let mut role_counts: HashMap<String, i64> = HashMap::new();
        let mut location_counts: HashMap<String, i64> = HashMap::new();
        for r in &page.results {
            *role_counts.entry(r.title.clone()).or_default() += 1;
            if let Some(name) = r.location.as_ref().and_then(|l| l.display_name.clone()) {
                *location_counts.entry(name).or_default() += 1;
            }
        }
        let mut top_roles: Vec<RoleDemand> = role_counts
            .into_iter()
            .map(|(role, count)| RoleDemand { role, count })
            .collect();
        top_roles.sort_by(|a, b| b.count.cmp(&a.count).then(a.role.cmp(&b.role)));
        top_roles.truncate(5);

        let mut locations: Vec<LocationDemand> = location_counts
            .into_iter()
            .map(|(location, count)| LocationDemand { location, count })
            .collect();
        locations.sort_by(|a, b| b.count.cmp(&a.count).then(a.location.cmp(&b.location)));
        locations.truncate(5);

        Ok(JobStats {
            total_jobs: page.count,
            avg_salary,
            top_skills: skill_counts,
            top_roles,
            locations,
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static feed — deterministic postings for local development and demos
// ────────────────────────────────────────────────────────────────────────────

pub struct StaticJobFeed;

fn posting(
    job_id: &str,
    title: &str,
    company: &str,
    location: &str,
    salary_min: i32,
    salary_max: i32,
    description: &str,
    required_skills: &[&str],
    external_url: &str,
) -> JobPosting {
    JobPosting {
        job_id: job_id.to_string(),
        title: title.to_string(),
        company: company.to_string(),
        location: Some(location.to_string()),
        salary_min: Some(salary_min),
        salary_max: Some(salary_max),
        currency: "EUR".to_string(),
        description: Some(description.to_string()),
        required_skills: required_skills.iter().map(|s| s.to_string()).collect(),
        match_percentage: None,
        source: Some("adzuna".to_string()),
        external_url: Some(external_url.to_string()),
    }
}

#[async_trait]
impl JobSearchProvider for StaticJobFeed {
    async fn search(
        &self,
        _skills: &[String],
        _location: &str,
    ) -> Result<Vec<JobPosting>, AppError> {
        Ok(vec![
            posting(
                "adzuna_1",
                "Senior Software Engineer",
                "TechCorp GmbH",
                "Berlin, Germany",
                70_000,
                95_000,
                "We are looking for an experienced Software Engineer to join our team.",
                &["Python", "Django", "PostgreSQL", "Docker", "AWS"],
                "https://example.com/job1",
            ),
            posting(
                "adzuna_2",
                "Full Stack Developer",
                "Digital Solutions AG",
                "Munich, Germany",
                60_000,
                80_000,
                "Join our dynamic team building modern web applications.",
                &["React", "Node.js", "TypeScript", "MongoDB"],
                "https://example.com/job2",
            ),
            posting(
                "adzuna_3",
                "Frontend Developer",
                "StartupHub",
                "Berlin, Germany",
                55_000,
                75_000,
                "Create beautiful user interfaces with React and TypeScript.",
                &["React", "TypeScript", "CSS", "JavaScript"],
                "https://example.com/job3",
            ),
            posting(
                "adzuna_4",
                "DevOps Engineer",
                "CloudTech",
                "Hamburg, Germany",
                65_000,
                90_000,
                "Manage our cloud infrastructure and CI/CD pipelines.",
                &["Docker", "Kubernetes", "AWS", "Python", "Linux"],
                "https://example.com/job4",
            ),
            posting(
                "adzuna_5",
                "Data Scientist",
                "DataCorp",
                "Berlin, Germany",
                70_000,
                100_000,
                "Analyze data and build machine learning models.",
                &["Python", "Machine Learning", "SQL", "TensorFlow"],
                "https://example.com/job5",
            ),
        ])
    }

    async fn stats(&self, _skills: &[String], _location: &str) -> Result<JobStats, AppError> {
        Ok(JobStats {
            total_jobs: 1234,
            avg_salary: Some(72_500.0),
            top_skills: vec![
                SkillDemand { skill: "Python".to_string(), count: 450 },
                SkillDemand { skill: "JavaScript".to_string(), count: 380 },
                SkillDemand { skill: "React".to_string(), count: 320 },
                SkillDemand { skill: "Docker".to_string(), count: 290 },
                SkillDemand { skill: "AWS".to_string(), count: 270 },
            ],
            top_roles: vec![
                RoleDemand { role: "Software Engineer".to_string(), count: 350 },
                RoleDemand { role: "Full Stack Developer".to_string(), count: 280 },
                RoleDemand { role: "Frontend Developer".to_string(), count: 220 },
                RoleDemand { role: "DevOps Engineer".to_string(), count: 180 },
                RoleDemand { role: "Data Scientist".to_string(), count: 150 },
            ],
            locations: vec![
                LocationDemand { location: "Berlin".to_string(), count: 520 },
                LocationDemand { location: "Munich".to_string(), count: 340 },
                LocationDemand { location: "Hamburg".to_string(), count: 210 },
                LocationDemand { location: "Frankfurt".to_string(), count: 164 },
            ],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skills_in_description_scans_case_insensitively() {
        let skills = vec!["Python".to_string(), "Kafka".to_string()];
        let found = skills_in_description(
            Some("Looking for a python engineer with cloud experience"),
            &skills,
        );
        assert_eq!(found, vec!["Python".to_string()]);
    }

    #[test]
    fn test_skills_in_description_empty_without_description() {
        let skills = vec!["Python".to_string()];
        assert!(skills_in_description(None, &skills).is_empty());
    }

    #[tokio::test]
    async fn test_static_feed_returns_unscored_postings() {
        let feed = StaticJobFeed;
        let jobs = feed.search(&[], "Germany").await.unwrap();
        assert_eq!(jobs.len(), 5);
        assert!(jobs.iter().all(|j| j.match_percentage.is_none()));
    }
}
