//! File-backed job-post store.
//!
//! The whole corpus lives in one JSON file, read at startup and rewritten
//! on every mutation. Search filters mirror the listing query the frontend
//! issues: an optional salary floor against the post's max salary, and
//! case-sensitive substring matches on location and title.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::RwLock,
};

use chrono::{Duration, Utc};
use common::{JobPost, JobStatus};
use tracing::{info, warn};

use crate::error::AppError;

pub struct JobStore {
    path: PathBuf,
    posts: RwLock<Vec<JobPost>>,
}

impl JobStore {
    /// Opens the store at `path`, starting empty when the file is absent.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let path = path.into();

        let posts: Vec<JobPost> = if path.exists() {
            let content = fs::read_to_string(&path)?;
            serde_json::from_str(&content)?
        } else {
            warn!("no job post file at {}, starting empty", path.display());
            Vec::new()
        };

        info!("loaded {} job posts", posts.len());

        Ok(Self {
            path,
            posts: RwLock::new(posts),
        })
    }

    /// Listing query. All filters are optional and conjunctive: `salary`
    /// keeps posts paying at least that much at the top of their range,
    /// `location` and `title` keep posts whose field contains the value.
    /// Status is not filtered.
    pub fn search(
        &self,
        salary: Option<i64>,
        location: Option<&str>,
        title: Option<&str>,
    ) -> Vec<JobPost> {
        let posts = self.posts.read().unwrap();
        posts
            .iter()
            .filter(|post| salary.is_none_or(|s| post.form.max_salary >= s))
            .filter(|post| location.is_none_or(|l| post.form.location.contains(l)))
            .filter(|post| title.is_none_or(|t| post.form.title.contains(t)))
            .cloned()
            .collect()
    }

    /// Every post belonging to the recruiter with this login email.
    pub fn by_email(&self, email: &str) -> Vec<JobPost> {
        let posts = self.posts.read().unwrap();
        posts
            .iter()
            .filter(|post| post.form.login_email == email)
            .cloned()
            .collect()
    }

    pub fn get(&self, job_id: &str) -> Option<JobPost> {
        let posts = self.posts.read().unwrap();
        posts.iter().find(|post| post.job_id == job_id).cloned()
    }

    pub fn insert(&self, post: JobPost) -> Result<(), AppError> {
        let mut posts = self.posts.write().unwrap();
        posts.push(post);
        self.persist(&posts)
    }

    /// Marks a paid post Active, stamps `updatedAt` and gives it 90 days of
    /// life. Returns the updated record, or None when the id is unknown.
    pub fn activate(&self, job_id: &str) -> Result<Option<JobPost>, AppError> {
        let mut posts = self.posts.write().unwrap();
        let Some(post) = posts.iter_mut().find(|post| post.job_id == job_id) else {
            return Ok(None);
        };

        let now = Utc::now();
        post.status = JobStatus::Active;
        post.updated_at = now;
        post.expires_at = Some(now + Duration::days(90));
        let updated = post.clone();

        self.persist(&posts)?;
        Ok(Some(updated))
    }

    fn persist(&self, posts: &[JobPost]) -> Result<(), AppError> {
        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
            && !dir.exists()
        {
            fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(posts)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{Currency, JobPostForm, PlanType};

    fn post(title: &str, location: &str, max_salary: i64, email: &str) -> JobPost {
        JobPost {
            form: JobPostForm {
                company_logo_url: None,
                company_name: "Acme".to_string(),
                company_website: "https://acme.example".to_string(),
                currency: Currency::GBP,
                description: "desc".to_string(),
                how_to_apply: "https://acme.example/apply".to_string(),
                location: location.to_string(),
                max_salary,
                min_salary: max_salary - 10_000,
                min_yoe: 2,
                title: title.to_string(),
                visa_sponsorship: false,
                login_email: email.to_string(),
                plan_duration: 30,
                plan_type: PlanType::Standard,
            },
            job_id: format!("job-{title}"),
            session_id: "cs_test".to_string(),
            payment_intent_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            expires_at: None,
            clicked_apply_count: 0,
            status: JobStatus::PendingPayment,
        }
    }

    fn temp_store() -> JobStore {
        let path = std::env::temp_dir().join(format!("jobs-test-{}.json", uuid::Uuid::new_v4()));
        JobStore::load(path).unwrap()
    }

    fn seeded_store() -> JobStore {
        let store = temp_store();
        store
            .insert(post("Backend Engineer", "London, United Kingdom", 90_000, "a@x.com"))
            .unwrap();
        store
            .insert(post("Frontend Engineer", "Paris, France", 60_000, "a@x.com"))
            .unwrap();
        store
            .insert(post("Data Engineer", "Berlin, Germany", 70_000, "b@y.com"))
            .unwrap();
        store
    }

    #[test]
    fn test_search_without_filters_returns_everything() {
        let store = seeded_store();
        assert_eq!(store.search(None, None, None).len(), 3);
    }

    #[test]
    fn test_search_salary_filters_on_max_salary() {
        let store = seeded_store();
        let posts = store.search(Some(70_000), None, None);
        let titles: Vec<&str> = posts.iter().map(|p| p.form.title.as_str()).collect();
        assert_eq!(titles, vec!["Backend Engineer", "Data Engineer"]);
    }

    #[test]
    fn test_search_location_is_case_sensitive_contains() {
        let store = seeded_store();
        assert_eq!(store.search(None, Some("London"), None).len(), 1);
        // the store matches raw substrings, no normalization
        assert!(store.search(None, Some("london"), None).is_empty());
    }

    #[test]
    fn test_search_filters_are_conjunctive() {
        let store = seeded_store();
        let posts = store.search(Some(60_000), Some("France"), Some("Frontend"));
        assert_eq!(posts.len(), 1);
        let posts = store.search(Some(80_000), Some("France"), None);
        assert!(posts.is_empty());
    }

    #[test]
    fn test_by_email_scopes_to_recruiter() {
        let store = seeded_store();
        assert_eq!(store.by_email("a@x.com").len(), 2);
        assert_eq!(store.by_email("b@y.com").len(), 1);
        assert!(store.by_email("c@z.com").is_empty());
    }

    #[test]
    fn test_activate_stamps_status_and_expiry() {
        let store = seeded_store();
        let updated = store.activate("job-Backend Engineer").unwrap().unwrap();
        assert_eq!(updated.status, JobStatus::Active);
        let expires = updated.expires_at.unwrap();
        assert!(expires > updated.updated_at + Duration::days(89));
        assert!(store.activate("missing").unwrap().is_none());
    }

    #[test]
    fn test_posts_survive_a_reload() {
        let store = seeded_store();
        let path = store.path().to_path_buf();
        drop(store);

        let reloaded = JobStore::load(&path).unwrap();
        assert_eq!(reloaded.search(None, None, None).len(), 3);
        fs::remove_file(path).ok();
    }
}
