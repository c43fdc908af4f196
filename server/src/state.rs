use std::sync::Arc;

use common::{Location, reference};
use tracing::info;

use crate::{
    auth::AuthRegistry, config::Config, error::AppError, mail::Mailer, payments::Payments,
    store::JobStore,
};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: JobStore,
    pub payments: Payments,
    pub mailer: Mailer,
    pub auth: AuthRegistry,
    pub locations: Vec<Location>,
    pub skills: Vec<String>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Arc<Self>, AppError> {
        let locations = reference::locations();
        let skills = reference::job_skills();
        info!(
            "loaded {} locations and {} skills of reference data",
            locations.len(),
            skills.len()
        );

        let store = JobStore::load(&config.data_path)?;

        let http = reqwest::Client::new();
        let payments = Payments::new(
            http.clone(),
            config.payments_url.clone(),
            config.payments_key.clone(),
        );
        let mailer = Mailer::new(
            http,
            config.mail_url.clone(),
            config.mail_key.clone(),
            config.mail_sender.clone(),
        );

        Ok(Arc::new(Self {
            config,
            store,
            payments,
            mailer,
            auth: AuthRegistry::default(),
            locations,
            skills,
        }))
    }
}
