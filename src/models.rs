use crate::config::Config;
use crate::search::{ExaClient, PlannerOptions};
use crate::trials::TrialSearchService;
use crate::types::{AppError, AppResult};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// `None` when no search-provider credential is configured
    pub trials: Option<TrialSearchService>,
}

impl AppState {
    pub fn from_config(config: Config) -> AppResult<Self> {
        let trials = ExaClient::from_config(&config.search)?.map(|client| {
            TrialSearchService::new(Arc::new(client), PlannerOptions::from(&config.search))
        });

        Ok(Self { config, trials })
    }

    pub fn trial_service(&self) -> AppResult<&TrialSearchService> {
        self.trials.as_ref().ok_or(AppError::ProviderNotConfigured)
    }
}

#[derive(Debug, serde::Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub search_provider: String,
}
