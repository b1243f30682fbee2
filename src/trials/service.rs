//! Specialty lookup pipeline: catalog → planner → provider → normalizer → assembler.

use super::normalizer::normalize_hit;
use super::response::{assemble, TrialSearchResponse};
use crate::search::{plan, PlannerOptions, SearchProvider};
use crate::specialty::resolve as resolve_specialty;
use crate::types::AppResult;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{error, info};

/// Stateless between calls; clones share only the provider handle.
#[derive(Clone)]
pub struct TrialSearchService {
    provider: Arc<dyn SearchProvider>,
    options: PlannerOptions,
}

impl TrialSearchService {
    pub fn new(provider: Arc<dyn SearchProvider>, options: PlannerOptions) -> Self {
        Self { provider, options }
    }

    pub async fn search_by_specialty(&self, specialty: &str) -> AppResult<TrialSearchResponse> {
        self.search_by_specialty_at(specialty, Utc::now()).await
    }

    /// Same as [`Self::search_by_specialty`] with an explicit planning instant.
    pub async fn search_by_specialty_at(
        &self,
        specialty: &str,
        now: DateTime<Utc>,
    ) -> AppResult<TrialSearchResponse> {
        let profile = resolve_specialty(specialty)?;
        let request = plan(&profile, now, self.options);

        let hits = self
            .provider
            .search_and_contents(&request)
            .await
            .inspect_err(|e| {
                error!(provider = self.provider.name(), specialty = %profile.specialty, error = %e, "Trial search failed");
            })?;

        let trials: Vec<_> = hits
            .iter()
            .map(|hit| normalize_hit(hit, profile.specialty))
            .collect();

        let degraded = trials.iter().filter(|t| t.is_degraded()).count();
        info!(
            specialty = %profile.specialty,
            count = trials.len(),
            degraded,
            "Trial search completed"
        );

        Ok(assemble(profile.specialty, profile.query, trials))
    }
}
