//! Query Planner
//!
//! Turns a resolved specialty profile into a complete provider request. Only
//! the domain allow-list is configurable; everything else is fixed.

use crate::specialty::{ExtractionSchema, Specialty, SpecialtyProfile};
use chrono::{DateTime, Duration, SecondsFormat, Utc};

pub const RESULT_CAP: u32 = 50;
pub const LOOKBACK_DAYS: i64 = 730;
pub const RETRIEVAL_MODE: &str = "auto";
pub const LIVECRAWL_PREFERENCE: &str = "preferred";

pub const TRUSTED_DOMAINS: [&str; 6] = [
    "clinicaltrials.gov",
    "pubmed.ncbi.nlm.nih.gov",
    "nejm.org",
    "nature.com",
    "thelancet.com",
    "bmj.com",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlannerOptions {
    /// Precision over recall: only search [`TRUSTED_DOMAINS`].
    pub restrict_to_trusted_domains: bool,
}

impl From<&crate::config::SearchConfig> for PlannerOptions {
    fn from(config: &crate::config::SearchConfig) -> Self {
        Self {
            restrict_to_trusted_domains: config.restrict_to_trusted_domains,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub specialty: Specialty,
    pub query: String,
    /// Only content published after this instant is requested
    pub recency_cutoff: DateTime<Utc>,
    pub num_results: u32,
    pub retrieval_mode: &'static str,
    pub livecrawl: &'static str,
    pub schema: ExtractionSchema,
    pub include_domains: Option<Vec<String>>,
}

impl SearchRequest {
    /// ISO-8601 with millisecond precision and a `Z` designator,
    /// e.g. `2023-10-17T09:30:00.000Z`.
    pub fn recency_cutoff_iso(&self) -> String {
        format_instant(self.recency_cutoff)
    }
}

pub fn format_instant(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn plan(profile: &SpecialtyProfile, now: DateTime<Utc>, options: PlannerOptions) -> SearchRequest {
    let include_domains = options
        .restrict_to_trusted_domains
        .then(|| TRUSTED_DOMAINS.iter().map(|d| d.to_string()).collect());

    SearchRequest {
        specialty: profile.specialty,
        query: profile.query.to_string(),
        recency_cutoff: now - Duration::days(LOOKBACK_DAYS),
        num_results: RESULT_CAP,
        retrieval_mode: RETRIEVAL_MODE,
        livecrawl: LIVECRAWL_PREFERENCE,
        schema: profile.schema.clone(),
        include_domains,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 16, 9, 30, 15).unwrap() + Duration::milliseconds(42)
    }

    #[test]
    fn test_cutoff_is_730_days_back() {
        let request = plan(&Specialty::Oncology.profile(), fixed_now(), PlannerOptions::default());
        assert_eq!(fixed_now() - request.recency_cutoff, Duration::days(730));
        assert_eq!(request.recency_cutoff_iso(), "2023-10-17T09:30:15.042Z");
    }

    #[test]
    fn test_cutoff_format_always_has_millis() {
        let now = Utc.with_ymd_and_hms(2024, 2, 29, 0, 0, 0).unwrap();
        let request = plan(&Specialty::Neurology.profile(), now, PlannerOptions::default());
        assert_eq!(request.recency_cutoff_iso(), "2022-03-01T00:00:00.000Z");
    }

    #[test]
    fn test_fixed_parameters() {
        let profile = Specialty::Cardiology.profile();
        let request = plan(&profile, fixed_now(), PlannerOptions::default());
        assert_eq!(request.num_results, 50);
        assert_eq!(request.retrieval_mode, "auto");
        assert_eq!(request.livecrawl, "preferred");
        assert_eq!(request.query, profile.query);
        assert_eq!(request.schema, profile.schema);
        assert_eq!(request.specialty, Specialty::Cardiology);
    }

    #[test]
    fn test_domain_allow_list_is_opt_in() {
        let profile = Specialty::Hematology.profile();
        let open = plan(&profile, fixed_now(), PlannerOptions::default());
        assert!(open.include_domains.is_none());

        let restricted = plan(
            &profile,
            fixed_now(),
            PlannerOptions {
                restrict_to_trusted_domains: true,
            },
        );
        let domains = restricted.include_domains.unwrap();
        assert_eq!(domains.len(), TRUSTED_DOMAINS.len());
        assert!(domains.iter().any(|d| d == "clinicaltrials.gov"));
    }
}
