//! Insight guardrail
//!
//! The provider's free-text recommendation is unreliable once a trial is
//! closed or full. In those cases the recommendation is derived mechanically
//! from the structured status and enrollment fields and replaces whatever the
//! provider wrote.

use super::signal::is_fully_enrolled;

/// Lowercased, trimmed status phrases that mean the trial is not taking
/// participants.
pub const NON_RECRUITING_STATUSES: [&str; 11] = [
    "completed",
    "terminated",
    "withdrawn",
    "suspended",
    "enrollment complete",
    "enrolment complete",
    "active, not recruiting",
    "closed to accrual",
    "closed to accrual and intervention",
    "not recruiting",
    "closed",
];

pub fn normalize_status(status: &str) -> String {
    status.trim().to_lowercase()
}

pub fn is_non_recruiting(status: &str) -> bool {
    NON_RECRUITING_STATUSES.contains(&normalize_status(status).as_str())
}

/// Why the guardrail fired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardrailTrigger {
    /// The trimmed status phrase as written by the provider, whenever it is
    /// non-empty. Only non-recruiting phrases make the guardrail fire, but any
    /// phrase is reported once it has.
    pub status: Option<String>,
    pub fully_enrolled: bool,
}

impl GuardrailTrigger {
    /// Returns `None` when the trial looks open: neither non-recruiting nor full.
    pub fn detect(recruitment_status: &str, target: f64, achieved: f64) -> Option<Self> {
        let fully_enrolled = is_fully_enrolled(target, achieved);
        if !fully_enrolled && !is_non_recruiting(recruitment_status) {
            return None;
        }

        let status = recruitment_status.trim();
        Some(Self {
            status: (!status.is_empty()).then(|| status.to_string()),
            fully_enrolled,
        })
    }

    pub fn reason(&self) -> String {
        let mut parts: Vec<&str> = Vec::with_capacity(2);
        if let Some(status) = self.status.as_deref().filter(|s| !s.is_empty()) {
            parts.push(status);
        }
        if self.fully_enrolled {
            parts.push("fully enrolled");
        }

        if parts.is_empty() {
            "not recruiting".to_string()
        } else {
            parts.join(" and ")
        }
    }

    pub fn insight(&self) -> String {
        format!("No, because the trial is {}.", self.reason())
    }
}

/// Final insight for a record: the templated refusal when the guardrail
/// fires, otherwise the provider's text unchanged.
pub fn apply(provider_insight: String, recruitment_status: &str, target: f64, achieved: f64) -> String {
    match GuardrailTrigger::detect(recruitment_status, target, achieved) {
        Some(trigger) => trigger.insight(),
        None => provider_insight,
    }
}
