use super::signal::RecruitmentSignal;
use crate::specialty::Specialty;
use serde::{Serialize, Serializer};

/// Canonical, normalized representation of one trial.
///
/// `details` is `None` when the hit had no usable structured summary; the
/// record then carries provenance only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrialRecord {
    /// `trial_<n>` with `n < 1_000_000`. Derived from the URL and NOT unique:
    /// two URLs can collide.
    pub id: String,
    pub title: Option<String>,
    pub url: String,
    pub published_date: Option<String>,
    pub author: Option<String>,
    pub specialty: Specialty,
    #[serde(flatten)]
    pub details: Option<TrialDetails>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialDetails {
    pub nct_id: String,
    pub sponsor: String,
    pub phase: String,
    pub enrollment: Enrollment,
    pub endpoints: Endpoints,
    pub geography: String,
    pub investigator: String,
    pub site: String,
    pub recruitment_status: String,
    pub biomarkers: String,
    pub summary: String,
    pub insight: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recruitment_signal: Option<RecruitmentSignal>,
}

/// Counts are written as JSON integers when they are whole, so `120` stays
/// `120` on the wire rather than `120.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Enrollment {
    #[serde(serialize_with = "serialize_count")]
    pub target: f64,
    #[serde(serialize_with = "serialize_count")]
    pub achieved: f64,
    pub percentage: f64,
}

// Largest magnitude at which every integer is exactly representable in f64.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

fn serialize_count<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() < MAX_EXACT_INTEGER {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Endpoints {
    pub primary: String,
}

impl TrialRecord {
    pub fn is_degraded(&self) -> bool {
        self.details.is_none()
    }

    pub fn recruitment_signal(&self) -> Option<RecruitmentSignal> {
        self.details.as_ref().and_then(|d| d.recruitment_signal)
    }

    pub fn insight(&self) -> Option<&str> {
        self.details.as_ref().map(|d| d.insight.as_str())
    }
}
