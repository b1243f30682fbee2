//! Enrollment arithmetic and recruitment-signal derivation.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecruitmentSignal {
    Strong,
    Moderate,
    Weak,
    Failed,
}

impl RecruitmentSignal {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecruitmentSignal::Strong => "strong",
            RecruitmentSignal::Moderate => "moderate",
            RecruitmentSignal::Weak => "weak",
            RecruitmentSignal::Failed => "failed",
        }
    }

    /// Accepts a provider-written label, ignoring case and surrounding space.
    pub fn parse_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "strong" => Some(RecruitmentSignal::Strong),
            "moderate" => Some(RecruitmentSignal::Moderate),
            "weak" => Some(RecruitmentSignal::Weak),
            "failed" => Some(RecruitmentSignal::Failed),
            _ => None,
        }
    }
}

impl fmt::Display for RecruitmentSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const FAILED_STATUSES: [&str; 3] = ["terminated", "withdrawn", "suspended"];
const STRONG_PERCENTAGE: f64 = 85.0;
const MODERATE_PERCENTAGE: f64 = 50.0;

/// `achieved / target` as a percentage rounded to one decimal; 0 unless both
/// counts are positive. Ties round half to even, so 0.25% becomes 0.2.
pub fn enrollment_percentage(target: f64, achieved: f64) -> f64 {
    if target > 0.0 && achieved > 0.0 {
        let percentage = achieved / target * 100.0;
        (percentage * 10.0).round_ties_even() / 10.0
    } else {
        0.0
    }
}

pub fn is_fully_enrolled(target: f64, achieved: f64) -> bool {
    target > 0.0 && achieved >= target
}

/// Inputs for [`derive_signal`], all taken from the extracted payload.
#[derive(Debug, Clone, Copy)]
pub struct SignalInputs<'a> {
    pub provider_signal: Option<&'a str>,
    pub recruitment_status: &'a str,
    pub target: f64,
    pub achieved: f64,
    pub percentage: f64,
}

/// First matching rule wins:
/// 1. a valid provider-supplied label
/// 2. terminated/withdrawn/suspended status → failed
/// 3. full enrollment or ≥ 85% → strong
/// 4. ≥ 50% → moderate
/// 5. > 0% → weak
/// 6. otherwise absent
pub fn derive_signal(inputs: SignalInputs<'_>) -> Option<RecruitmentSignal> {
    if let Some(signal) = inputs.provider_signal.and_then(RecruitmentSignal::parse_label) {
        return Some(signal);
    }

    let status = inputs.recruitment_status.trim().to_lowercase();
    if FAILED_STATUSES.contains(&status.as_str()) {
        return Some(RecruitmentSignal::Failed);
    }

    if is_fully_enrolled(inputs.target, inputs.achieved) || inputs.percentage >= STRONG_PERCENTAGE {
        Some(RecruitmentSignal::Strong)
    } else if inputs.percentage >= MODERATE_PERCENTAGE {
        Some(RecruitmentSignal::Moderate)
    } else if inputs.percentage > 0.0 {
        Some(RecruitmentSignal::Weak)
    } else {
        None
    }
}
