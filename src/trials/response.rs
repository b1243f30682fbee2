use super::record::TrialRecord;
use crate::specialty::Specialty;
use serde::Serialize;

/// Payload returned for one specialty lookup
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrialSearchResponse {
    pub specialty: Specialty,
    pub query: String,
    pub count: usize,
    pub trials: Vec<TrialRecord>,
}

/// Keeps provider order. Duplicate hits are not collapsed.
pub fn assemble(specialty: Specialty, query: &str, trials: Vec<TrialRecord>) -> TrialSearchResponse {
    TrialSearchResponse {
        specialty,
        query: query.to_string(),
        count: trials.len(),
        trials,
    }
}
