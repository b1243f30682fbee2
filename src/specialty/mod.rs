//! Specialty Catalog
//!
//! Closed set of medical specialties the service can search for. Each
//! specialty maps to an immutable profile: the free-text query tuned for
//! recall and the extraction schema sent to the search provider.

pub mod schema;

use crate::types::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use schema::{ExtractionSchema, FieldType, SchemaField};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Specialty {
    Oncology,
    Hematology,
    Radiology,
    Cardiology,
    Neurology,
}

impl Specialty {
    pub const ALL: [Specialty; 5] = [
        Specialty::Oncology,
        Specialty::Hematology,
        Specialty::Radiology,
        Specialty::Cardiology,
        Specialty::Neurology,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Specialty::Oncology => "oncology",
            Specialty::Hematology => "hematology",
            Specialty::Radiology => "radiology",
            Specialty::Cardiology => "cardiology",
            Specialty::Neurology => "neurology",
        }
    }

    /// Canonical provider query. Plain keywords, not a boolean expression.
    pub fn query_text(&self) -> &'static str {
        match self {
            Specialty::Oncology => {
                "oncology clinical trials phase II phase III enrollment outcomes biomarkers"
            }
            Specialty::Hematology => {
                "hematology clinical trials phase II phase III enrollment outcomes biomarkers"
            }
            Specialty::Radiology => {
                "radiology clinical trials phase II phase III enrollment outcomes imaging"
            }
            Specialty::Cardiology => {
                "cardiology clinical trials phase II phase III enrollment outcomes biomarkers"
            }
            Specialty::Neurology => {
                "neurology clinical trials phase II phase III enrollment outcomes biomarkers"
            }
        }
    }

    pub fn profile(self) -> SpecialtyProfile {
        SpecialtyProfile {
            specialty: self,
            query: self.query_text(),
            schema: ExtractionSchema::for_specialty(self),
        }
    }

    fn valid_names() -> String {
        Self::ALL
            .iter()
            .map(Specialty::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Specialty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Specialty {
    type Err = AppError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let lowered = input.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|s| s.as_str() == lowered)
            .ok_or_else(|| AppError::InvalidSpecialty(Self::valid_names()))
    }
}

/// Everything needed to plan a search for one specialty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialtyProfile {
    pub specialty: Specialty,
    pub query: &'static str,
    pub schema: ExtractionSchema,
}

/// Validate a user-supplied specialty name (case-insensitive) and return its profile.
pub fn resolve(input: &str) -> AppResult<SpecialtyProfile> {
    input.parse::<Specialty>().map(Specialty::profile)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_is_case_insensitive() {
        let lower = resolve("oncology").unwrap();
        assert_eq!(resolve("Oncology").unwrap(), lower);
        assert_eq!(resolve("ONCOLOGY").unwrap(), lower);
        assert_eq!(lower.specialty, Specialty::Oncology);
    }

    #[test]
    fn test_resolve_rejects_unknown() {
        for input in ["dermatology", "", "onco", " oncology", "ONCOLOGYY"] {
            let err = resolve(input).unwrap_err();
            assert!(matches!(err, AppError::InvalidSpecialty(_)), "{input:?}");
        }
    }

    #[test]
    fn test_invalid_message_lists_valid_names() {
        let err = resolve("pediatrics").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid specialty. Must be one of: oncology, hematology, radiology, cardiology, neurology"
        );
    }

    #[test]
    fn test_every_specialty_round_trips_through_its_name() {
        for specialty in Specialty::ALL {
            let profile = resolve(&specialty.to_string().to_uppercase()).unwrap();
            assert_eq!(profile.specialty, specialty);
            assert!(profile.query.starts_with(specialty.as_str()));
            assert!(profile.query.contains("clinical trials"));
        }
    }

    #[test]
    fn test_radiology_query_targets_imaging() {
        assert!(Specialty::Radiology.query_text().ends_with("imaging"));
        assert!(Specialty::Hematology.query_text().ends_with("biomarkers"));
    }
}
