//! Extraction schema
//!
//! Describes the structured fields the search provider's summarization step
//! should fill in for every result. Each field carries a semantic type and a
//! natural-language instruction; the whole set is rendered as a draft-07
//! JSON schema when sent over the wire.

use super::Specialty;
use serde::Serialize;
use serde_json::{json, Map, Value};

const JSON_SCHEMA_DRAFT: &str = "http://json-schema.org/draft-07/schema#";

/// Wire names of the extracted fields
pub mod fields {
    pub const NCT_ID: &str = "nct_id";
    pub const SPONSOR: &str = "sponsor";
    pub const PHASE: &str = "phase";
    pub const ENROLLMENT_TARGET: &str = "enrollment_target";
    pub const ENROLLMENT_ACHIEVED: &str = "enrollment_achieved";
    pub const PRIMARY_ENDPOINT: &str = "primary_endpoint";
    pub const GEOGRAPHY: &str = "geography";
    pub const INVESTIGATOR: &str = "investigator";
    pub const SITE: &str = "site";
    pub const RECRUITMENT_STATUS: &str = "recruitment_status";
    pub const RECRUITMENT_SIGNAL: &str = "recruitment_signal";
    pub const BIOMARKERS: &str = "biomarkers";
    pub const SUMMARY: &str = "summary";
    pub const INSIGHT: &str = "insight";
    /// Older payloads carried the recommendation under this key
    pub const IMPLICATION: &str = "implication";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Number,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaField {
    pub name: &'static str,
    pub field_type: FieldType,
    pub description: String,
}

impl SchemaField {
    fn text(name: &'static str, description: impl Into<String>) -> Self {
        Self {
            name,
            field_type: FieldType::String,
            description: description.into(),
        }
    }

    fn number(name: &'static str, description: impl Into<String>) -> Self {
        Self {
            name,
            field_type: FieldType::Number,
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionSchema {
    pub fields: Vec<SchemaField>,
}

/// Decision rubric handed to the provider for the `insight` field.
pub const INSIGHT_RUBRIC: &str = "Answer in exactly one sentence: As a well-funded research center in \
Southern California, should we run or join this trial? If recruitment_status is not \
recruiting/enrolling or enrollment_achieved >= enrollment_target, answer 'No, because' and state \
it is completed/fully enrolled/not recruiting. Otherwise begin with 'Yes, because' or 'No, because' \
and justify using concrete signals (recruitment feasibility vs targets, geographic fit with \
Southern California, differentiation vs similar trials/endpoints, underserved populations). If \
evidence is insufficient, answer 'Insufficient evidence.' Keep under 25 words.";

impl ExtractionSchema {
    pub fn for_specialty(specialty: Specialty) -> Self {
        let biomarkers = match specialty {
            Specialty::Radiology => {
                "Imaging markers or biomarkers evaluated or required for eligibility (comma-separated if multiple)."
            }
            _ => "Biomarkers evaluated or required for eligibility (comma-separated if multiple).",
        };

        Self {
            fields: vec![
                SchemaField::text(
                    fields::NCT_ID,
                    "ClinicalTrials.gov identifier for the study (e.g., 'NCT01234567').",
                ),
                SchemaField::text(
                    fields::SPONSOR,
                    "Primary organization or company sponsoring the trial.",
                ),
                SchemaField::text(
                    fields::PHASE,
                    "Trial phase as reported in the content (e.g., 'Phase I', 'Phase II', 'Phase III', 'Phase IV').",
                ),
                SchemaField::number(
                    fields::ENROLLMENT_TARGET,
                    "Planned number of participants to enroll in the trial.",
                ),
                SchemaField::number(
                    fields::ENROLLMENT_ACHIEVED,
                    "Number of participants actually enrolled (to date or final).",
                ),
                SchemaField::text(
                    fields::PRIMARY_ENDPOINT,
                    "Primary endpoint or outcome measure used to assess efficacy/safety.",
                ),
                SchemaField::text(
                    fields::GEOGRAPHY,
                    "Geographic focus or location(s) of the trial (country/region/city).",
                ),
                SchemaField::text(
                    fields::INVESTIGATOR,
                    "Name of the principal investigator or lead researcher, if available.",
                ),
                SchemaField::text(
                    fields::SITE,
                    "Trial site or institution conducting the study, if specified.",
                ),
                SchemaField::text(
                    fields::RECRUITMENT_STATUS,
                    "Current recruitment status (e.g., 'Recruiting', 'Active, not recruiting', 'Completed', 'Terminated').",
                ),
                SchemaField::text(
                    fields::RECRUITMENT_SIGNAL,
                    "Recruitment health: one of 'strong', 'moderate', 'weak', 'failed'. Leave empty if unknown.",
                ),
                SchemaField::text(fields::BIOMARKERS, biomarkers),
                SchemaField::text(
                    fields::SUMMARY,
                    format!(
                        "In one concise sentence, summarize the {} trial (phase, focus, status).",
                        specialty
                    ),
                ),
                SchemaField::text(fields::INSIGHT, INSIGHT_RUBRIC),
            ],
        }
    }

    pub fn field(&self, name: &str) -> Option<&SchemaField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Render as the JSON-schema object the provider expects.
    pub fn to_json_schema(&self) -> Value {
        let mut properties = Map::new();
        for field in &self.fields {
            properties.insert(
                field.name.to_string(),
                json!({
                    "type": field.field_type,
                    "description": field.description,
                }),
            );
        }

        json!({
            "$schema": JSON_SCHEMA_DRAFT,
            "type": "object",
            "properties": properties,
        })
    }
}
