//! Result Normalizer
//!
//! Maps one raw provider hit to a [`TrialRecord`]: provenance straight from
//! the hit, extracted fields from the structured summary, then the derived
//! enrollment percentage, recruitment signal and guarded insight.

use super::extract::{extract, ExtractedFields, Extraction};
use super::guardrail;
use super::record::{Endpoints, Enrollment, TrialDetails, TrialRecord};
use super::signal::{derive_signal, enrollment_percentage, SignalInputs};
use crate::search::RawHit;
use crate::specialty::Specialty;
use sha2::{Digest, Sha256};
use tracing::warn;

const ID_MODULUS: u64 = 1_000_000;

/// `trial_<n>` from a SHA-256 of the URL, reduced mod 1,000,000.
/// Stable across processes, but collisions are possible.
pub fn record_id(url: &str) -> String {
    let digest = Sha256::digest(url.as_bytes());
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    format!("trial_{}", u64::from_be_bytes(prefix) % ID_MODULUS)
}

pub fn normalize_hit(hit: &RawHit, specialty: Specialty) -> TrialRecord {
    let details = match extract(hit.summary.as_deref()) {
        Extraction::Parsed(fields) => Some(build_details(fields, hit.author.as_deref())),
        Extraction::Absent => None,
        Extraction::Malformed(e) => {
            warn!(url = %hit.url, error = %e, "Dropping malformed structured summary");
            None
        }
    };

    TrialRecord {
        id: record_id(&hit.url),
        title: hit.title.clone(),
        url: hit.url.clone(),
        published_date: hit.published_date.clone(),
        author: hit.author.clone(),
        specialty,
        details,
    }
}

fn build_details(fields: ExtractedFields, author: Option<&str>) -> TrialDetails {
    let target = fields.enrollment_target.unwrap_or(0.0);
    let achieved = fields.enrollment_achieved.unwrap_or(0.0);
    let percentage = enrollment_percentage(target, achieved);
    let recruitment_status = fields.recruitment_status.unwrap_or_default();

    let recruitment_signal = derive_signal(SignalInputs {
        provider_signal: fields.recruitment_signal.as_deref(),
        recruitment_status: &recruitment_status,
        target,
        achieved,
        percentage,
    });

    let insight = guardrail::apply(
        fields.insight.unwrap_or_default(),
        &recruitment_status,
        target,
        achieved,
    );

    TrialDetails {
        nct_id: fields.nct_id.unwrap_or_default(),
        sponsor: fields.sponsor.unwrap_or_else(|| {
            author
                .filter(|a| !a.trim().is_empty())
                .unwrap_or("Unknown")
                .to_string()
        }),
        phase: fields.phase.unwrap_or_else(|| "Unknown".to_string()),
        enrollment: Enrollment {
            target,
            achieved,
            percentage,
        },
        endpoints: Endpoints {
            primary: fields.primary_endpoint.unwrap_or_default(),
        },
        geography: fields.geography.unwrap_or_default(),
        investigator: fields.investigator.unwrap_or_default(),
        site: fields.site.unwrap_or_default(),
        recruitment_status,
        biomarkers: fields.biomarkers.unwrap_or_default(),
        summary: fields.summary.unwrap_or_default(),
        insight,
        recruitment_signal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trials::signal::RecruitmentSignal;
    use serde_json::json;

    fn hit_with_summary(summary: Option<String>) -> RawHit {
        RawHit {
            url: "https://clinicaltrials.gov/study/NCT05000001".to_string(),
            title: Some("A Phase III Study of Drug X".to_string()),
            published_date: Some("2025-03-01T00:00:00.000Z".to_string()),
            author: Some("Acme Oncology".to_string()),
            summary,
        }
    }

    #[test]
    fn test_record_id_is_deterministic_and_bounded() {
        let a = record_id("https://example.org/trial/1");
        assert_eq!(a, record_id("https://example.org/trial/1"));
        let n: u64 = a.strip_prefix("trial_").unwrap().parse().unwrap();
        assert!(n < ID_MODULUS);
        assert_ne!(a, record_id("https://example.org/trial/2"));
    }

    #[test]
    fn test_full_payload() {
        let summary = json!({
            "nct_id": "NCT05000001",
            "sponsor": "Big Pharma",
            "phase": "Phase III",
            "enrollment_target": 120,
            "enrollment_achieved": 90,
            "primary_endpoint": "Overall survival",
            "geography": "United States",
            "investigator": "Dr. Rivera",
            "site": "UCLA",
            "recruitment_status": "Recruiting",
            "biomarkers": "HER2",
            "summary": "Phase III HER2+ trial, recruiting.",
            "insight": "Yes, because enrollment is on track in SoCal."
        })
        .to_string();

        let record = normalize_hit(&hit_with_summary(Some(summary)), Specialty::Oncology);
        let details = record.details.as_ref().unwrap();

        assert_eq!(details.nct_id, "NCT05000001");
        assert_eq!(details.sponsor, "Big Pharma");
        assert_eq!(details.enrollment.percentage, 75.0);
        assert_eq!(details.endpoints.primary, "Overall survival");
        assert_eq!(details.recruitment_signal, Some(RecruitmentSignal::Moderate));
        assert_eq!(details.insight, "Yes, because enrollment is on track in SoCal.");
        assert_eq!(record.title.as_deref(), Some("A Phase III Study of Drug X"));
        assert_eq!(record.specialty, Specialty::Oncology);
    }

    #[test]
    fn test_defaults_for_missing_fields() {
        let record = normalize_hit(&hit_with_summary(Some("{}".to_string())), Specialty::Neurology);
        let details = record.details.unwrap();
        assert_eq!(details.sponsor, "Acme Oncology");
        assert_eq!(details.phase, "Unknown");
        assert_eq!(details.nct_id, "");
        assert_eq!(details.enrollment.target, 0.0);
        assert_eq!(details.enrollment.percentage, 0.0);
        assert_eq!(details.insight, "");
        assert!(details.recruitment_signal.is_none());
    }

    #[test]
    fn test_sponsor_falls_back_to_unknown_without_author() {
        let mut hit = hit_with_summary(Some("{}".to_string()));
        hit.author = None;
        let record = normalize_hit(&hit, Specialty::Neurology);
        assert_eq!(record.details.unwrap().sponsor, "Unknown");
    }

    #[test]
    fn test_sponsor_falls_back_to_unknown_for_blank_author() {
        let mut hit = hit_with_summary(Some("{}".to_string()));
        hit.author = Some(String::new());
        let record = normalize_hit(&hit, Specialty::Neurology);
        assert_eq!(record.details.unwrap().sponsor, "Unknown");

        hit.author = Some("  ".to_string());
        let record = normalize_hit(&hit, Specialty::Neurology);
        assert_eq!(record.details.unwrap().sponsor, "Unknown");
    }

    #[test]
    fn test_guardrail_applies_to_fully_enrolled_recruiting_trial() {
        let summary = json!({
            "recruitment_status": "Recruiting",
            "enrollment_target": 100,
            "enrollment_achieved": 100,
            "insight": "Yes, because the trial is actively recruiting."
        })
        .to_string();

        let record = normalize_hit(&hit_with_summary(Some(summary)), Specialty::Cardiology);
        assert_eq!(record.insight(), Some("No, because the trial is Recruiting and fully enrolled."));
        assert_eq!(record.recruitment_signal(), Some(RecruitmentSignal::Strong));
    }

    #[test]
    fn test_terminated_trial_fails_and_is_refused() {
        let summary = json!({
            "recruitment_status": "Terminated",
            "enrollment_target": 200,
            "enrollment_achieved": 30,
            "insight": "Yes, because the sponsor is strong."
        })
        .to_string();

        let record = normalize_hit(&hit_with_summary(Some(summary)), Specialty::Hematology);
        assert_eq!(record.recruitment_signal(), Some(RecruitmentSignal::Failed));
        assert_eq!(record.insight(), Some("No, because the trial is Terminated."));
    }

    #[test]
    fn test_malformed_summary_degrades_to_provenance() {
        let record = normalize_hit(
            &hit_with_summary(Some("{\"phase\": \"Phase II\"".to_string())),
            Specialty::Radiology,
        );
        assert!(record.is_degraded());
        assert_eq!(record.url, "https://clinicaltrials.gov/study/NCT05000001");
        assert_eq!(record.author.as_deref(), Some("Acme Oncology"));
        assert!(record.recruitment_signal().is_none());
    }

    #[test]
    fn test_serialized_shape() {
        let summary = json!({
            "nct_id": "NCT1",
            "enrollment_target": 10,
            "enrollment_achieved": 9,
            "recruitment_status": "Recruiting"
        })
        .to_string();
        let record = normalize_hit(&hit_with_summary(Some(summary)), Specialty::Oncology);
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["specialty"], "oncology");
        assert_eq!(value["published_date"], "2025-03-01T00:00:00.000Z");
        assert_eq!(value["nctId"], "NCT1");
        assert_eq!(value["recruitmentStatus"], "Recruiting");
        assert_eq!(value["enrollment"]["target"], json!(10));
        assert!(value["enrollment"]["achieved"].is_i64());
        assert_eq!(value["enrollment"]["percentage"], 90.0);
        assert_eq!(value["endpoints"]["primary"], "");
        assert_eq!(value["recruitmentSignal"], "strong");
    }

    #[test]
    fn test_fractional_enrollment_stays_float() {
        let summary = json!({"enrollment_target": 12.5, "enrollment_achieved": "1,200"}).to_string();
        let record = normalize_hit(&hit_with_summary(Some(summary)), Specialty::Oncology);
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["enrollment"]["target"], json!(12.5));
        assert_eq!(value["enrollment"]["achieved"], json!(1200));
    }

    #[test]
    fn test_degraded_record_serializes_provenance_only() {
        let record = normalize_hit(&hit_with_summary(None), Specialty::Oncology);
        let value = serde_json::to_value(&record).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();

        for key in ["id", "title", "url", "published_date", "author", "specialty"] {
            assert!(keys.contains(&key), "missing {key}");
        }
        assert_eq!(keys.len(), 6);
    }
}
