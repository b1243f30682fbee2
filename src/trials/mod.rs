//! Trial normalization and triage
//!
//! Converts raw search hits into canonical trial records and assembles the
//! per-specialty response:
//! - `extract` - parse the provider's embedded structured summary
//! - `signal` - enrollment percentage and recruitment signal
//! - `guardrail` - deterministic override of the provider's recommendation
//! - `normalizer` - one hit → one `TrialRecord`
//! - `response` - final payload assembly
//! - `service` - the end-to-end lookup used by routes and the CLI

pub mod extract;
pub mod guardrail;
pub mod normalizer;
pub mod record;
pub mod response;
pub mod service;
pub mod signal;

pub use record::{Endpoints, Enrollment, TrialDetails, TrialRecord};
pub use response::{assemble, TrialSearchResponse};
pub use service::TrialSearchService;
pub use signal::RecruitmentSignal;
