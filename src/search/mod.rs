//! Search Module
//!
//! Plans provider requests for a specialty and invokes the external
//! content-search provider:
//! - `planner` - query text, recency window, result cap, extraction schema
//! - `provider` - the provider seam (`SearchProvider`) and its raw hit shape
//! - `exa` - HTTP client for the Exa search API

pub mod exa;
pub mod planner;
pub mod provider;

pub use exa::ExaClient;
pub use planner::{plan, PlannerOptions, SearchRequest};
pub use provider::{RawHit, SearchProvider};
