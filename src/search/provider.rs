use super::planner::SearchRequest;
use crate::types::AppResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One search result before normalization
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawHit {
    pub url: String,
    pub title: Option<String>,
    pub published_date: Option<String>,
    pub author: Option<String>,
    /// Expected to hold a JSON object matching the extraction schema, but
    /// neither parseability nor completeness is guaranteed.
    pub summary: Option<String>,
}

/// External content-search provider. Called once per lookup; failures are
/// not retried here.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search_and_contents(&self, request: &SearchRequest) -> AppResult<Vec<RawHit>>;

    fn name(&self) -> &'static str;
}
