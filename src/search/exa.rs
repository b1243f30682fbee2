//! Exa API Client
//!
//! Implements [`SearchProvider`] against Exa's `/search` endpoint with
//! structured summaries: every result comes back with a `summary` string that
//! the provider produced by filling in the request's extraction schema.
//!
//! API Reference: https://docs.exa.ai/reference/search

use super::planner::SearchRequest;
use super::provider::{RawHit, SearchProvider};
use crate::config::SearchConfig;
use crate::types::{AppError, AppResult};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

const EXA_API_BASE: &str = "https://api.exa.ai";

pub struct ExaClient {
    client: Client,
    api_key: String,
    base_url: String,
}

// Request types for the Exa API
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExaSearchBody<'a> {
    query: &'a str,
    #[serde(rename = "type")]
    search_type: &'a str,
    num_results: u32,
    start_published_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    include_domains: Option<&'a [String]>,
    contents: ExaContents<'a>,
}

#[derive(Serialize)]
struct ExaContents<'a> {
    summary: ExaSummaryOptions,
    livecrawl: &'a str,
}

#[derive(Serialize)]
struct ExaSummaryOptions {
    schema: serde_json::Value,
}

// Response types for the Exa API
#[derive(Deserialize)]
struct ExaSearchResponse {
    #[serde(default)]
    results: Vec<ExaResult>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExaResult {
    #[serde(default)]
    url: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    published_date: Option<String>,
    #[serde(default)]
    author: Option<String>,
    #[serde(default)]
    summary: Option<serde_json::Value>,
}

impl From<ExaResult> for RawHit {
    fn from(result: ExaResult) -> Self {
        // Structured summaries normally arrive as a JSON string; an inline
        // object is re-encoded so the normalizer sees one representation.
        let summary = match result.summary {
            None | Some(serde_json::Value::Null) => None,
            Some(serde_json::Value::String(text)) => Some(text),
            Some(other) => Some(other.to_string()),
        };

        RawHit {
            url: result.url,
            title: result.title,
            published_date: result.published_date,
            author: result.author,
            summary,
        }
    }
}

impl ExaClient {
    /// Create a client against the public Exa endpoint
    pub fn new(api_key: &str) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.to_string(),
            base_url: EXA_API_BASE.to_string(),
        }
    }

    /// Point the client at a different endpoint (proxies, tests)
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Build a client from configuration. `Ok(None)` when no API key is set.
    pub fn from_config(config: &SearchConfig) -> AppResult<Option<Self>> {
        let Some(api_key) = config.exa_api_key.as_deref() else {
            return Ok(None);
        };

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Some(
            Self {
                client,
                api_key: api_key.to_string(),
                base_url: EXA_API_BASE.to_string(),
            }
            .with_base_url(&config.exa_base_url),
        ))
    }

    fn build_body<'a>(request: &'a SearchRequest) -> ExaSearchBody<'a> {
        ExaSearchBody {
            query: &request.query,
            search_type: request.retrieval_mode,
            num_results: request.num_results,
            start_published_date: request.recency_cutoff_iso(),
            include_domains: request.include_domains.as_deref(),
            contents: ExaContents {
                summary: ExaSummaryOptions {
                    schema: request.schema.to_json_schema(),
                },
                livecrawl: request.livecrawl,
            },
        }
    }
}

#[async_trait]
impl SearchProvider for ExaClient {
    async fn search_and_contents(&self, request: &SearchRequest) -> AppResult<Vec<RawHit>> {
        info!(
            specialty = %request.specialty,
            query = %request.query,
            cutoff = %request.recency_cutoff_iso(),
            "Searching Exa"
        );

        let response = self
            .client
            .post(format!("{}/search", self.base_url))
            .header("x-api-key", &self.api_key)
            .json(&Self::build_body(request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ProviderCallFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let payload: ExaSearchResponse = response.json().await?;
        debug!(count = payload.results.len(), "Raw Exa response received");

        Ok(payload.results.into_iter().map(RawHit::from).collect())
    }

    fn name(&self) -> &'static str {
        "exa"
    }
}
