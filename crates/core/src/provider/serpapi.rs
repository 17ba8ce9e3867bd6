//! SerpAPI Google Scholar search backend implementation.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::config::ProviderConfig;

use super::{CandidateResult, ProviderError, SearchProvider};

const USER_AGENT: &str = concat!("ScholarWatcher/", env!("CARGO_PKG_VERSION"));

/// SerpAPI Google Scholar search backend.
pub struct SerpApiProvider {
    client: Client,
    config: ProviderConfig,
}

impl SerpApiProvider {
    /// Create a new SerpApiProvider with the given configuration.
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Build the SerpAPI URL for a keyword search, sorted by date.
    fn build_search_url(&self, keyword: &str, limit: u32) -> String {
        format!(
            "{}?engine=google_scholar&q={}&num={}&scisbd=1&api_key={}",
            self.config.base_url.trim_end_matches('/'),
            urlencoding::encode(keyword),
            limit,
            urlencoding::encode(&self.config.api_key)
        )
    }
}

#[async_trait]
impl SearchProvider for SerpApiProvider {
    async fn search(&self, keyword: &str, limit: u32) -> Result<Vec<CandidateResult>, ProviderError> {
        if self.config.api_key.is_empty() {
            return Err(ProviderError::MissingApiKey);
        }

        let url = self.build_search_url(keyword, limit);
        debug!(keyword = keyword, "Searching SerpAPI Google Scholar");

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout
            } else {
                ProviderError::Transport(e.to_string())
            }
        })?;

        if !response.status().is_success() {
            return Err(ProviderError::Api(format!(
                "HTTP {} from SerpAPI",
                response.status()
            )));
        }

        let body: SerpApiResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))?;

        // SerpAPI reports engine-level failures inside a 200 body.
        if let Some(error) = body.error {
            return Err(ProviderError::Api(error));
        }

        let candidates: Vec<CandidateResult> = body
            .organic_results
            .into_iter()
            .take(limit as usize)
            .map(SerpOrganicResult::into_candidate)
            .collect();

        debug!(
            keyword = keyword,
            count = candidates.len(),
            "SerpAPI search complete"
        );

        Ok(candidates)
    }
}

#[derive(Debug, Deserialize)]
struct SerpApiResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    organic_results: Vec<SerpOrganicResult>,
}

#[derive(Debug, Deserialize)]
struct SerpOrganicResult {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    link: Option<String>,
    #[serde(default)]
    publication_info: Option<SerpPublicationInfo>,
}

#[derive(Debug, Deserialize)]
struct SerpPublicationInfo {
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    authors: Option<Vec<SerpAuthor>>,
}

#[derive(Debug, Deserialize)]
struct SerpAuthor {
    #[serde(default)]
    name: Option<String>,
}

impl SerpOrganicResult {
    fn into_candidate(self) -> CandidateResult {
        let (authors, year) = match self.publication_info {
            Some(info) => {
                let authors = info
                    .authors
                    .unwrap_or_default()
                    .into_iter()
                    .filter_map(|a| a.name)
                    .collect::<Vec<_>>()
                    .join(", ");
                let year = info.summary.as_deref().and_then(extract_year);
                (authors, year.unwrap_or_default())
            }
            None => (String::new(), String::new()),
        };

        CandidateResult {
            title: self.title.unwrap_or_default(),
            url: self.link.unwrap_or_default(),
            authors,
            year,
        }
    }
}

/// Pull a plausible publication year out of a SerpAPI summary line.
///
/// Summaries look like "A Vaswani, N Shazeer - NeurIPS, 2017 - papers.nips.cc";
/// the year is not a dedicated field, so scan for the first standalone
/// 19xx/20xx token.
fn extract_year(summary: &str) -> Option<String> {
    summary
        .split(|c: char| !c.is_ascii_digit())
        .find(|token| {
            token.len() == 4 && (token.starts_with("19") || token.starts_with("20"))
        })
        .map(|token| token.to_string())
}
