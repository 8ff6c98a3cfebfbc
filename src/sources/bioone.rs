//! BioOne registry source implementation.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::extract::{FlagRules, MarkupExtractor};
use crate::models::{SearchEnvelope, SearchQuery};
use crate::sources::{Source, SourceError};
use crate::utils::HttpClient;

/// BioOne site root
pub const BIOONE_BASE_URL: &str = "https://www.bioone.re.kr";

const SOURCE_NAME: &str = "BioOne";

/// BioOne integrated search
///
/// BioOne has no public API, so results are scraped from the HTML search
/// page. One call fetches exactly one page; there is no retry.
#[derive(Debug, Clone)]
pub struct BioOneSource {
    client: Arc<HttpClient>,
    base_url: String,
    extractor: MarkupExtractor,
}

impl BioOneSource {
    pub fn new() -> Result<Self, SourceError> {
        Self::with_client(HttpClient::new()?)
    }

    /// Create a source whose HTTP client uses the given timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self, SourceError> {
        Self::with_client(HttpClient::with_timeout(timeout)?)
    }

    pub fn with_client(client: HttpClient) -> Result<Self, SourceError> {
        Ok(Self {
            client: Arc::new(client),
            base_url: BIOONE_BASE_URL.to_string(),
            extractor: MarkupExtractor::new(BIOONE_BASE_URL, SOURCE_NAME)?,
        })
    }

    /// Point the source at another host serving the same markup
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self, SourceError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        url::Url::parse(&base_url)
            .map_err(|e| SourceError::InvalidRequest(format!("Invalid base URL '{}': {}", base_url, e)))?;
        let flags = self.extractor.flag_rules().clone();
        self.extractor = MarkupExtractor::new(base_url.clone(), SOURCE_NAME)?.with_flag_rules(flags);
        self.base_url = base_url;
        Ok(self)
    }

    /// Replace the property flag rules used during extraction
    pub fn with_flag_rules(mut self, flags: FlagRules) -> Self {
        self.extractor = self.extractor.with_flag_rules(flags);
        self
    }

    /// Build the search page URL for a query
    pub fn search_url(&self, query: &SearchQuery) -> String {
        format!(
            "{}/search?searchQuery={}&searchField=ALL&pageIndex={}&pageSize={}&searchAll=Y",
            self.base_url,
            urlencoding::encode(&query.text),
            query.page.max(1),
            query.limit
        )
    }
}

#[async_trait]
impl Source for BioOneSource {
    fn id(&self) -> &str {
        "bioone"
    }

    fn name(&self) -> &str {
        SOURCE_NAME
    }

    async fn search_page(&self, query: &SearchQuery) -> Result<SearchEnvelope, SourceError> {
        let url = self.search_url(query);
        tracing::info!(query = %query.text, page = query.page, "Starting BioOne search");
        tracing::debug!(%url, "BioOne request");

        let response = self
            .client
            .browser_get(&url)
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to search BioOne: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Api(format!("BioOne returned status: {}", status)));
        }

        let html = response
            .text()
            .await
            .map_err(|e| SourceError::Parse(format!("Failed to read HTML: {}", e)))?;

        let extraction = self.extractor.extract(&html, &query.text, &url);

        tracing::info!(
            total = extraction.total,
            parsed = extraction.records.len(),
            pass = ?extraction.pass,
            "BioOne search finished"
        );

        Ok(SearchEnvelope::success(
            extraction.records,
            extraction.total,
            query.page.max(1),
            query.limit,
        ))
    }
}
