//! Discovery: registry search, catalog merge, filtering and summary in one call.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::catalog::sample_biomaterials;
use crate::config::Config;
use crate::filter::{filter_materials, Facets};
use crate::models::{Biomaterial, MaterialFilter, SearchEnvelope, SearchQuery};
use crate::normalize::normalize_record;
use crate::sources::{BioOneSource, Source, SourceError};
use crate::summarize::{AiSummary, GeminiClient, GeminiSummarizer, OfflineSummarizer, Summarizer};
use crate::utils::HttpClient;

/// Result of one discovery request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discovery {
    pub query: String,

    /// Raw registry response for the query
    pub envelope: SearchEnvelope,

    /// Catalog and registry materials left after filtering
    pub materials: Vec<Biomaterial>,

    pub facets: Facets,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<AiSummary>,
}

/// Ties a registry source, a summarizer and the built-in catalog together
#[derive(Debug, Clone)]
pub struct DiscoveryService {
    source: Arc<dyn Source>,
    summarizer: Arc<dyn Summarizer>,
    catalog: Vec<Biomaterial>,
    default_limit: usize,
}

impl DiscoveryService {
    pub fn new(source: Arc<dyn Source>, summarizer: Arc<dyn Summarizer>) -> Self {
        Self {
            source,
            summarizer,
            catalog: sample_biomaterials(),
            default_limit: crate::models::DEFAULT_LIMIT,
        }
    }

    /// Build the BioOne-backed service described by `config`.
    ///
    /// Without an API key summaries come from the offline template.
    pub fn from_config(config: &Config) -> Result<Self, SourceError> {
        let client = HttpClient::with_timeout(config.registry.timeout())?;
        let source = BioOneSource::with_client(client.clone())?;

        let summarizer: Arc<dyn Summarizer> = if config.gemini.has_api_key() {
            Arc::new(GeminiSummarizer::new(GeminiClient::new(&config.gemini, client)))
        } else {
            tracing::info!("No Gemini API key configured, summaries use the offline template");
            Arc::new(OfflineSummarizer)
        };

        Ok(Self::new(Arc::new(source), summarizer).with_default_limit(config.registry.default_limit))
    }

    pub fn with_catalog(mut self, catalog: Vec<Biomaterial>) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_default_limit(mut self, limit: usize) -> Self {
        self.default_limit = limit;
        self
    }

    pub fn source(&self) -> &dyn Source {
        self.source.as_ref()
    }

    pub fn catalog(&self) -> &[Biomaterial] {
        &self.catalog
    }

    pub fn default_limit(&self) -> usize {
        self.default_limit
    }

    /// One page of registry results; failures are reported in the envelope
    pub async fn search(&self, query: &str, page: u32, limit: usize) -> SearchEnvelope {
        let query = SearchQuery::new(query).page(page).limit(limit);
        self.source.search(&query).await
    }

    /// Filter the built-in catalog
    pub fn filter(&self, filter: &MaterialFilter) -> Vec<Biomaterial> {
        filter_materials(&self.catalog, filter)
    }

    pub async fn summarize(&self, query: &str, context: Option<&str>) -> AiSummary {
        self.summarizer.summarize(query, context).await
    }

    /// Search the registry for `query`, merge the hits into the catalog and
    /// filter the result.
    ///
    /// A blank query skips the registry and the summary and only filters the
    /// catalog.
    pub async fn discover(&self, query: &str, filter: MaterialFilter) -> Discovery {
        let query = query.trim();

        if query.is_empty() {
            let materials = self.filter(&filter);
            return Discovery {
                query: String::new(),
                envelope: SearchEnvelope::success(Vec::new(), 0, 1, self.default_limit),
                facets: Facets::collect(&materials),
                materials,
                summary: None,
            };
        }

        let envelope = self.search(query, 1, self.default_limit).await;

        let mut merged = self.catalog.clone();
        if envelope.success {
            merged.extend(envelope.data.iter().map(normalize_record));
        }

        let materials = filter_materials(&merged, &filter.query(query));
        tracing::debug!(
            query,
            registry = envelope.data.len(),
            matched = materials.len(),
            "Discovery filtered"
        );

        let context = serde_json::to_string_pretty(&envelope.data).unwrap_or_default();
        let summary = self.summarize(query, Some(&context)).await;

        Discovery {
            query: query.to_string(),
            facets: Facets::collect(&materials),
            envelope,
            materials,
            summary: Some(summary),
        }
    }
}
