//! Material registry sources.
//!
//! This module defines the [`Source`] trait that registry integrations
//! implement. A source only has to provide [`Source::search_page`], the
//! fallible fetch-and-extract step; [`Source::search`] wraps it so callers
//! always get a [`SearchEnvelope`] back, with transport failures reported in
//! the envelope instead of as an error.
//!
//! # Sources
//!
//! - [`BioOneSource`] - scrapes the BioOne (`www.bioone.re.kr`) integrated search page
//! - [`MockSource`] - returns a preset envelope, for tests
//!
//! # Example
//!
//! ```rust,no_run
//! use biomaterial_finder::models::SearchQuery;
//! use biomaterial_finder::sources::{BioOneSource, Source};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let source = BioOneSource::new()?;
//! let envelope = source.search(&SearchQuery::new("bacillus").limit(10)).await;
//! if envelope.success {
//!     println!("{} of {} records", envelope.data.len(), envelope.total);
//! }
//! # Ok(())
//! # }
//! ```

mod bioone;
pub mod mock;

pub use bioone::{BioOneSource, BIOONE_BASE_URL};
pub use mock::MockSource;

use crate::models::{SearchEnvelope, SearchQuery};
use async_trait::async_trait;

/// The Source trait defines the interface for all registry sources.
#[async_trait]
pub trait Source: Send + Sync + std::fmt::Debug {
    /// Unique identifier for this source (e.g., "bioone")
    fn id(&self) -> &str;

    /// Human-readable name of this source
    fn name(&self) -> &str;

    /// Fetch one page of results and extract its records.
    ///
    /// Per-record extraction problems are absorbed here; only transport and
    /// whole-response failures come back as errors.
    async fn search_page(&self, query: &SearchQuery) -> Result<SearchEnvelope, SourceError>;

    /// Search, reporting any failure inside the returned envelope
    async fn search(&self, query: &SearchQuery) -> SearchEnvelope {
        match self.search_page(query).await {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::warn!(source = self.id(), query = %query.text, error = %e, "Registry search failed");
                SearchEnvelope::failure(query.page, e.to_string())
            }
        }
    }
}

/// Errors that can occur when interacting with a source
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Network or HTTP error
    #[error("Network error: {0}")]
    Network(String),

    /// Non-success response from the source
    #[error("API error: {0}")]
    Api(String),

    /// Parsing error (HTML, selectors, etc.)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid request parameters
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        SourceError::Network(err.to_string())
    }
}
