//! Mock source for testing purposes.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::models::{RegistryRecord, RegistryRecordBuilder, SearchEnvelope, SearchQuery};
use crate::sources::{Source, SourceError};

/// A mock source for testing that returns a preset envelope or error.
#[derive(Debug, Default)]
pub struct MockSource {
    response: Mutex<Option<Result<SearchEnvelope, String>>>,
}

impl MockSource {
    /// Create a new mock source.
    pub fn new() -> Self {
        Self {
            response: Mutex::new(None),
        }
    }

    /// Set the envelope to return.
    pub fn set_response(&self, envelope: SearchEnvelope) {
        let mut guard = self.response.lock().unwrap();
        *guard = Some(Ok(envelope));
    }

    /// Make the next searches fail with a network error.
    pub fn set_error(&self, message: impl Into<String>) {
        let mut guard = self.response.lock().unwrap();
        *guard = Some(Err(message.into()));
    }

    /// Clear the configured response.
    pub fn clear_response(&self) {
        let mut guard = self.response.lock().unwrap();
        *guard = None;
    }
}

#[async_trait]
impl Source for MockSource {
    fn id(&self) -> &str {
        "mock"
    }

    fn name(&self) -> &str {
        "Mock Source"
    }

    async fn search_page(&self, query: &SearchQuery) -> Result<SearchEnvelope, SourceError> {
        let guard = self.response.lock().unwrap();
        match &*guard {
            Some(Ok(envelope)) => Ok(envelope.clone()),
            Some(Err(message)) => Err(SourceError::Network(message.clone())),
            None => Ok(SearchEnvelope::success(Vec::new(), 0, query.page, query.limit)),
        }
    }
}

/// Helper function to create a mock registry record for testing.
pub fn make_record(id: &str, name: &str, description: &str) -> RegistryRecord {
    RegistryRecordBuilder::new(id, name, description, "BioOne")
        .url(format!("http://example.com/{}", id))
        .build()
}
