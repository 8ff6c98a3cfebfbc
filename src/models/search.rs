//! Search request, response envelope and filter models.

use serde::{Deserialize, Serialize};

use crate::models::RegistryRecord;

/// Default number of records requested per page
pub const DEFAULT_LIMIT: usize = 20;

/// Registry search parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Free-text search string
    pub text: String,

    /// 1-based page index
    pub page: u32,

    /// Maximum number of records to return
    pub limit: usize,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            text: String::new(),
            page: 1,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl SearchQuery {
    /// Create a new search query for the first page
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Set the page; pages are 1-based so 0 is clamped to 1
    pub fn page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// Set the page size
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

/// Envelope returned by a registry search
///
/// Serializes as `{ success, data, total, page, error? }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchEnvelope {
    pub success: bool,

    /// Records, truncated to the requested page size
    pub data: Vec<RegistryRecord>,

    /// Estimated total hit count; may exceed `data.len()`
    pub total: usize,

    pub page: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SearchEnvelope {
    /// Successful envelope; records beyond `limit` are dropped
    pub fn success(mut data: Vec<RegistryRecord>, total: usize, page: u32, limit: usize) -> Self {
        data.truncate(limit);
        Self {
            success: true,
            data,
            total,
            page,
            error: None,
        }
    }

    /// Failure envelope with no records and a zero total
    pub fn failure(page: u32, error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: Vec::new(),
            total: 0,
            page,
            error: Some(error.into()),
        }
    }
}

/// Inclusive price bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    pub fn contains(&self, amount: f64) -> bool {
        amount >= self.min && amount <= self.max
    }
}

/// Faceted filter over biomaterials
///
/// Every field left at its default is skipped, so `MaterialFilter::default()`
/// matches everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialFilter {
    /// Case-insensitive free-text query
    #[serde(default)]
    pub query: Option<String>,

    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub subcategory: Option<String>,

    /// Tri-state: unset, must be biodegradable, must not be biodegradable
    #[serde(default)]
    pub biodegradable: Option<bool>,

    /// Only keep biocompatible materials
    #[serde(default)]
    pub biocompatible: bool,

    /// Only keep materials in stock
    #[serde(default)]
    pub in_stock: bool,

    /// Keep materials with at least one of these application tags
    #[serde(default)]
    pub applications: Vec<String>,

    #[serde(default)]
    pub price_range: Option<PriceRange>,
}

impl MaterialFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn subcategory(mut self, subcategory: impl Into<String>) -> Self {
        self.subcategory = Some(subcategory.into());
        self
    }

    pub fn biodegradable(mut self, biodegradable: bool) -> Self {
        self.biodegradable = Some(biodegradable);
        self
    }

    pub fn biocompatible(mut self, required: bool) -> Self {
        self.biocompatible = required;
        self
    }

    pub fn in_stock(mut self, required: bool) -> Self {
        self.in_stock = required;
        self
    }

    pub fn application(mut self, application: impl Into<String>) -> Self {
        self.applications.push(application.into());
        self
    }

    pub fn price_range(mut self, min: f64, max: f64) -> Self {
        self.price_range = Some(PriceRange { min, max });
        self
    }
}
