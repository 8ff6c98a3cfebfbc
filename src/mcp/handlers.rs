//! Tool handlers backed by the discovery service.

use std::sync::Arc;

use serde_json::{json, Value};

use super::tools::ToolHandler;
use crate::catalog::{cluster_query, APPLICATIONS, CATEGORIES, CLUSTERS, POPULAR_KEYWORDS};
use crate::filter::Facets;
use crate::models::MaterialFilter;
use crate::service::DiscoveryService;

fn to_json<T: serde::Serialize>(value: &T) -> Result<Value, String> {
    serde_json::to_value(value).map_err(|e| format!("Failed to serialize result: {}", e))
}

fn optional_str<'a>(args: &'a Value, key: &str) -> Option<&'a str> {
    args.get(key)
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn optional_bool(args: &Value, key: &str) -> Result<Option<bool>, String> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v
            .as_bool()
            .map(Some)
            .ok_or_else(|| format!("'{}' must be a boolean", key)),
    }
}

fn optional_number(args: &Value, key: &str) -> Result<Option<f64>, String> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v
            .as_f64()
            .map(Some)
            .ok_or_else(|| format!("'{}' must be a number", key)),
    }
}

/// Build a [`MaterialFilter`] from tool arguments; `query` is left to the caller
pub(crate) fn parse_filter(args: &Value) -> Result<MaterialFilter, String> {
    let mut filter = MaterialFilter::new();

    if let Some(category) = optional_str(args, "category") {
        filter = filter.category(category);
    }
    if let Some(subcategory) = optional_str(args, "subcategory") {
        filter = filter.subcategory(subcategory);
    }
    if let Some(biodegradable) = optional_bool(args, "biodegradable")? {
        filter = filter.biodegradable(biodegradable);
    }
    if let Some(biocompatible) = optional_bool(args, "biocompatible")? {
        filter = filter.biocompatible(biocompatible);
    }
    if let Some(in_stock) = optional_bool(args, "in_stock")? {
        filter = filter.in_stock(in_stock);
    }

    if let Some(applications) = args.get("applications").and_then(|v| v.as_array()) {
        for application in applications.iter().filter_map(|a| a.as_str()) {
            filter = filter.application(application);
        }
    }

    let min = optional_number(args, "min_price")?;
    let max = optional_number(args, "max_price")?;
    if min.is_some() || max.is_some() {
        let min = min.unwrap_or(0.0);
        let max = max.unwrap_or(f64::MAX);
        if min > max {
            return Err("'min_price' must not exceed 'max_price'".to_string());
        }
        filter = filter.price_range(min, max);
    }

    Ok(filter)
}

/// Handler for a single page of raw registry results
#[derive(Debug)]
pub struct SearchRegistryHandler {
    pub service: Arc<DiscoveryService>,
}

#[async_trait::async_trait]
impl ToolHandler for SearchRegistryHandler {
    async fn execute(&self, args: Value) -> Result<Value, String> {
        let query = match (optional_str(&args, "query"), optional_str(&args, "cluster")) {
            (Some(query), _) => query.to_string(),
            (None, Some(cluster)) => cluster_query(cluster),
            (None, None) => return Err("Missing 'query' parameter".to_string()),
        };

        let page = args
            .get("page")
            .and_then(|v| v.as_u64())
            .map(|p| u32::try_from(p).unwrap_or(u32::MAX))
            .unwrap_or(1);

        let limit = args
            .get("limit")
            .and_then(|v| v.as_u64())
            .map(|l| l as usize)
            .unwrap_or_else(|| self.service.default_limit());

        let envelope = self.service.search(&query, page, limit).await;
        to_json(&envelope)
    }
}

/// Handler filtering the built-in catalog
#[derive(Debug)]
pub struct SearchMaterialsHandler {
    pub service: Arc<DiscoveryService>,
}

#[async_trait::async_trait]
impl ToolHandler for SearchMaterialsHandler {
    async fn execute(&self, args: Value) -> Result<Value, String> {
        let mut filter = parse_filter(&args)?;
        if let Some(query) = optional_str(&args, "query") {
            filter = filter.query(query);
        }

        let materials = self.service.filter(&filter);
        Ok(json!({
            "total": materials.len(),
            "facets": Facets::collect(&materials),
            "materials": materials,
        }))
    }
}

/// Handler for the full discovery pipeline
#[derive(Debug)]
pub struct DiscoverHandler {
    pub service: Arc<DiscoveryService>,
}

#[async_trait::async_trait]
impl ToolHandler for DiscoverHandler {
    async fn execute(&self, args: Value) -> Result<Value, String> {
        let query = args
            .get("query")
            .and_then(|v| v.as_str())
            .ok_or("Missing 'query' parameter")?;

        let filter = parse_filter(&args)?;
        let discovery = self.service.discover(query, filter).await;
        to_json(&discovery)
    }
}

/// Handler producing a summary for a query
#[derive(Debug)]
pub struct SummarizeSearchHandler {
    pub service: Arc<DiscoveryService>,
}

#[async_trait::async_trait]
impl ToolHandler for SummarizeSearchHandler {
    async fn execute(&self, args: Value) -> Result<Value, String> {
        let query = optional_str(&args, "query").ok_or("Missing 'query' parameter")?;

        let context = match args.get("context") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => Some(
                serde_json::to_string_pretty(other)
                    .map_err(|e| format!("Invalid 'context': {}", e))?,
            ),
        };

        let summary = self.service.summarize(query, context.as_deref()).await;
        to_json(&summary)
    }
}

/// Handler listing the catalog with its vocabularies
#[derive(Debug)]
pub struct ListCatalogHandler {
    pub service: Arc<DiscoveryService>,
}

#[async_trait::async_trait]
impl ToolHandler for ListCatalogHandler {
    async fn execute(&self, _args: Value) -> Result<Value, String> {
        let materials = self.service.catalog();
        let clusters: Vec<Value> = CLUSTERS
            .iter()
            .map(|(name, slug)| json!({ "name": name, "slug": slug }))
            .collect();

        Ok(json!({
            "facets": Facets::collect(materials),
            "materials": materials,
            "categories": CATEGORIES,
            "applications": APPLICATIONS,
            "popularKeywords": POPULAR_KEYWORDS,
            "clusters": clusters,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filter_full() {
        let filter = parse_filter(&json!({
            "category": "배양세포주",
            "subcategory": " ",
            "biodegradable": false,
            "biocompatible": true,
            "in_stock": true,
            "applications": ["백신 개발", 3],
            "min_price": 100,
        }))
        .unwrap();

        assert_eq!(filter.category.as_deref(), Some("배양세포주"));
        assert_eq!(filter.subcategory, None);
        assert_eq!(filter.biodegradable, Some(false));
        assert!(filter.biocompatible);
        assert!(filter.in_stock);
        assert_eq!(filter.applications, vec!["백신 개발".to_string()]);
        let range = filter.price_range.unwrap();
        assert_eq!(range.min, 100.0);
        assert_eq!(range.max, f64::MAX);
        assert_eq!(filter.query, None);
    }

    #[test]
    fn test_parse_filter_rejects_bad_types() {
        assert!(parse_filter(&json!({ "biodegradable": "yes" })).is_err());
        assert!(parse_filter(&json!({ "min_price": "cheap" })).is_err());
        assert!(parse_filter(&json!({ "min_price": 10, "max_price": 1 })).is_err());
    }

    #[test]
    fn test_parse_filter_empty() {
        assert_eq!(parse_filter(&json!({})).unwrap(), MaterialFilter::default());
    }
}
