//! Tool registry for MCP tools.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::service::DiscoveryService;

pub use super::handlers::{
    DiscoverHandler, ListCatalogHandler, SearchMaterialsHandler, SearchRegistryHandler,
    SummarizeSearchHandler,
};

/// An MCP tool that can be called by the client
#[derive(Clone)]
pub struct Tool {
    /// Tool name (e.g., "search_registry")
    pub name: String,

    /// Human-readable description
    pub description: String,

    /// JSON Schema for input parameters
    pub input_schema: serde_json::Value,

    /// Handler function to execute the tool
    pub handler: Arc<dyn ToolHandler>,
}

impl std::fmt::Debug for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tool")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("input_schema", &self.input_schema)
            .finish()
    }
}

/// Handler for executing a tool
#[async_trait::async_trait]
pub trait ToolHandler: Send + Sync + std::fmt::Debug {
    /// Execute the tool with the given arguments
    async fn execute(&self, args: Value) -> Result<Value, String>;
}

/// Filter properties shared by `search_materials` and `discover`
fn filter_properties() -> serde_json::Map<String, Value> {
    let schema = serde_json::json!({
        "category": {
            "type": "string",
            "description": "Exact category (e.g., '생분해성 플라스틱', '배양세포주')"
        },
        "subcategory": {
            "type": "string",
            "description": "Exact subcategory (e.g., '줄기세포')"
        },
        "biodegradable": {
            "type": "boolean",
            "description": "Require biodegradable (true) or non-biodegradable (false) materials"
        },
        "biocompatible": {
            "type": "boolean",
            "description": "Only biocompatible materials"
        },
        "in_stock": {
            "type": "boolean",
            "description": "Only materials currently available"
        },
        "applications": {
            "type": "array",
            "items": { "type": "string" },
            "description": "Keep materials with at least one of these applications"
        },
        "min_price": {
            "type": "number",
            "description": "Minimum price, inclusive"
        },
        "max_price": {
            "type": "number",
            "description": "Maximum price, inclusive"
        }
    });

    match schema {
        Value::Object(map) => map,
        _ => serde_json::Map::new(),
    }
}

/// Registry for all MCP tools
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    tools: HashMap<String, Tool>,
}

impl ToolRegistry {
    /// Create a tool registry with every discovery tool registered
    pub fn from_service(service: Arc<DiscoveryService>) -> Self {
        let mut registry = Self {
            tools: HashMap::new(),
        };
        registry.register_discovery_tools(&service);
        registry
    }

    fn register_discovery_tools(&mut self, service: &Arc<DiscoveryService>) {
        // 1. search_registry - one page of raw BioOne results
        self.register(Tool {
            name: "search_registry".to_string(),
            description: format!(
                "Search the {} biomaterial registry and return one page of raw records",
                service.source().name()
            ),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Search query string"
                    },
                    "cluster": {
                        "type": "string",
                        "description": "Material cluster to search when no query is given (e.g., '미생물', '줄기세포')"
                    },
                    "page": {
                        "type": "integer",
                        "description": "1-based page index",
                        "default": 1
                    },
                    "limit": {
                        "type": "integer",
                        "description": "Maximum number of records",
                        "default": service.default_limit()
                    }
                }
            }),
            handler: Arc::new(SearchRegistryHandler {
                service: service.clone(),
            }),
        });

        // 2. search_materials - filter the built-in catalog
        let mut properties = filter_properties();
        properties.insert(
            "query".to_string(),
            serde_json::json!({
                "type": "string",
                "description": "Case-insensitive text matched against name, description, category, subcategory and applications"
            }),
        );
        self.register(Tool {
            name: "search_materials".to_string(),
            description: "Filter the built-in biomaterial catalog by text, category, properties, applications and price".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": properties,
            }),
            handler: Arc::new(SearchMaterialsHandler {
                service: service.clone(),
            }),
        });

        // 3. discover - registry search merged with the catalog, plus summary
        let mut properties = filter_properties();
        properties.insert(
            "query".to_string(),
            serde_json::json!({
                "type": "string",
                "description": "Search query; an empty query only filters the catalog"
            }),
        );
        self.register(Tool {
            name: "discover".to_string(),
            description: "Search the registry, merge the results with the catalog, filter them and summarize the query".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": properties,
                "required": ["query"]
            }),
            handler: Arc::new(DiscoverHandler {
                service: service.clone(),
            }),
        });

        // 4. summarize_search - expert summary for a query
        self.register(Tool {
            name: "summarize_search".to_string(),
            description: "Generate an expert summary for a biomaterial query, with suggested materials".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Search query to summarize"
                    },
                    "context": {
                        "description": "Optional search results (string or JSON) used as reference material"
                    }
                },
                "required": ["query"]
            }),
            handler: Arc::new(SummarizeSearchHandler {
                service: service.clone(),
            }),
        });

        // 5. list_catalog - catalog and vocabularies
        self.register(Tool {
            name: "list_catalog".to_string(),
            description: "List the built-in catalog with facets, categories, applications, clusters and popular keywords".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {}
            }),
            handler: Arc::new(ListCatalogHandler {
                service: service.clone(),
            }),
        });
    }

    /// Register a tool
    pub fn register(&mut self, tool: Tool) {
        self.tools.insert(tool.name.clone(), tool);
    }

    /// Get all tools
    pub fn all(&self) -> Vec<&Tool> {
        self.tools.values().collect()
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<&Tool> {
        self.tools.get(name)
    }

    /// Execute a tool by name
    pub async fn execute(&self, name: &str, args: Value) -> Result<Value, String> {
        let tool = self
            .get(name)
            .ok_or_else(|| format!("Tool '{}' not found", name))?;

        tool.handler.execute(args).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SearchEnvelope;
    use crate::sources::mock::make_record;
    use crate::sources::MockSource;
    use crate::summarize::OfflineSummarizer;
    use serde_json::json;

    fn registry_with(source: MockSource) -> ToolRegistry {
        let service = DiscoveryService::new(Arc::new(source), Arc::new(OfflineSummarizer));
        ToolRegistry::from_service(Arc::new(service))
    }

    fn registry() -> ToolRegistry {
        registry_with(MockSource::new())
    }

    #[test]
    fn test_all_tools_registered() {
        let registry = registry();
        let mut names: Vec<&str> = registry.all().iter().map(|t| t.name.as_str()).collect();
        names.sort_unstable();
        assert_eq!(
            names,
            vec!["discover", "list_catalog", "search_materials", "search_registry", "summarize_search"]
        );

        let discover = registry.get("discover").unwrap();
        assert_eq!(discover.input_schema["required"], json!(["query"]));
        assert!(discover.input_schema["properties"]["in_stock"].is_object());
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let err = registry().execute("search_papers", json!({})).await.unwrap_err();
        assert_eq!(err, "Tool 'search_papers' not found");
    }

    #[tokio::test]
    async fn test_search_registry_requires_query_or_cluster() {
        let registry = registry();
        assert!(registry.execute("search_registry", json!({})).await.is_err());
        assert!(registry
            .execute("search_registry", json!({ "cluster": "미생물" }))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_search_registry_returns_envelope() {
        let source = MockSource::new();
        let record = make_record("bioone-1", "Bacillus subtilis KCTC", "미생물");
        source.set_response(SearchEnvelope::success(vec![record], 42, 2, 20));

        let result = registry_with(source)
            .execute("search_registry", json!({ "query": "bacillus", "page": 2 }))
            .await
            .unwrap();

        assert_eq!(result["success"], true);
        assert_eq!(result["total"], 42);
        assert_eq!(result["data"][0]["name"], "Bacillus subtilis KCTC");
        assert!(result.get("error").is_none());
    }

    #[tokio::test]
    async fn test_search_registry_failure_is_reported_in_envelope() {
        let source = MockSource::new();
        source.set_error("timed out");

        let result = registry_with(source)
            .execute("search_registry", json!({ "query": "bacillus" }))
            .await
            .unwrap();

        assert_eq!(result["success"], false);
        assert_eq!(result["data"], json!([]));
        assert!(result["error"].as_str().unwrap().contains("timed out"));
    }

    #[tokio::test]
    async fn test_search_materials() {
        let result = registry()
            .execute(
                "search_materials",
                json!({ "category": "배양세포주", "applications": ["백신 개발"] }),
            )
            .await
            .unwrap();

        assert_eq!(result["total"], 2);
        assert_eq!(result["materials"][0]["name"], "HeLa 세포주");
        assert_eq!(result["materials"][1]["name"], "HEK293 세포주");
        assert_eq!(result["facets"]["categories"], json!(["배양세포주"]));
    }

    #[tokio::test]
    async fn test_discover_pla() {
        let result = registry()
            .execute("discover", json!({ "query": "PLA" }))
            .await
            .unwrap();

        assert_eq!(result["query"], "PLA");
        assert_eq!(result["materials"].as_array().unwrap().len(), 1);
        assert_eq!(result["materials"][0]["name"], "PLA (폴리락트산)");
        assert_eq!(result["summary"]["query"], "PLA");
    }

    #[tokio::test]
    async fn test_discover_missing_query() {
        let err = registry().execute("discover", json!({})).await.unwrap_err();
        assert_eq!(err, "Missing 'query' parameter");
    }

    #[tokio::test]
    async fn test_summarize_search_accepts_json_context() {
        let result = registry()
            .execute(
                "summarize_search",
                json!({ "query": "줄기세포", "context": [{ "name": "iPSC" }] }),
            )
            .await
            .unwrap();

        assert_eq!(result["query"], "줄기세포");
        assert_eq!(result["materials"][0]["name"], "iPSC (유도만능줄기세포)");
    }

    #[tokio::test]
    async fn test_list_catalog() {
        let result = registry().execute("list_catalog", json!({})).await.unwrap();

        assert_eq!(result["materials"].as_array().unwrap().len(), 11);
        assert_eq!(result["facets"]["total"], 11);
        assert_eq!(result["clusters"].as_array().unwrap().len(), 14);
        assert_eq!(result["clusters"][1], json!({ "name": "줄기세포", "slug": "stem-cell" }));
        assert_eq!(result["popularKeywords"][0], "bacillus subtilis");
    }
}
