//! MCP server built on pmcp, serving the discovery tools over stdio or
//! streamable HTTP.

use crate::mcp::tools::ToolRegistry;
use crate::service::DiscoveryService;
use async_trait::async_trait;
use pmcp::{
    server::streamable_http_server::StreamableHttpServer,
    Error, RequestHandlerExtra, Server, ServerCapabilities, ToolHandler, ToolInfo,
};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// The MCP server for biomaterial discovery
#[derive(Debug, Clone)]
pub struct McpServer {
    server: Arc<Mutex<Server>>,
}

impl McpServer {
    /// Create a new MCP server exposing the tools of `service`
    pub fn new(service: Arc<DiscoveryService>) -> Result<Self, pmcp::Error> {
        let tools = ToolRegistry::from_service(service);
        let server = Self::build_server_impl(tools)?;
        Ok(Self {
            server: Arc::new(Mutex::new(server)),
        })
    }

    /// Shared handle to the underlying pmcp server
    pub fn server(&self) -> Arc<Mutex<Server>> {
        self.server.clone()
    }

    fn build_server_impl(tools: ToolRegistry) -> Result<Server, pmcp::Error> {
        let mut builder = Server::builder()
            .name("biomaterial-finder")
            .version(env!("CARGO_PKG_VERSION"))
            .capabilities(ServerCapabilities::default());

        for tool in tools.all() {
            let name = tool.name.clone();
            let description = tool.description.clone();
            let input_schema = tool.input_schema.clone();
            let handler = tool.handler.clone();

            let tool_handler = ToolWrapper {
                name,
                description: Some(description),
                input_schema,
                handler,
            };
            builder = builder.tool(tool_handler.name.clone(), tool_handler);
        }

        builder.build()
    }

    /// Serve over stdio until the client disconnects
    pub async fn run(self) -> Result<(), pmcp::Error> {
        tracing::info!("Starting MCP server in stdio mode");

        // run_stdio() takes ownership of the Server
        let server = Arc::try_unwrap(self.server)
            .map_err(|_| Error::internal("MCP server is still shared"))?
            .into_inner();

        server.run_stdio().await
    }

    /// Serve streamable HTTP on `addr`; returns the bound address and the server task
    pub async fn run_http(&self, addr: &str) -> Result<(SocketAddr, JoinHandle<()>), pmcp::Error> {
        tracing::info!(addr, "Starting MCP server in HTTP mode");

        let socket_addr: SocketAddr = addr
            .parse()
            .map_err(|e| Error::invalid_params(format!("Invalid address: {}", e)))?;

        let http_server = StreamableHttpServer::new(socket_addr, self.server.clone());

        http_server.start().await
    }
}

/// Adapts a registry [`Tool`](crate::mcp::Tool) to pmcp's ToolHandler
#[derive(Clone)]
struct ToolWrapper {
    name: String,
    description: Option<String>,
    input_schema: Value,
    handler: Arc<dyn crate::mcp::tools::ToolHandler>,
}

#[async_trait]
impl ToolHandler for ToolWrapper {
    async fn handle(&self, args: Value, _extra: RequestHandlerExtra) -> Result<Value, Error> {
        self.handler
            .execute(args)
            .await
            .map_err(|e| Error::internal(&e))
    }

    fn metadata(&self) -> Option<ToolInfo> {
        Some(ToolInfo::new(
            self.name.clone(),
            self.description.clone(),
            self.input_schema.clone(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::MockSource;
    use crate::summarize::OfflineSummarizer;

    fn service() -> Arc<DiscoveryService> {
        Arc::new(DiscoveryService::new(
            Arc::new(MockSource::new()),
            Arc::new(OfflineSummarizer),
        ))
    }

    #[test]
    fn test_server_builds() {
        assert!(McpServer::new(service()).is_ok());
    }

    #[test]
    fn test_tool_wrapper_metadata() {
        let registry = ToolRegistry::from_service(service());
        let tool = registry.get("discover").unwrap();
        let wrapper = ToolWrapper {
            name: tool.name.clone(),
            description: Some(tool.description.clone()),
            input_schema: tool.input_schema.clone(),
            handler: tool.handler.clone(),
        };

        let info = wrapper.metadata().unwrap();
        assert_eq!(info.name, "discover");
        assert_eq!(info.input_schema["required"], serde_json::json!(["query"]));
    }

    #[tokio::test]
    async fn test_invalid_http_address() {
        let server = McpServer::new(service()).unwrap();
        assert!(server.run_http("not-an-address").await.is_err());
    }
}
