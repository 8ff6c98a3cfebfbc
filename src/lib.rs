//! # Biomaterial Finder
//!
//! Biomaterial discovery backed by the Korean BioOne registry, exposed as a
//! Model Context Protocol (MCP) server.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`models`]: Core data structures (RegistryRecord, Biomaterial, SearchEnvelope, MaterialFilter)
//! - [`extract`]: HTML extraction of registry records and property flags
//! - [`sources`]: Registry sources behind the [`Source`] trait
//! - [`normalize`]: Registry record to [`Biomaterial`] conversion
//! - [`catalog`]: Built-in sample catalog and vocabularies
//! - [`filter`]: Faceted filtering over biomaterials
//! - [`summarize`]: Gemini-backed summaries with an offline fallback
//! - [`service`]: The discovery pipeline tying everything together
//! - [`mcp`]: MCP tools and server
//! - [`utils`]: HTTP client
//! - [`config`]: Configuration management

pub mod catalog;
pub mod config;
pub mod extract;
pub mod filter;
pub mod mcp;
pub mod models;
pub mod normalize;
pub mod service;
pub mod sources;
pub mod summarize;
pub mod utils;

// Re-export commonly used types
pub use models::{Biomaterial, MaterialFilter, RegistryRecord, SearchEnvelope};
pub use service::{Discovery, DiscoveryService};
pub use sources::Source;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
