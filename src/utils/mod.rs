//! Utility modules shared by the registry source and the summarizer.
//!
//! - [`HttpClient`]: pooled HTTP client with browser-like request helpers
//!
//! # HTTP Client
//!
//! ```rust,no_run
//! use biomaterial_finder::utils::HttpClient;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new()?;
//! let html = client
//!     .browser_get("https://www.bioone.re.kr/search?searchQuery=PLA")
//!     .send()
//!     .await?
//!     .text()
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod http;

pub use http::{
    HttpClient, BROWSER_ACCEPT, BROWSER_ACCEPT_LANGUAGE, BROWSER_USER_AGENT, DEFAULT_TIMEOUT,
};
