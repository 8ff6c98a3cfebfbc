//! HTTP client utilities.

use reqwest::{Client, RequestBuilder};
use std::sync::Arc;
use std::time::Duration;

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// User-Agent sent when scraping sites that reject non-browser clients
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

pub const BROWSER_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";

pub const BROWSER_ACCEPT_LANGUAGE: &str = "ko-KR,ko;q=0.9,en;q=0.8";

/// Shared HTTP client with sensible defaults
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Arc<Client>,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a new HTTP client with a custom request timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()?;

        Ok(Self {
            client: Arc::new(client),
        })
    }

    /// Create from an existing reqwest Client
    pub fn from_client(client: Arc<Client>) -> Self {
        Self { client }
    }

    /// Get the underlying client
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// GET request carrying browser-like headers
    pub fn browser_get(&self, url: &str) -> RequestBuilder {
        self.client
            .get(url)
            .header(reqwest::header::USER_AGENT, BROWSER_USER_AGENT)
            .header(reqwest::header::ACCEPT, BROWSER_ACCEPT)
            .header(reqwest::header::ACCEPT_LANGUAGE, BROWSER_ACCEPT_LANGUAGE)
    }

    /// Plain POST request
    pub fn post(&self, url: &str) -> RequestBuilder {
        self.client.post(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_browser_get_sets_headers() {
        let client = HttpClient::new().unwrap();
        let request = client
            .browser_get("https://www.bioone.re.kr/search")
            .build()
            .unwrap();

        let headers = request.headers();
        assert_eq!(headers[reqwest::header::USER_AGENT], BROWSER_USER_AGENT);
        assert_eq!(headers[reqwest::header::ACCEPT], BROWSER_ACCEPT);
        assert_eq!(headers[reqwest::header::ACCEPT_LANGUAGE], BROWSER_ACCEPT_LANGUAGE);
    }

    #[test]
    fn test_from_client_shares_pool() {
        let inner = Arc::new(Client::new());
        let a = HttpClient::from_client(Arc::clone(&inner));
        let b = a.clone();
        assert!(std::ptr::eq(a.client(), b.client()));
    }
}
