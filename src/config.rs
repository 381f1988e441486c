//! Client configuration
//!
//! [`ClientConfig`] collects endpoint URLs, HTTP settings and the politeness pause used
//! between result pages. Every setter consumes and returns the config so it can be
//! chained.

use std::time::Duration;

use crate::throttle::PageThrottle;

/// Default arXiv API endpoint
pub const DEFAULT_BASE_URL: &str = "http://export.arxiv.org/api/query";
/// Base used to derive a PDF link when an entry does not list one
pub const DEFAULT_PDF_BASE_URL: &str = "http://arxiv.org/pdf";

/// Configuration for [`ArxivClient`](crate::ArxivClient)
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Custom API endpoint (defaults to [`DEFAULT_BASE_URL`])
    pub base_url: Option<String>,
    /// Custom PDF base (defaults to [`DEFAULT_PDF_BASE_URL`])
    pub pdf_base_url: Option<String>,
    /// Fixed pause between page requests
    pub page_delay: Duration,
    /// Upper bound of the random extra pause added to `page_delay`
    pub max_jitter: Duration,
    /// HTTP request timeout
    pub timeout: Duration,
    /// Custom user agent
    pub user_agent: Option<String>,
}

impl ClientConfig {
    /// Create a configuration with arXiv defaults
    ///
    /// Pages are spaced 5 seconds apart plus up to 3 seconds of jitter.
    ///
    /// # Example
    ///
    /// ```
    /// use arxiv_client::ClientConfig;
    /// use std::time::Duration;
    ///
    /// let config = ClientConfig::new();
    /// assert_eq!(config.page_delay, Duration::from_secs(5));
    /// ```
    pub fn new() -> Self {
        Self {
            base_url: None,
            pdf_base_url: None,
            page_delay: Duration::from_secs(5),
            max_jitter: Duration::from_secs(3),
            timeout: Duration::from_secs(30),
            user_agent: None,
        }
    }

    /// Point the client at a different API endpoint
    ///
    /// # Example
    ///
    /// ```
    /// use arxiv_client::ClientConfig;
    ///
    /// let config = ClientConfig::new().with_base_url("http://localhost:8080/api/query");
    /// assert_eq!(config.effective_base_url(), "http://localhost:8080/api/query");
    /// ```
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_pdf_base_url<S: Into<String>>(mut self, pdf_base_url: S) -> Self {
        self.pdf_base_url = Some(pdf_base_url.into());
        self
    }

    /// Set the fixed pause between page requests
    pub fn with_page_delay(mut self, delay: Duration) -> Self {
        self.page_delay = delay;
        self
    }

    /// Set the upper bound of the random jitter added to each pause
    pub fn with_max_jitter(mut self, jitter: Duration) -> Self {
        self.max_jitter = jitter;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Base URL in effect, trailing slashes removed
    pub fn effective_base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
    }

    pub fn effective_pdf_base_url(&self) -> &str {
        self.pdf_base_url
            .as_deref()
            .unwrap_or(DEFAULT_PDF_BASE_URL)
            .trim_end_matches('/')
    }

    pub fn effective_user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("arxiv-client/{}", env!("CARGO_PKG_VERSION")))
    }

    /// Build the page throttle for a given delay, using the configured jitter
    pub fn create_throttle(&self, delay: Option<Duration>) -> PageThrottle {
        PageThrottle::new(delay.unwrap_or(self.page_delay), self.max_jitter)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}
