use reqwest::{Client, Response};
use tracing::{debug, info, instrument, warn};

use crate::arxiv::models::{ArticleRecord, FetchReport, SearchRequest};
use crate::arxiv::parser::parse_feed;
use crate::config::ClientConfig;
use crate::error::{ArxivError, EmptyResultWarning, Result};

/// Client for the arXiv query API
#[derive(Clone)]
pub struct ArxivClient {
    client: Client,
    base_url: String,
    config: ClientConfig,
}

impl ArxivClient {
    /// Create a new arXiv client with default configuration
    ///
    /// Pages are spaced 5 to 8 seconds apart. Use `with_config()` to change the pause
    /// or point the client at another endpoint.
    ///
    /// # Example
    ///
    /// ```
    /// use arxiv_client::ArxivClient;
    ///
    /// let client = ArxivClient::new();
    /// ```
    pub fn new() -> Self {
        Self::with_config(ClientConfig::new())
    }

    /// Create a new arXiv client with custom configuration
    ///
    /// # Example
    ///
    /// ```
    /// use arxiv_client::{ArxivClient, ClientConfig};
    /// use std::time::Duration;
    ///
    /// let config = ClientConfig::new()
    ///     .with_page_delay(Duration::from_secs(3))
    ///     .with_user_agent("my-survey-tool/0.1");
    ///
    /// let client = ArxivClient::with_config(config);
    /// ```
    pub fn with_config(config: ClientConfig) -> Self {
        let base_url = config.effective_base_url().to_string();

        let client = Client::builder()
            .user_agent(config.effective_user_agent())
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url,
            config,
        }
    }

    /// Create a new arXiv client with a custom HTTP client and default configuration
    ///
    /// # Example
    ///
    /// ```
    /// use arxiv_client::ArxivClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(60))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = ArxivClient::with_client(http_client);
    /// ```
    pub fn with_client(client: Client) -> Self {
        let config = ClientConfig::new();
        let base_url = config.effective_base_url().to_string();

        Self {
            client,
            base_url,
            config,
        }
    }

    /// Fetch every record in the request window
    ///
    /// Convenience wrapper around [`fetch_report`](Self::fetch_report) that drops the
    /// warnings after they have been logged.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use arxiv_client::{ArxivClient, SearchRequest};
    /// use arxiv_client::query::build_category_query;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = ArxivClient::new();
    ///     let request = SearchRequest::new(build_category_query(&["cs.LG"])).range(0, 20);
    ///     let articles = client.fetch_articles(&request).await?;
    ///     println!("Fetched {} articles", articles.len());
    ///     Ok(())
    /// }
    /// ```
    pub async fn fetch_articles(&self, request: &SearchRequest) -> Result<Vec<ArticleRecord>> {
        Ok(self.fetch_report(request).await?.articles)
    }

    /// Page through the results of a search
    ///
    /// Pages are requested one after another in ascending offset order. Before every
    /// page except the first the client sleeps for the request's delay (or the
    /// configured page delay) plus a random jitter.
    ///
    /// # Errors
    ///
    /// * `ArxivError::InvalidQuery` - Empty query, zero page size or `end < start`
    /// * `ArxivError::FetchError` - A page request failed or returned a non-2xx status
    /// * `ArxivError::ApiError` - arXiv answered with an error entry
    /// * `ArxivError::XmlError` - A page could not be parsed
    #[instrument(skip(self, request), fields(query = %request.query, start = request.start, end = request.end))]
    pub async fn fetch_report(&self, request: &SearchRequest) -> Result<FetchReport> {
        validate_request(request)?;

        let mut report = FetchReport::default();
        if request.start == request.end {
            debug!("Empty window, nothing to fetch");
            return Ok(report);
        }

        let throttle = self.config.create_throttle(request.delay);
        let offsets = request.page_offsets();
        debug!(pages = offsets.len(), "Fetching result pages");

        for (index, offset) in offsets.into_iter().enumerate() {
            if index > 0 {
                throttle.pause().await;
            }

            let max_results = request.page_size.min(request.end - offset);
            let url = self.build_page_url(request, offset, max_results);

            let response = self.make_request(&url).await?;
            let body = response
                .text()
                .await
                .map_err(|e| ArxivError::fetch(&url, e))?;
            report.pages_requested += 1;

            let page = parse_feed(&body, self.config.effective_pdf_base_url())?;
            if let Some(message) = page.error {
                return Err(ArxivError::ApiError { url, message });
            }

            if page.entries.is_empty() {
                warn!(offset, query = %request.query, "Page returned no entries");
                report.warnings.push(EmptyResultWarning {
                    query: request.query.to_string(),
                    start: offset,
                });
                continue;
            }

            info!(
                offset,
                entries = page.entries.len(),
                total_results = ?page.total_results,
                "Page fetched"
            );
            report.articles.extend(page.entries);
        }

        info!(
            articles = report.articles.len(),
            pages = report.pages_requested,
            warnings = report.warnings.len(),
            "Fetch completed"
        );
        Ok(report)
    }

    /// URL of one result page
    ///
    /// The query fragment is already encoded and goes in verbatim.
    pub(crate) fn build_page_url(
        &self,
        request: &SearchRequest,
        offset: usize,
        max_results: usize,
    ) -> String {
        let mut url = format!("{}?search_query={}", self.base_url, request.query);
        if let Some(sort_by) = request.sort_by {
            url.push_str("&sortBy=");
            url.push_str(sort_by.as_api_param());
        }
        if let Some(sort_order) = request.sort_order {
            url.push_str("&sortOrder=");
            url.push_str(sort_order.as_api_param());
        }
        url.push_str(&format!("&start={}&max_results={}", offset, max_results));
        url
    }

    /// GET a URL, turning transport errors and non-2xx statuses into `FetchError`
    pub(crate) async fn make_request(&self, url: &str) -> Result<Response> {
        debug!("Making API request to: {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ArxivError::fetch(url, e))?;

        if !response.status().is_success() {
            warn!("API request failed with status: {}", response.status());
            return Err(ArxivError::FetchError {
                url: url.to_string(),
                status: Some(response.status().as_u16()),
                message: format!("HTTP {}", response.status()),
            });
        }

        Ok(response)
    }
}

impl Default for ArxivClient {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_request(request: &SearchRequest) -> Result<()> {
    if request.query.is_empty() {
        return Err(ArxivError::InvalidQuery(
            "search query cannot be empty".to_string(),
        ));
    }
    if request.page_size == 0 {
        return Err(ArxivError::InvalidQuery(
            "page size must be greater than zero".to_string(),
        ));
    }
    if request.end < request.start {
        return Err(ArxivError::InvalidQuery(format!(
            "end ({}) is before start ({})",
            request.end, request.start
        )));
    }
    Ok(())
}
