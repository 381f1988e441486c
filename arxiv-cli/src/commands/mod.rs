pub mod download;
pub mod query;
pub mod search;

use std::time::Duration;

use anyhow::{Result, bail};
use arxiv_client::{
    ArxivClient, ClientConfig, QueryFragment, SearchRequest, SortBy, SortOrder,
    build_category_query, normalize_search_text, parse_compound_query,
};
use clap::Args;

/// Connection settings shared by every networked command
#[derive(Debug, Default, Clone)]
pub struct ClientSettings {
    pub base_url: Option<String>,
    pub page_delay: Option<f64>,
    pub timeout: Option<u64>,
}

pub fn create_arxiv_client(settings: &ClientSettings) -> Result<ArxivClient> {
    let mut config = ClientConfig::new();

    if let Some(url) = &settings.base_url {
        config = config.with_base_url(url);
    }

    if let Some(seconds) = settings.page_delay {
        if !seconds.is_finite() || seconds < 0.0 {
            bail!("page delay must be a non-negative number of seconds, got {seconds}");
        }
        config = config.with_page_delay(Duration::from_secs_f64(seconds));
    }

    if let Some(seconds) = settings.timeout {
        config = config.with_timeout(Duration::from_secs(seconds));
    }

    Ok(ArxivClient::with_config(config))
}

/// Query selection and paging flags
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Free text, a category shorthand such as `cs.LG`, or an encoded query
    #[arg(value_name = "QUERY", conflicts_with_all = ["compound", "category"])]
    pub query: Option<String>,

    /// Compound shorthand, e.g. "author konrad kording & cat stat.ML|cs.CV"
    #[arg(long, conflicts_with = "category")]
    pub compound: Option<String>,

    /// Category codes joined with OR
    #[arg(long, num_args = 1..)]
    pub category: Vec<String>,

    /// Offset of the first result
    #[arg(long, default_value_t = 0)]
    pub start: usize,

    /// Offset one past the last result
    #[arg(long, default_value_t = 100)]
    pub end: usize,

    /// Results requested per page
    #[arg(long, default_value_t = 100)]
    pub page_size: usize,

    /// Sort field
    #[arg(long, value_enum, default_value = "last-updated-date")]
    pub sort_by: SortByArg,

    /// Sort direction (API default when omitted)
    #[arg(long, value_enum)]
    pub sort_order: Option<SortOrderArg>,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum SortByArg {
    Relevance,
    LastUpdatedDate,
    SubmittedDate,
}

impl From<SortByArg> for SortBy {
    fn from(arg: SortByArg) -> Self {
        match arg {
            SortByArg::Relevance => SortBy::Relevance,
            SortByArg::LastUpdatedDate => SortBy::LastUpdatedDate,
            SortByArg::SubmittedDate => SortBy::SubmittedDate,
        }
    }
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum SortOrderArg {
    Ascending,
    Descending,
}

impl From<SortOrderArg> for SortOrder {
    fn from(arg: SortOrderArg) -> Self {
        match arg {
            SortOrderArg::Ascending => SortOrder::Ascending,
            SortOrderArg::Descending => SortOrder::Descending,
        }
    }
}

impl SearchArgs {
    pub fn build_query(&self) -> Result<QueryFragment> {
        if let Some(text) = &self.compound {
            return Ok(parse_compound_query(text)?);
        }
        if !self.category.is_empty() {
            return Ok(build_category_query(&self.category));
        }
        match &self.query {
            Some(text) if !text.trim().is_empty() => Ok(normalize_search_text(text)),
            _ => bail!("a query is required: pass QUERY, --compound or --category"),
        }
    }

    pub fn build_request(&self) -> Result<SearchRequest> {
        let mut request = SearchRequest::new(self.build_query()?)
            .range(self.start, self.end)
            .page_size(self.page_size)
            .sort_by(self.sort_by.into());

        if let Some(order) = self.sort_order {
            request = request.sort_order(order.into());
        }

        Ok(request)
    }
}
