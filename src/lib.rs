//! # arXiv Client
//!
//! A Rust client library for the arXiv search API.
//! This crate builds arXiv query strings, pages through the Atom result feed,
//! parses every entry into an [`ArticleRecord`], and can download the linked PDFs.
//!
//! ## Features
//!
//! - **Query Builder**: category lists, field-prefixed term lists and a compact
//!   boolean shorthand, all rendered to the encoded `search_query` syntax
//! - **Paged Fetching**: sequential page requests with a politeness pause between pages
//! - **Feed Parsing**: Atom entries with arXiv extension fields (comment, journal ref, DOI)
//! - **PDF Downloads**: per-record failures are collected instead of aborting the batch
//!
//! ## Quick Start
//!
//! ### Building Queries
//!
//! ```
//! use arxiv_client::query::{build_category_query, build_term_query, BooleanOperator, FieldPrefix};
//!
//! let title = build_term_query(
//!     &["neural network", "deep learning"],
//!     FieldPrefix::Title,
//!     BooleanOperator::And,
//!     false,
//! );
//! let categories = build_category_query(&["cs.CV", "cs.LG"]).group();
//!
//! let query = title.and(categories);
//! assert_eq!(
//!     query.as_str(),
//!     "ti:%22neural+network%22+AND+ti:%22deep+learning%22+AND+%28cat:cs.CV+OR+cat:cs.LG%29"
//! );
//! ```
//!
//! ### Searching and Downloading
//!
//! ```no_run
//! use arxiv_client::{ArxivClient, SearchRequest};
//! use arxiv_client::query::parse_compound_query;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ArxivClient::new();
//!
//!     let query = parse_compound_query("author kording & cat stat.ML|cs.CV")?;
//!     let request = SearchRequest::new(query).range(0, 50).page_size(25);
//!     let articles = client.fetch_articles(&request).await?;
//!
//!     for article in &articles {
//!         println!("{}: {}", article.id, article.title);
//!     }
//!
//!     let report = client.download_articles(&articles, "arxiv_pdf").await?;
//!     println!("Downloaded {} PDFs", report.downloaded.len());
//!     Ok(())
//! }
//! ```

pub mod arxiv;
pub mod config;
pub mod error;
pub mod query;
pub mod throttle;

// Re-export main types for convenience
pub use arxiv::{
    ArticleRecord, ArxivClient, DownloadReport, FetchReport, SearchRequest, SortBy, SortOrder,
};
pub use config::ClientConfig;
pub use error::{ArxivError, DownloadError, EmptyResultWarning, Result};
pub use query::{
    BooleanOperator, FieldPrefix, QueryFragment, build_category_query, build_term_query,
    normalize_search_text, parse_compound_query,
};
