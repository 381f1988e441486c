//! arXiv API client
//!
//! Paged fetching of the Atom result feed, entry parsing and PDF downloads.

pub mod client;
mod download;
pub mod models;
pub mod parser;

pub use client::ArxivClient;
pub use models::{ArticleRecord, DownloadReport, FetchReport, SearchRequest, SortBy, SortOrder};
pub use parser::{ParsedFeed, parse_feed};
