//! Common test utilities for arXiv feed and download tests

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use arxiv_client::ArticleRecord;
use chrono::{TimeZone, Utc};

/// Directory holding recorded feeds
pub const TEST_DATA_DIR: &str = "tests/integration/test_data";

/// Build an Atom feed with one minimal entry per identifier
pub fn atom_feed(ids: &[&str]) -> String {
    let entries: String = ids
        .iter()
        .map(|id| {
            format!(
                r#"
  <entry>
    <id>http://arxiv.org/abs/{id}</id>
    <updated>2021-01-02T00:00:00Z</updated>
    <published>2021-01-01T00:00:00Z</published>
    <title>Article {id}</title>
    <summary>Abstract of {id}.</summary>
    <author><name>Ada Lovelace</name></author>
    <link href="http://arxiv.org/abs/{id}" rel="alternate" type="text/html"/>
    <arxiv:primary_category term="cs.LG" scheme="http://arxiv.org/schemas/atom"/>
    <category term="cs.LG" scheme="http://arxiv.org/schemas/atom"/>
  </entry>"#
            )
        })
        .collect();

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom" xmlns:arxiv="http://arxiv.org/schemas/atom" xmlns:opensearch="http://a9.com/-/spec/opensearch/1.1/">
  <title type="html">ArXiv Query</title>
  <id>http://arxiv.org/api/test</id>
  <updated>2021-01-03T00:00:00-05:00</updated>
  <opensearch:totalResults>{}</opensearch:totalResults>
  <opensearch:startIndex>0</opensearch:startIndex>{}
</feed>"#,
        ids.len(),
        entries
    )
}

/// Build the single-entry feed arXiv returns for a rejected query
pub fn error_feed(message: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom" xmlns:opensearch="http://a9.com/-/spec/opensearch/1.1/">
  <title type="html">ArXiv Query</title>
  <opensearch:totalResults>1</opensearch:totalResults>
  <entry>
    <id>http://arxiv.org/api/errors#bad_query</id>
    <title>Error</title>
    <summary>{message}</summary>
    <updated>2021-01-03T00:00:00-05:00</updated>
    <author><name>arXiv api core</name></author>
  </entry>
</feed>"#
    )
}

/// A record pointing at `pdf_url`
pub fn record(id: &str, pdf_url: &str) -> ArticleRecord {
    ArticleRecord {
        id: id.to_string(),
        term: "cs.LG".to_string(),
        main_author: "Ada Lovelace".to_string(),
        authors: vec!["Ada Lovelace".to_string()],
        url: format!("http://arxiv.org/abs/{id}"),
        pdf_url: pdf_url.to_string(),
        title: format!("Article {id}"),
        abstract_text: String::new(),
        published: Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap(),
        updated: None,
        comment: None,
        journal_ref: None,
        doi: None,
        categories: vec!["cs.LG".to_string()],
    }
}

/// Read a recorded feed from the test data directory
pub fn read_test_feed(name: &str) -> String {
    let path = Path::new(TEST_DATA_DIR).join(name);
    fs::read_to_string(&path)
        .unwrap_or_else(|_| panic!("Failed to read test feed: {:?}", path))
}
