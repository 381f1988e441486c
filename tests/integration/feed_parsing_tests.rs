//! Parsing tests against a recorded arXiv search feed

use arxiv_client::ArxivError;
use arxiv_client::arxiv::parse_feed;
use rstest::rstest;

mod common;
use common::{atom_feed, error_feed, read_test_feed};

const PDF_BASE: &str = "http://arxiv.org/pdf";

#[test]
fn test_recorded_feed_metadata() {
    let feed = parse_feed(&read_test_feed("search_feed.xml"), PDF_BASE).unwrap();

    assert_eq!(feed.total_results, Some(11893));
    assert!(feed.error.is_none());
    assert_eq!(feed.entries.len(), 3);

    let ids: Vec<&str> = feed.entries.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["1903.05562v1", "1811.01343v3", "q-bio/0401001v1"]);
}

#[test]
fn test_recorded_feed_first_entry() {
    let feed = parse_feed(&read_test_feed("search_feed.xml"), PDF_BASE).unwrap();
    let article = &feed.entries[0];

    assert_eq!(
        article.title,
        "A neural network walks into a lab: towards using deep nets as models for human behavior"
    );
    assert!(article.abstract_text.starts_with("What might sound like"));
    assert!(!article.abstract_text.contains('\n'));
    assert_eq!(article.main_author, "Wei Ma");
    assert_eq!(article.authors, vec!["Wei Ma", "Benjamin Peters"]);
    assert_eq!(article.term, "q-bio.NC");
    assert_eq!(article.categories, vec!["q-bio.NC", "cs.LG", "stat.ML"]);
    assert_eq!(article.comment.as_deref(), Some("19 pages, 2 figures"));
    assert!(article.journal_ref.is_none());
    assert!(article.doi.is_none());
}

#[test]
fn test_recorded_feed_extension_fields() {
    let feed = parse_feed(&read_test_feed("search_feed.xml"), PDF_BASE).unwrap();
    let article = &feed.entries[1];

    assert_eq!(article.base_id(), "1811.01343");
    assert_eq!(
        article.journal_ref.as_deref(),
        Some("Scientific Reports 8, 10651 (2018)")
    );
    assert_eq!(article.doi.as_deref(), Some("10.1038/s41598-018-28999-2"));
    assert_eq!(article.authors.len(), 3);
    assert!(article.updated.unwrap() > article.published);
}

#[test]
fn test_recorded_feed_old_style_identifier() {
    let feed = parse_feed(&read_test_feed("search_feed.xml"), PDF_BASE).unwrap();
    let article = &feed.entries[2];

    assert_eq!(article.id, "q-bio/0401001v1");
    assert_eq!(article.url, "http://arxiv.org/abs/q-bio/0401001v1");
    // No pdf link in the entry: derived from the PDF base
    assert_eq!(article.pdf_url, "http://arxiv.org/pdf/q-bio/0401001v1");
    assert_eq!(article.pdf_file_name(), "q-bio_0401001v1.pdf");
    assert_eq!(article.term, "q-bio.NC");
}

#[rstest]
#[case::pdf_base_without_slash("http://mirror.example/pdf")]
#[case::pdf_base_local("http://127.0.0.1:8080/pdf")]
fn test_pdf_url_fallback_uses_base(#[case] base: &str) {
    let xml = r#"<feed xmlns="http://www.w3.org/2005/Atom">
  <entry>
    <id>http://arxiv.org/abs/2101.00001v1</id>
    <published>2021-01-01T00:00:00Z</published>
    <title>T</title>
    <summary>S</summary>
  </entry>
</feed>"#;
    let feed = parse_feed(xml, base).unwrap();
    assert_eq!(feed.entries[0].pdf_url, format!("{base}/2101.00001v1"));
}

#[test]
fn test_generated_feed_round_trip_count() {
    let feed = parse_feed(&atom_feed(&["a1", "a2", "a3", "a4"]), PDF_BASE).unwrap();
    assert_eq!(feed.entries.len(), 4);
    assert_eq!(feed.total_results, Some(4));
}

#[test]
fn test_error_feed_is_reported() {
    let feed = parse_feed(&error_feed("max_results must be non-negative"), PDF_BASE).unwrap();
    assert!(feed.entries.is_empty());
    assert_eq!(feed.error.as_deref(), Some("max_results must be non-negative"));
}

#[rstest]
#[case::truncated("<feed><entry><id>x</id>")]
#[case::mismatched("<feed><entry></feed>")]
#[case::bad_date(
    "<feed><entry><id>http://arxiv.org/abs/1</id><published>2021-13-45</published></entry></feed>"
)]
fn test_invalid_feeds(#[case] xml: &str) {
    assert!(matches!(
        parse_feed(xml, PDF_BASE),
        Err(ArxivError::XmlError(_))
    ));
}
