//! arXiv Atom feed parser
//!
//! Reads the Atom response of the query API with a streaming `quick_xml::Reader`.
//! Elements are matched on their local name, so the `arxiv:` and `opensearch:`
//! extension elements are picked up whatever prefix the feed binds them to.

use chrono::{DateTime, Utc};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::{debug, instrument};

use crate::arxiv::models::ArticleRecord;
use crate::error::{ArxivError, Result};

/// A parsed result page
#[derive(Debug, Clone, Default)]
pub struct ParsedFeed {
    /// `opensearch:totalResults`, when present
    pub total_results: Option<usize>,
    /// Entries in feed order
    pub entries: Vec<ArticleRecord>,
    /// Message of an API error entry, if the feed carried one
    pub error: Option<String>,
}

#[derive(Debug, Default)]
struct RawLink {
    href: String,
    rel: Option<String>,
    title: Option<String>,
}

#[derive(Debug, Default)]
struct RawEntry {
    id: String,
    title: String,
    summary: String,
    published: Option<String>,
    updated: Option<String>,
    authors: Vec<String>,
    links: Vec<RawLink>,
    primary_category: Option<String>,
    categories: Vec<String>,
    comment: Option<String>,
    journal_ref: Option<String>,
    doi: Option<String>,
}

/// Parse one page of the arXiv Atom feed
///
/// # Arguments
///
/// * `xml` - Response body of the query API
/// * `pdf_base_url` - Base used for entries that do not list a PDF link
///
/// # Errors
///
/// Returns `ArxivError::XmlError` if the XML is malformed or an entry has a missing
/// or unparsable `published` timestamp.
///
/// # Example
///
/// ```
/// use arxiv_client::arxiv::parse_feed;
///
/// let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
/// <feed xmlns="http://www.w3.org/2005/Atom" xmlns:arxiv="http://arxiv.org/schemas/atom">
///   <entry>
///     <id>http://arxiv.org/abs/2101.00001v1</id>
///     <published>2021-01-01T00:00:00Z</published>
///     <title>An Example</title>
///     <summary>Short abstract.</summary>
///     <author><name>Jane Doe</name></author>
///     <arxiv:primary_category term="cs.LG"/>
///   </entry>
/// </feed>"#;
///
/// let feed = parse_feed(xml, "http://arxiv.org/pdf")?;
/// assert_eq!(feed.entries[0].id, "2101.00001v1");
/// assert_eq!(feed.entries[0].pdf_url, "http://arxiv.org/pdf/2101.00001v1");
/// # Ok::<(), arxiv_client::ArxivError>(())
/// ```
#[instrument(skip(xml), fields(xml_size = xml.len()))]
pub fn parse_feed(xml: &str, pdf_base_url: &str) -> Result<ParsedFeed> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().expand_empty_elements = true;

    let mut buf = Vec::new();
    let mut text_buf = Vec::new();
    let mut feed = ParsedFeed::default();
    let mut entry: Option<RawEntry> = None;
    let mut in_author = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let local = e.local_name();
                match (local.as_ref(), entry.as_mut()) {
                    (b"entry", _) => entry = Some(RawEntry::default()),
                    (b"totalResults", None) => {
                        let text = read_text(&mut reader, &mut text_buf)?;
                        feed.total_results = text.trim().parse().ok();
                    }
                    (b"author", Some(_)) => in_author = true,
                    (b"name", Some(current)) if in_author => {
                        let name = read_text(&mut reader, &mut text_buf)?;
                        current.authors.push(name.trim().to_string());
                    }
                    (b"id", Some(current)) => {
                        current.id = read_text(&mut reader, &mut text_buf)?.trim().to_string();
                    }
                    (b"title", Some(current)) => {
                        current.title = read_text(&mut reader, &mut text_buf)?;
                    }
                    (b"summary", Some(current)) => {
                        current.summary = read_text(&mut reader, &mut text_buf)?;
                    }
                    (b"published", Some(current)) => {
                        current.published = Some(read_text(&mut reader, &mut text_buf)?);
                    }
                    (b"updated", Some(current)) => {
                        current.updated = Some(read_text(&mut reader, &mut text_buf)?);
                    }
                    (b"comment", Some(current)) => {
                        current.comment = non_empty(read_text(&mut reader, &mut text_buf)?);
                    }
                    (b"journal_ref", Some(current)) => {
                        current.journal_ref = non_empty(read_text(&mut reader, &mut text_buf)?);
                    }
                    (b"doi", Some(current)) => {
                        current.doi = non_empty(read_text(&mut reader, &mut text_buf)?);
                    }
                    (b"primary_category", Some(current)) => {
                        current.primary_category = get_attr(e, b"term")?;
                    }
                    (b"category", Some(current)) => {
                        if let Some(term) = get_attr(e, b"term")? {
                            current.categories.push(term);
                        }
                    }
                    (b"link", Some(current)) => {
                        if let Some(href) = get_attr(e, b"href")? {
                            current.links.push(RawLink {
                                href,
                                rel: get_attr(e, b"rel")?,
                                title: get_attr(e, b"title")?,
                            });
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"author" => in_author = false,
                b"entry" => {
                    if let Some(raw) = entry.take() {
                        if raw.is_api_error() {
                            debug!(message = %raw.summary, "Feed carries an API error entry");
                            feed.error = Some(collapse_whitespace(&raw.summary));
                        } else {
                            feed.entries.push(raw.into_record(pdf_base_url)?);
                        }
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => {
                if entry.is_some() {
                    return Err(ArxivError::XmlError(
                        "Unexpected end of feed inside entry".to_string(),
                    ));
                }
                break;
            }
            Err(e) => {
                return Err(ArxivError::XmlError(format!(
                    "Malformed feed at byte {}: {}",
                    reader.buffer_position(),
                    e
                )));
            }
            _ => {}
        }
        buf.clear();
    }

    debug!(
        entries = feed.entries.len(),
        total_results = ?feed.total_results,
        "Parsed feed"
    );
    Ok(feed)
}

impl RawEntry {
    /// arXiv reports query errors as a single entry titled "Error"
    fn is_api_error(&self) -> bool {
        self.title.trim() == "Error" && self.id.contains("/api/errors")
    }

    fn into_record(self, pdf_base_url: &str) -> Result<ArticleRecord> {
        let id = self
            .id
            .rsplit_once("/abs/")
            .map(|(_, id)| id)
            .unwrap_or(&self.id)
            .to_string();

        let published = match self.published.as_deref() {
            Some(value) => parse_timestamp(value)?,
            None => {
                return Err(ArxivError::XmlError(format!(
                    "Entry {id} has no published date"
                )));
            }
        };
        let updated = self.updated.as_deref().map(parse_timestamp).transpose()?;

        let url = self
            .links
            .iter()
            .find(|link| link.rel.as_deref() == Some("alternate"))
            .map(|link| link.href.clone())
            .unwrap_or_else(|| self.id.clone());

        let pdf_url = self
            .links
            .iter()
            .find(|link| link.title.as_deref() == Some("pdf"))
            .map(|link| link.href.clone())
            .unwrap_or_else(|| format!("{}/{}", pdf_base_url, id));

        let mut categories = Vec::with_capacity(self.categories.len() + 1);
        if let Some(primary) = &self.primary_category {
            categories.push(primary.clone());
        }
        for term in self.categories {
            if !categories.contains(&term) {
                categories.push(term);
            }
        }
        let term = categories.first().cloned().unwrap_or_default();

        Ok(ArticleRecord {
            id,
            term,
            main_author: self.authors.first().cloned().unwrap_or_default(),
            authors: self.authors,
            url,
            pdf_url,
            title: collapse_whitespace(&self.title),
            abstract_text: self.summary.replace('\n', " ").trim().to_string(),
            published,
            updated,
            comment: self.comment,
            journal_ref: self.journal_ref,
            doi: self.doi,
            categories,
        })
    }
}

/// Read the text content of the element just opened, including nested children
fn read_text(reader: &mut Reader<&[u8]>, buf: &mut Vec<u8>) -> Result<String> {
    let mut text = String::new();
    let mut depth: u32 = 1;

    loop {
        match reader.read_event_into(buf) {
            Ok(Event::Start(_)) => depth += 1,
            Ok(Event::End(_)) => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            Ok(Event::Text(ref e)) => {
                let unescaped = e
                    .unescape()
                    .map_err(|err| ArxivError::XmlError(err.to_string()))?;
                text.push_str(&unescaped);
            }
            Ok(Event::CData(ref e)) => text.push_str(&String::from_utf8_lossy(e)),
            Ok(Event::Eof) => {
                return Err(ArxivError::XmlError(
                    "Unexpected end of feed inside element".to_string(),
                ));
            }
            Err(err) => return Err(ArxivError::XmlError(err.to_string())),
            _ => {}
        }
        buf.clear();
    }
    buf.clear();

    Ok(text)
}

fn get_attr(e: &BytesStart, name: &[u8]) -> Result<Option<String>> {
    let attr = e
        .try_get_attribute(name)
        .map_err(|err| ArxivError::XmlError(err.to_string()))?;
    attr.map(|a| {
        a.unescape_value()
            .map(|v| v.into_owned())
            .map_err(|err| ArxivError::XmlError(err.to_string()))
    })
    .transpose()
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|err| ArxivError::XmlError(format!("Invalid timestamp {value:?}: {err}")))
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn non_empty(text: String) -> Option<String> {
    let trimmed = collapse_whitespace(&text);
    if trimmed.is_empty() { None } else { Some(trimmed) }
}
