use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ArxivError, DownloadError, EmptyResultWarning};
use crate::query::QueryFragment;

/// One parsed entry of an arXiv result feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleRecord {
    /// arXiv identifier including version (e.g. `2101.00001v2`)
    pub id: String,
    /// Primary category term (e.g. `cs.LG`)
    pub term: String,
    /// First listed author
    pub main_author: String,
    /// All author names in feed order
    pub authors: Vec<String>,
    /// Abstract page URL
    pub url: String,
    /// PDF URL
    pub pdf_url: String,
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    /// First submission time
    pub published: DateTime<Utc>,
    /// Time of the latest version
    pub updated: Option<DateTime<Utc>>,
    /// Author comment (page counts, venue notes, …)
    pub comment: Option<String>,
    /// Journal reference, if published
    pub journal_ref: Option<String>,
    pub doi: Option<String>,
    /// Every category the entry is filed under, primary first
    pub categories: Vec<String>,
}

impl ArticleRecord {
    /// Identifier without the `vN` version suffix
    ///
    /// # Example
    ///
    /// ```
    /// # use arxiv_client::ArticleRecord;
    /// # fn record(id: &str) -> ArticleRecord {
    /// #     ArticleRecord {
    /// #         id: id.to_string(), term: String::new(), main_author: String::new(),
    /// #         authors: vec![], url: String::new(), pdf_url: String::new(),
    /// #         title: String::new(), abstract_text: String::new(),
    /// #         published: chrono::Utc::now(), updated: None, comment: None,
    /// #         journal_ref: None, doi: None, categories: vec![],
    /// #     }
    /// # }
    /// assert_eq!(record("2101.00001v2").base_id(), "2101.00001");
    /// assert_eq!(record("math/0211159v1").base_id(), "math/0211159");
    /// ```
    pub fn base_id(&self) -> &str {
        match self.id.rfind('v') {
            Some(pos)
                if pos + 1 < self.id.len()
                    && self.id[pos + 1..].chars().all(|c| c.is_ascii_digit()) =>
            {
                &self.id[..pos]
            }
            _ => &self.id,
        }
    }

    /// File name used when the PDF is saved (`/` in old-style ids becomes `_`)
    pub fn pdf_file_name(&self) -> String {
        format!("{}.pdf", self.id.replace('/', "_"))
    }
}

/// Field the results are sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortBy {
    Relevance,
    LastUpdatedDate,
    SubmittedDate,
}

impl SortBy {
    /// Value of the `sortBy` request parameter
    pub fn as_api_param(&self) -> &'static str {
        match self {
            SortBy::Relevance => "relevance",
            SortBy::LastUpdatedDate => "lastUpdatedDate",
            SortBy::SubmittedDate => "submittedDate",
        }
    }
}

impl FromStr for SortBy {
    type Err = ArxivError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "relevance" => Ok(SortBy::Relevance),
            "lastUpdatedDate" => Ok(SortBy::LastUpdatedDate),
            "submittedDate" => Ok(SortBy::SubmittedDate),
            _ => Err(ArxivError::ValidationError {
                field: "sort field",
                value: s.to_string(),
            }),
        }
    }
}

/// Direction of the sort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    /// Value of the `sortOrder` request parameter
    pub fn as_api_param(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "ascending",
            SortOrder::Descending => "descending",
        }
    }
}

impl FromStr for SortOrder {
    type Err = ArxivError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ascending" => Ok(SortOrder::Ascending),
            "descending" => Ok(SortOrder::Descending),
            _ => Err(ArxivError::ValidationError {
                field: "sort order",
                value: s.to_string(),
            }),
        }
    }
}

/// A paged search: query plus the `[start, end)` window to retrieve
///
/// # Example
///
/// ```
/// use arxiv_client::{SearchRequest, SortBy, SortOrder};
/// use arxiv_client::query::build_category_query;
///
/// let request = SearchRequest::new(build_category_query(&["cs.CV", "cs.LG"]))
///     .range(0, 200)
///     .page_size(50)
///     .sort_by(SortBy::SubmittedDate)
///     .sort_order(SortOrder::Descending);
///
/// assert_eq!(request.page_offsets(), vec![0, 50, 100, 150]);
/// ```
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub(crate) query: QueryFragment,
    pub(crate) start: usize,
    pub(crate) end: usize,
    pub(crate) page_size: usize,
    pub(crate) delay: Option<Duration>,
    pub(crate) sort_by: Option<SortBy>,
    pub(crate) sort_order: Option<SortOrder>,
}

impl SearchRequest {
    /// Create a request for the first 100 results, sorted by last update
    pub fn new(query: QueryFragment) -> Self {
        Self {
            query,
            start: 0,
            end: 100,
            page_size: 100,
            delay: None,
            sort_by: Some(SortBy::LastUpdatedDate),
            sort_order: None,
        }
    }

    /// Retrieve results with offsets in `[start, end)`
    pub fn range(mut self, start: usize, end: usize) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    /// Number of results requested per page
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Fixed pause between pages; overrides the client's configured delay
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn sort_by(mut self, sort_by: SortBy) -> Self {
        self.sort_by = Some(sort_by);
        self
    }

    /// Leave ordering to the API's default
    pub fn unsorted(mut self) -> Self {
        self.sort_by = None;
        self.sort_order = None;
        self
    }

    pub fn sort_order(mut self, sort_order: SortOrder) -> Self {
        self.sort_order = Some(sort_order);
        self
    }

    pub fn query(&self) -> &QueryFragment {
        &self.query
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn get_page_size(&self) -> usize {
        self.page_size
    }

    /// Offsets of every page request, ascending
    pub fn page_offsets(&self) -> Vec<usize> {
        if self.page_size == 0 {
            return Vec::new();
        }
        (self.start..self.end).step_by(self.page_size).collect()
    }
}

/// Result of a paged fetch
#[derive(Debug, Clone, Default)]
pub struct FetchReport {
    /// Records from every page, in page order
    pub articles: Vec<ArticleRecord>,
    /// Pages that came back empty
    pub warnings: Vec<EmptyResultWarning>,
    /// Number of page requests issued
    pub pages_requested: usize,
}

/// Result of a batch PDF download
#[derive(Debug, Default)]
pub struct DownloadReport {
    /// Files written, in record order
    pub downloaded: Vec<PathBuf>,
    /// Records without a PDF URL
    pub skipped: usize,
    /// Records that failed
    pub failures: Vec<DownloadError>,
}

impl DownloadReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}
