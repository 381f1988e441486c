//! Builders that turn category lists and term lists into query fragments

use tracing::debug;

use super::filters::is_category_shorthand;
use super::{BooleanOperator, FieldPrefix, QueryFragment};

/// Build an OR query over subject categories
///
/// Every code gets a `cat:` prefix; the result is not grouped.
///
/// # Example
///
/// ```
/// use arxiv_client::build_category_query;
///
/// assert_eq!(build_category_query(&["cs.DB"]).as_str(), "cat:cs.DB");
/// assert_eq!(
///     build_category_query(&["cs.DB", "cs.IR"]).as_str(),
///     "cat:cs.DB+OR+cat:cs.IR"
/// );
/// ```
pub fn build_category_query<S: AsRef<str>>(categories: &[S]) -> QueryFragment {
    build_term_query(
        categories,
        FieldPrefix::Category,
        BooleanOperator::Or,
        false,
    )
}

/// Build a query over a single field from a list of terms
///
/// # Arguments
///
/// * `terms` - Terms to search for, in order
/// * `prefix` - Field the terms apply to
/// * `operator` - Operator placed between consecutive terms
/// * `grouped` - Wrap the whole result in encoded parentheses
///
/// Multi-word titles and abstracts become quoted phrases, and a multi-word author
/// `"first last"` is rewritten to arXiv's `last_first` form.
///
/// # Example
///
/// ```
/// use arxiv_client::{build_term_query, BooleanOperator, FieldPrefix};
///
/// let authors = build_term_query(
///     &["k kording", "t achakulvisut"],
///     FieldPrefix::Author,
///     BooleanOperator::And,
///     false,
/// );
/// assert_eq!(authors.as_str(), "au:kording_k+AND+au:achakulvisut_t");
///
/// let title = build_term_query(&["neural network"], FieldPrefix::Title, BooleanOperator::And, true);
/// assert_eq!(title.as_str(), "%28ti:%22neural+network%22%29");
/// ```
pub fn build_term_query<S: AsRef<str>>(
    terms: &[S],
    prefix: FieldPrefix,
    operator: BooleanOperator,
    grouped: bool,
) -> QueryFragment {
    let fragments = terms
        .iter()
        .map(|term| term.as_ref().trim())
        .filter(|term| !term.is_empty())
        .map(|term| field_term(prefix, term));

    let query = QueryFragment::join(fragments, operator);
    debug!(prefix = %prefix, operator = %operator, grouped, query = %query, "Built term query");

    if grouped { query.group() } else { query }
}

/// Interpret a free-form search string
///
/// A bare category code such as `"cs.DB"` becomes `cat:cs.DB`. Anything else is taken
/// as a query in arXiv syntax: whitespace becomes `+` and each word is percent-encoded,
/// leaving `+`, `:` and existing `%XX` escapes as they are.
///
/// # Example
///
/// ```
/// use arxiv_client::normalize_search_text;
///
/// assert_eq!(normalize_search_text("stat.ML").as_str(), "cat:stat.ML");
/// assert_eq!(normalize_search_text("au:kording").as_str(), "au:kording");
/// assert_eq!(normalize_search_text("C# & rust").as_str(), "C%23+%26+rust");
/// ```
pub fn normalize_search_text(text: &str) -> QueryFragment {
    let text = text.trim();
    if is_category_shorthand(text) {
        return field_term(FieldPrefix::Category, text);
    }

    let words: Vec<String> = text.split_whitespace().map(encode_query_word).collect();
    QueryFragment::raw(words.join("+"))
}

/// Render one term for `prefix`, applying phrase quoting or name inversion
pub(crate) fn field_term(prefix: FieldPrefix, term: &str) -> QueryFragment {
    let value = match prefix {
        FieldPrefix::Title | FieldPrefix::Abstract => phrase_value(term),
        FieldPrefix::Author => author_value(term),
        FieldPrefix::Category => encode_word(term),
    };
    QueryFragment::raw(format!("{}{}", prefix.as_query_prefix(), value))
}

/// `neural network` -> `%22neural+network%22`
fn phrase_value(term: &str) -> String {
    let words: Vec<String> = term.split_whitespace().map(encode_word).collect();
    if words.len() > 1 {
        format!("%22{}%22", words.join("+"))
    } else {
        words.concat()
    }
}

/// `konrad kording` -> `kording_konrad`
fn author_value(term: &str) -> String {
    let mut words: Vec<String> = term.split_whitespace().map(encode_word).collect();
    words.reverse();
    words.join("_")
}

fn encode_word(word: &str) -> String {
    urlencoding::encode(word).into_owned()
}

/// Like [`encode_word`], but keeps `+`, `:` and valid `%XX` escapes
fn encode_query_word(word: &str) -> String {
    let mut encoded = String::with_capacity(word.len());
    let mut rest = word;
    while let Some(c) = rest.chars().next() {
        let len = match c {
            '+' | ':' => {
                encoded.push(c);
                1
            }
            '%' if is_escape(rest) => {
                encoded.push_str(&rest[..3]);
                3
            }
            _ => {
                let len = c.len_utf8();
                encoded.push_str(&urlencoding::encode(&rest[..len]));
                len
            }
        };
        rest = &rest[len..];
    }
    encoded
}

fn is_escape(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() >= 3 && bytes[1].is_ascii_hexdigit() && bytes[2].is_ascii_hexdigit()
}
