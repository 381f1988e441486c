//! Parser for the compact boolean shorthand
//!
//! Clauses are separated by `&` (AND) or `&!` (ANDNOT) and each clause starts with a
//! tag naming the field:
//!
//! ```text
//! author konrad kording & title neural nets &! cat stat.ML|cs.CV
//! ```

use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, instrument};

use super::builder::field_term;
use super::{BooleanOperator, FieldPrefix, QueryFragment};
use crate::error::{ArxivError, Result};

fn separator_regex() -> &'static Regex {
    static SEPARATOR_REGEX: OnceLock<Regex> = OnceLock::new();
    // `&!` must be tried before `&`
    SEPARATOR_REGEX
        .get_or_init(|| Regex::new(r"&!|&").expect("Failed to compile separator regex"))
}

/// Parse shorthand query text into an encoded fragment
///
/// Recognised tags are `title`, `abstract`, `author` and `cat`. A `cat` clause may list
/// alternatives separated by `|`; several alternatives are OR-joined and grouped.
///
/// # Errors
///
/// Returns `ArxivError::ParseError` if a clause is empty (a leading, trailing or
/// doubled separator), does not start with a recognised tag, or has no value.
///
/// # Example
///
/// ```
/// use arxiv_client::parse_compound_query;
///
/// let query = parse_compound_query("author konrad kording & title neural nets & cat stat.ML|cs.CV")?;
/// assert_eq!(
///     query.as_str(),
///     "au:kording_konrad+AND+ti:%22neural+nets%22+AND+%28cat:stat.ML+OR+cat:cs.CV%29"
/// );
/// # Ok::<(), arxiv_client::ArxivError>(())
/// ```
#[instrument(level = "debug")]
pub fn parse_compound_query(text: &str) -> Result<QueryFragment> {
    let re = separator_regex();
    let clauses: Vec<&str> = re.split(text).collect();
    let operators: Vec<BooleanOperator> = re
        .find_iter(text)
        .map(|m| match m.as_str() {
            "&!" => BooleanOperator::AndNot,
            _ => BooleanOperator::And,
        })
        .collect();

    // split() yields one more clause than there are separators; a stray separator
    // shows up as an empty clause and is rejected by parse_clause
    let mut fragments = clauses
        .iter()
        .map(|clause| parse_clause(text, clause))
        .collect::<Result<Vec<_>>>()?
        .into_iter();

    // split() always yields at least one clause
    let mut query = fragments.next().unwrap_or_default();
    for (operator, fragment) in operators.into_iter().zip(fragments) {
        query = query.combine(operator, fragment);
    }

    debug!(query = %query, "Parsed compound query");
    Ok(query)
}

fn parse_clause(input: &str, clause: &str) -> Result<QueryFragment> {
    let clause = clause.trim();
    if clause.is_empty() {
        return Err(ArxivError::parse(input, "empty clause"));
    }

    let (tag, value) = match clause.split_once(char::is_whitespace) {
        Some((tag, value)) => (tag, value.trim()),
        None => (clause, ""),
    };

    let prefix = match tag {
        "title" => FieldPrefix::Title,
        "abstract" => FieldPrefix::Abstract,
        "author" => FieldPrefix::Author,
        "cat" => FieldPrefix::Category,
        other => {
            return Err(ArxivError::parse(
                input,
                format!(
                    "clause {clause:?} starts with {other:?}; expected one of title, abstract, author, cat"
                ),
            ));
        }
    };

    if value.is_empty() {
        return Err(ArxivError::parse(
            input,
            format!("clause {clause:?} has no value"),
        ));
    }

    if prefix != FieldPrefix::Category {
        return Ok(field_term(prefix, value));
    }

    let alternatives: Vec<&str> = value.split('|').map(str::trim).collect();
    if alternatives.iter().any(|alt| alt.is_empty()) {
        return Err(ArxivError::parse(
            input,
            format!("clause {clause:?} contains an empty category"),
        ));
    }

    let query = QueryFragment::join(
        alternatives
            .iter()
            .map(|alt| field_term(FieldPrefix::Category, alt)),
        BooleanOperator::Or,
    );

    Ok(if alternatives.len() > 1 {
        query.group()
    } else {
        query
    })
}
