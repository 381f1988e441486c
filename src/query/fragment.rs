//! Encoded query fragments and the boolean logic for combining them

use std::fmt;

use super::BooleanOperator;

const OPEN_GROUP: &str = "%28";
const CLOSE_GROUP: &str = "%29";

/// An encoded piece of an arXiv `search_query`
///
/// Fragments are plain values: combining or grouping one returns a new fragment and
/// never depends on anything but the inputs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct QueryFragment(String);

impl QueryFragment {
    /// Wrap a string that is already in arXiv query syntax
    ///
    /// No encoding is applied; the caller is responsible for using `+` instead of
    /// spaces and `%28`/`%29` instead of parentheses.
    ///
    /// # Example
    ///
    /// ```
    /// use arxiv_client::QueryFragment;
    ///
    /// let query = QueryFragment::raw("au:kording+AND+ti:science");
    /// assert_eq!(query.as_str(), "au:kording+AND+ti:science");
    /// ```
    pub fn raw<S: Into<String>>(query: S) -> Self {
        Self(query.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Join this fragment with another using the given operator
    ///
    /// If either side is empty the other side is returned unchanged.
    ///
    /// # Example
    ///
    /// ```
    /// use arxiv_client::{BooleanOperator, QueryFragment};
    ///
    /// let a = QueryFragment::raw("au:kording");
    /// let b = QueryFragment::raw("ti:science");
    /// let combined = a.combine(BooleanOperator::AndNot, b);
    /// assert_eq!(combined.as_str(), "au:kording+ANDNOT+ti:science");
    /// ```
    pub fn combine(self, operator: BooleanOperator, other: QueryFragment) -> Self {
        if other.is_empty() {
            return self;
        }
        if self.is_empty() {
            return other;
        }
        Self(format!("{}{}{}", self.0, operator.as_token(), other.0))
    }

    /// Combine with AND logic
    pub fn and(self, other: QueryFragment) -> Self {
        self.combine(BooleanOperator::And, other)
    }

    /// Combine with OR logic
    pub fn or(self, other: QueryFragment) -> Self {
        self.combine(BooleanOperator::Or, other)
    }

    /// Exclude entries matching `other`
    pub fn and_not(self, other: QueryFragment) -> Self {
        self.combine(BooleanOperator::AndNot, other)
    }

    /// Wrap the fragment in encoded parentheses
    ///
    /// Each call adds exactly one pair; an empty fragment stays empty.
    ///
    /// # Example
    ///
    /// ```
    /// use arxiv_client::QueryFragment;
    ///
    /// let query = QueryFragment::raw("cat:cs.CV+OR+cat:cs.LG").group();
    /// assert_eq!(query.as_str(), "%28cat:cs.CV+OR+cat:cs.LG%29");
    /// ```
    pub fn group(self) -> Self {
        if self.is_empty() {
            return self;
        }
        Self(format!("{OPEN_GROUP}{}{CLOSE_GROUP}", self.0))
    }

    /// Join several fragments with one operator, skipping empty ones
    pub fn join<I>(fragments: I, operator: BooleanOperator) -> Self
    where
        I: IntoIterator<Item = QueryFragment>,
    {
        fragments
            .into_iter()
            .fold(QueryFragment::default(), |acc, next| {
                acc.combine(operator, next)
            })
    }
}

impl fmt::Display for QueryFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for QueryFragment {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<QueryFragment> for String {
    fn from(fragment: QueryFragment) -> Self {
        fragment.0
    }
}
