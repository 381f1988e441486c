//! Field prefixes, boolean operators and the known category table

use std::fmt;
use std::str::FromStr;

use crate::error::ArxivError;

/// Category prefixes recognised as bare category shorthand (e.g. `"cs.DB"`).
pub const CATEGORY_PREFIXES: &[&str] = &[
    "cs.",
    "stat.",
    "q-bio.",
    "nlin.",
    "math.",
    "astro-ph",
    "cond-mat.",
    "gr-qc",
    "hep-ex",
    "hep-lat",
    "hep-ph",
    "hep-th",
    "math-ph",
    "nucl-ex",
    "nucl-th",
    "physics.",
    "quant-ph",
];

/// Searchable fields of an arXiv entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldPrefix {
    /// Article title (`ti:`)
    Title,
    /// Article abstract (`abs:`)
    Abstract,
    /// Author name (`au:`)
    Author,
    /// Subject category (`cat:`)
    Category,
}

impl FieldPrefix {
    /// The field tag as it appears in a query, including the colon
    pub fn as_query_prefix(&self) -> &'static str {
        match self {
            FieldPrefix::Title => "ti:",
            FieldPrefix::Abstract => "abs:",
            FieldPrefix::Author => "au:",
            FieldPrefix::Category => "cat:",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FieldPrefix::Title => "title",
            FieldPrefix::Abstract => "abstract",
            FieldPrefix::Author => "author",
            FieldPrefix::Category => "category",
        }
    }
}

impl fmt::Display for FieldPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FieldPrefix {
    type Err = ArxivError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(FieldPrefix::Title),
            "abstract" => Ok(FieldPrefix::Abstract),
            "author" => Ok(FieldPrefix::Author),
            "category" => Ok(FieldPrefix::Category),
            other => Err(ArxivError::ValidationError {
                field: "prefix",
                value: other.to_string(),
            }),
        }
    }
}

/// Boolean operators understood by the arXiv query language
///
/// The API applies no precedence between operators, so mixed expressions have to be
/// grouped explicitly with [`QueryFragment::group`](super::QueryFragment::group).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BooleanOperator {
    And,
    Or,
    AndNot,
}

impl BooleanOperator {
    /// Encoded token placed between two fragments (e.g. `+AND+`)
    pub fn as_token(&self) -> &'static str {
        match self {
            BooleanOperator::And => "+AND+",
            BooleanOperator::Or => "+OR+",
            BooleanOperator::AndNot => "+ANDNOT+",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BooleanOperator::And => "AND",
            BooleanOperator::Or => "OR",
            BooleanOperator::AndNot => "ANDNOT",
        }
    }
}

impl fmt::Display for BooleanOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BooleanOperator {
    type Err = ArxivError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AND" => Ok(BooleanOperator::And),
            "OR" => Ok(BooleanOperator::Or),
            "ANDNOT" => Ok(BooleanOperator::AndNot),
            other => Err(ArxivError::ValidationError {
                field: "boolean operator",
                value: other.to_string(),
            }),
        }
    }
}

/// Whether `text` looks like a bare category code such as `stat.ML` or `hep-th`
pub fn is_category_shorthand(text: &str) -> bool {
    !text.contains(':')
        && CATEGORY_PREFIXES
            .iter()
            .any(|prefix| text.starts_with(prefix))
}
