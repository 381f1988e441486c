//! Query builder for the arXiv `search_query` parameter
//!
//! The arXiv query language has no operator precedence, needs multi-word phrases in
//! encoded quotes, and spells author names `last_first`. The functions here produce
//! fragments that already follow those rules and are safe to drop straight into a URL.
//!
//! - `builder` - category lists and single-field term lists
//! - `compound` - the `author … & title … &! cat a|b` shorthand
//! - `fragment` - the [`QueryFragment`] value and its boolean combinators
//! - `filters` - field prefixes, operators and known category prefixes

mod builder;
mod compound;
mod filters;
mod fragment;

pub use builder::{build_category_query, build_term_query, normalize_search_text};
pub use compound::parse_compound_query;
pub use filters::{BooleanOperator, CATEGORY_PREFIXES, FieldPrefix, is_category_shorthand};
pub use fragment::QueryFragment;
