//! Query builder tests through the public API

use arxiv_client::{
    ArxivError, BooleanOperator, FieldPrefix, QueryFragment, build_category_query,
    build_term_query, normalize_search_text, parse_compound_query,
};
use rstest::rstest;

/// Tokens a composed query may contain besides field terms
const SEPARATORS: [&str; 5] = ["+AND+", "+OR+", "+ANDNOT+", "%28", "%29"];

#[test]
fn test_category_queries() {
    let single = build_category_query(&["A"]);
    assert_eq!(single.as_str(), "cat:A");
    assert!(!single.as_str().contains("+OR+"));

    let pair = build_category_query(&["A", "B"]);
    assert_eq!(pair.as_str(), "cat:A+OR+cat:B");
    assert!(!pair.as_str().starts_with("%28"));

    assert!(build_category_query::<&str>(&[]).is_empty());
}

#[rstest]
#[case::title_phrase(&["neural network"], FieldPrefix::Title, "ti:%22neural+network%22")]
#[case::abstract_phrase(&["spiking networks"], FieldPrefix::Abstract, "abs:%22spiking+networks%22")]
#[case::title_word(&["transformers"], FieldPrefix::Title, "ti:transformers")]
#[case::author_inverted(&["k kording"], FieldPrefix::Author, "au:kording_k")]
#[case::author_single(&["kording"], FieldPrefix::Author, "au:kording")]
#[case::category(&["cs.LG"], FieldPrefix::Category, "cat:cs.LG")]
fn test_single_term(#[case] terms: &[&str], #[case] prefix: FieldPrefix, #[case] expected: &str) {
    let query = build_term_query(terms, prefix, BooleanOperator::And, false);
    assert_eq!(query.as_str(), expected);
}

#[rstest]
#[case(BooleanOperator::And)]
#[case(BooleanOperator::Or)]
#[case(BooleanOperator::AndNot)]
fn test_grouping_wraps_exactly_once(#[case] operator: BooleanOperator) {
    let terms = ["deep learning", "graphs"];
    let plain = build_term_query(&terms, FieldPrefix::Title, operator, false);
    let grouped = build_term_query(&terms, FieldPrefix::Title, operator, true);

    assert_eq!(grouped.as_str(), format!("%28{}%29", plain));
    assert_eq!(grouped.as_str().matches("%28").count(), 1);

    // Re-wrapping is the caller's choice
    let rewrapped = grouped.clone().group();
    assert_eq!(rewrapped.as_str(), format!("%28{}%29", grouped));
}

#[test]
fn test_compound_query_three_clauses() {
    let query =
        parse_compound_query("author konrad kording & title neural nets & cat stat.ML|cs.CV")
            .unwrap();

    assert_eq!(
        query.as_str(),
        "au:kording_konrad+AND+ti:%22neural+nets%22+AND+%28cat:stat.ML+OR+cat:cs.CV%29"
    );
    assert_eq!(query.as_str().matches("+AND+").count(), 2);
}

#[test]
fn test_compound_single_category_is_ungrouped() {
    let query = parse_compound_query("cat stat.ML").unwrap();
    assert_eq!(query.as_str(), "cat:stat.ML");
}

#[test]
fn test_compound_and_not() {
    let query = parse_compound_query("abstract dropout &! cat cs.CV").unwrap();
    assert_eq!(query.as_str(), "abs:dropout+ANDNOT+cat:cs.CV");
}

#[rstest]
#[case::unknown_tag("journal nature")]
#[case::unknown_tag_in_second_clause("author kording & journal nature")]
#[case::leading_separator("& title science")]
#[case::trailing_separator("title science &")]
#[case::doubled_separator("title science & & cat cs.LG")]
#[case::missing_value("title")]
#[case::empty_alternative("cat cs.LG|")]
fn test_compound_parse_errors(#[case] text: &str) {
    assert!(matches!(
        parse_compound_query(text),
        Err(ArxivError::ParseError { .. })
    ));
}

#[test]
fn test_prefix_and_operator_validation() {
    assert_eq!("author".parse::<FieldPrefix>().unwrap(), FieldPrefix::Author);
    assert_eq!("ANDNOT".parse::<BooleanOperator>().unwrap(), BooleanOperator::AndNot);
    assert!(matches!(
        "journal".parse::<FieldPrefix>(),
        Err(ArxivError::ValidationError { .. })
    ));
    assert!(matches!(
        "XOR".parse::<BooleanOperator>(),
        Err(ArxivError::ValidationError { .. })
    ));
}

#[rstest]
#[case::category_shorthand("cs.DB", "cat:cs.DB")]
#[case::math_shorthand("math.PR", "cat:math.PR")]
#[case::prefixed_query("au:kording", "au:kording")]
#[case::free_text("dropout", "dropout")]
#[case::free_text_reserved("C# programming & rust", "C%23+programming+%26+rust")]
fn test_normalize_search_text(#[case] text: &str, #[case] expected: &str) {
    assert_eq!(normalize_search_text(text).as_str(), expected);
}

#[test]
fn test_composed_query_has_only_encoded_separators() {
    let authors = build_term_query(
        &["konrad kording", "jane doe"],
        FieldPrefix::Author,
        BooleanOperator::Or,
        true,
    );
    let title = build_term_query(
        &["neural network", "time & space"],
        FieldPrefix::Title,
        BooleanOperator::And,
        false,
    );
    let query = authors
        .and(title)
        .and_not(build_category_query(&["cs.CV", "cs.LG"]).group());

    let url = format!(
        "http://export.arxiv.org/api/query?search_query={}&start=0&max_results=10",
        query
    );
    let (_, params) = url.split_once('?').unwrap();
    assert!(!params.contains(' '));
    assert!(!params.contains('('));
    assert!(!params.contains(')'));
    assert!(!params.contains('"'));
    // The only literal '&' characters separate request parameters
    assert_eq!(params.matches('&').count(), 2);

    let mut residue = query.to_string();
    for separator in SEPARATORS {
        residue = residue.replace(separator, " ");
    }
    for token in residue.split_whitespace() {
        assert!(
            ["au:", "ti:", "cat:"].iter().any(|p| token.starts_with(p)),
            "unexpected token {token}"
        );
    }
}

#[test]
fn test_reserved_characters_in_terms_are_encoded() {
    let query = build_term_query(
        &["recurrent (gated) units"],
        FieldPrefix::Title,
        BooleanOperator::And,
        false,
    );
    assert_eq!(query.as_str(), "ti:%22recurrent+%28gated%29+units%22");
}

#[test]
fn test_fragment_combinators_with_empty_sides() {
    let empty = QueryFragment::default();
    let title = QueryFragment::raw("ti:science");

    assert_eq!(empty.clone().and(title.clone()), title);
    assert_eq!(title.clone().or(empty.clone()), title);
    assert!(empty.group().is_empty());
}
