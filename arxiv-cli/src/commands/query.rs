use anyhow::Result;
use arxiv_client::{
    BooleanOperator, FieldPrefix, QueryFragment, build_category_query, build_term_query,
    parse_compound_query,
};
use clap::{Args, Subcommand};

#[derive(Args, Debug)]
pub struct Query {
    #[command(subcommand)]
    kind: QueryKind,
}

#[derive(Subcommand, Debug)]
enum QueryKind {
    /// OR-join category codes (e.g. cs.CV cs.LG)
    Category {
        #[arg(required = true)]
        categories: Vec<String>,
    },
    /// Join terms on one field
    Terms {
        /// Field to search: title, abstract, author or category
        #[arg(short, long, default_value = "title")]
        prefix: String,
        /// Operator between terms: AND, OR or ANDNOT
        #[arg(short, long, default_value = "AND")]
        operator: String,
        /// Wrap the result in parentheses
        #[arg(short, long)]
        group: bool,
        #[arg(required = true)]
        terms: Vec<String>,
    },
    /// Parse the compound shorthand, e.g. "author kording & cat stat.ML|cs.CV"
    Compound { text: String },
}

impl Query {
    pub fn execute(&self) -> Result<()> {
        println!("{}", self.build()?);
        Ok(())
    }

    fn build(&self) -> Result<QueryFragment> {
        let fragment = match &self.kind {
            QueryKind::Category { categories } => build_category_query(categories),
            QueryKind::Terms {
                prefix,
                operator,
                group,
                terms,
            } => {
                let prefix: FieldPrefix = prefix.parse()?;
                let operator: BooleanOperator = operator.parse()?;
                build_term_query(terms, prefix, operator, *group)
            }
            QueryKind::Compound { text } => parse_compound_query(text)?,
        };
        Ok(fragment)
    }
}
