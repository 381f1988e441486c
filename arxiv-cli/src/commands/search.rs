use std::path::PathBuf;

use anyhow::{Context, Result};
use arxiv_client::ArticleRecord;
use clap::Args;

use super::{ClientSettings, SearchArgs, create_arxiv_client};

#[derive(Args, Debug)]
pub struct Search {
    #[command(flatten)]
    args: SearchArgs,

    /// Save results to file (JSON lines)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Show only arXiv identifiers (one per line)
    #[arg(long)]
    ids_only: bool,
}

impl Search {
    pub async fn execute(&self, settings: &ClientSettings) -> Result<()> {
        let client = create_arxiv_client(settings)?;
        let request = self.args.build_request()?;

        let report = client
            .fetch_report(&request)
            .await
            .with_context(|| format!("Search for {} failed", request.query()))?;

        for warning in &report.warnings {
            eprintln!("warning: {}", warning);
        }

        let output = render(&report.articles, self.ids_only)?;
        match &self.output {
            Some(path) => {
                tokio::fs::write(path, output)
                    .await
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                tracing::info!(
                    path = %path.display(),
                    articles = report.articles.len(),
                    "Results saved to file"
                );
            }
            None => print!("{}", output),
        }

        Ok(())
    }
}

fn render(articles: &[ArticleRecord], ids_only: bool) -> Result<String> {
    let mut output = String::new();
    for article in articles {
        if ids_only {
            output.push_str(&article.id);
        } else {
            output.push_str(
                &serde_json::to_string(article).context("Failed to serialize article")?,
            );
        }
        output.push('\n');
    }
    Ok(output)
}
