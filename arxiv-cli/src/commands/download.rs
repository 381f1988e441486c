use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Args;

use super::{ClientSettings, SearchArgs, create_arxiv_client};

#[derive(Args, Debug)]
pub struct Download {
    #[command(flatten)]
    args: SearchArgs,

    /// Directory the PDFs are written to
    #[arg(short, long, default_value = "arxiv_pdf")]
    output_dir: PathBuf,
}

impl Download {
    pub async fn execute(&self, settings: &ClientSettings) -> Result<()> {
        let client = create_arxiv_client(settings)?;
        let request = self.args.build_request()?;

        let articles = client
            .fetch_articles(&request)
            .await
            .with_context(|| format!("Search for {} failed", request.query()))?;

        let report = client
            .download_articles(&articles, &self.output_dir)
            .await
            .context("Failed to prepare download directory")?;

        println!(
            "Downloaded {} of {} PDFs to {} ({} without a PDF link)",
            report.downloaded.len(),
            articles.len(),
            self.output_dir.display(),
            report.skipped
        );

        if !report.is_success() {
            for failure in &report.failures {
                eprintln!("{}", failure);
            }
            bail!("{} downloads failed", report.failures.len());
        }

        Ok(())
    }
}
