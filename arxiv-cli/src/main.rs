use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod commands;

#[derive(Parser)]
#[command(
    name = "arxiv-cli",
    about = "Command-line interface for the arXiv search API",
    long_about = "Build arXiv queries, page through search results and download the linked PDFs"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// arXiv API endpoint
    #[arg(long, env = "ARXIV_BASE_URL", global = true)]
    base_url: Option<String>,

    /// Pause between result pages, in seconds (a random jitter is added)
    #[arg(long, env = "ARXIV_PAGE_DELAY", global = true)]
    page_delay: Option<f64>,

    /// HTTP request timeout in seconds
    #[arg(long, env = "ARXIV_TIMEOUT", global = true)]
    timeout: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print an encoded search_query string without contacting arXiv
    Query(commands::query::Query),
    /// Search arXiv and print the records as JSON lines
    Search(commands::search::Search),
    /// Search arXiv and download the PDF of every result
    Download(commands::download::Download),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();

    let settings = commands::ClientSettings {
        base_url: cli.base_url.clone(),
        page_delay: cli.page_delay,
        timeout: cli.timeout,
    };

    match &cli.command {
        Commands::Query(cmd) => cmd.execute(),
        Commands::Search(cmd) => cmd.execute(&settings).await,
        Commands::Download(cmd) => cmd.execute(&settings).await,
    }
}
