use std::fs::File;

use clap::Parser;
use review_analyzer::api::{ReviewClient, SentimentFilter};
use review_analyzer::cli::{self, Command};
use review_analyzer::core::config::{self, CliOverrides};
use review_analyzer::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

#[derive(Parser)]
#[command(
    name = "review-analyzer",
    about = "Analyze product reviews with a remote sentiment service"
)]
struct Args {
    /// Base URL of the review service (e.g. http://127.0.0.1:5000/api)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Sentiment filter for the review list
    #[arg(short, long, global = true, value_enum)]
    filter: Option<SentimentFilter>,

    /// Maximum number of reviews to fetch
    #[arg(short, long, global = true)]
    limit: Option<u32>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // File logger: the TUI owns stdout
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("review-analyzer.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: {e}, using defaults");
            log::warn!("Config load failed: {e}");
            config::AnalyzerConfig::default()
        }
    };
    let overrides = CliOverrides {
        base_url: args.api_url,
        list_limit: args.limit,
        filter: args.filter,
    };
    let resolved = config::resolve(&file_config, &overrides);

    log::info!(
        "Review analyzer starting: base_url={}, limit={}, filter={:?}",
        resolved.base_url,
        resolved.list_limit,
        resolved.default_filter
    );

    match args.command {
        None => tui::run(resolved),
        Some(command) => {
            let service = ReviewClient::new(resolved.base_url.clone());
            let mut stdout = std::io::stdout();
            if let Err(e) = cli::run_command(command, &resolved, &service, &mut stdout).await {
                log::warn!("Command failed: {e}");
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
            Ok(())
        }
    }
}
