//! One-shot subcommands that talk to the service without starting the TUI.

use std::fmt;
use std::io::{self, Write};

use clap::Subcommand;

use crate::api::{ApiError, Review, ReviewService};
use crate::core::config::ResolvedConfig;
use crate::core::validation::validate_review_text;

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Submit a review for sentiment analysis and print the result
    Analyze {
        /// Product the review is about
        #[arg(short, long)]
        product: Option<String>,
        /// Review text (at least 10 characters)
        text: String,
    },
    /// List recent reviews, honouring --filter and --limit
    List,
    /// Check whether the review service is reachable
    Health,
}

#[derive(Debug)]
pub enum CliError {
    Validation(&'static str),
    Api(ApiError),
    Io(io::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Validation(msg) => f.write_str(msg),
            CliError::Api(e) => write!(f, "{e}"),
            CliError::Io(e) => write!(f, "output error: {e}"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<ApiError> for CliError {
    fn from(e: ApiError) -> Self {
        CliError::Api(e)
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e)
    }
}

pub async fn run_command(
    command: Command,
    config: &ResolvedConfig,
    service: &dyn ReviewService,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match command {
        Command::Analyze { product, text } => {
            validate_review_text(&text).map_err(CliError::Validation)?;
            let review = service
                .analyze_review(product.as_deref().unwrap_or(""), &text)
                .await?;
            write!(out, "{}", format_result(&review))?;
        }
        Command::List => {
            let reviews = service
                .list_reviews(config.list_limit, config.default_filter.sentiment())
                .await?;
            if reviews.is_empty() {
                writeln!(out, "No reviews yet")?;
            } else {
                writeln!(out, "Recent Reviews ({})", reviews.len())?;
                for review in &reviews {
                    write!(out, "{}", format_list_entry(review))?;
                }
            }
        }
        Command::Health => {
            service.health_check().await?;
            writeln!(out, "{}: online", config.base_url)?;
        }
    }
    Ok(())
}

fn format_result(review: &Review) -> String {
    let mut text = format!(
        "Product:   {}\nSentiment: {} {} ({})\nKey points:\n",
        review.product_name,
        review.sentiment.glyph(),
        review.sentiment.as_str().to_uppercase(),
        review.score_percent()
    );
    for point in review.key_point_lines() {
        text.push_str(&format!("  {point}\n"));
    }
    text.push_str("Review:\n");
    for line in review.review_text.lines() {
        text.push_str(&format!("  {line}\n"));
    }
    text
}

fn format_list_entry(review: &Review) -> String {
    format!(
        "[{}] {}  Score: {}  {}\n    {}\n",
        review.sentiment.as_str(),
        review.product_name,
        review.score_percent_rounded(),
        review.date_label(),
        review.preview().replace('\n', " ")
    )
}
