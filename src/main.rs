use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use semscore::config::Config;
use semscore::embedding::lazy::LazyEmbedder;
use semscore::listing::{self, AppListing};
use semscore::resources::download;
use semscore::scoring::evaluate::evaluate_listing;
use semscore::scoring::weights::SectionWeights;
use semscore::text::lemmatizer::WordNetLemmatizer;
use semscore::text::normalize::TextNormalizer;

/// semscore: semantic keyword relevance for app store listings.
///
/// Embeds a listing's title, short description and long description with a
/// sentence-transformer model and scores each against a target keyword.
#[derive(Parser)]
#[command(name = "semscore", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Score the built-in photo editor listing against "edit photos" (default)
    Demo {
        /// Print the scores as JSON
        #[arg(long)]
        json: bool,
    },

    /// Score a listing against a keyword
    Score(ScoreArgs),

    /// Download the embedding model (~420 MB) and the WordNet lexicon
    Download,

    /// Show where resources are stored and whether they are installed
    Status,
}

#[derive(Args)]
struct ScoreArgs {
    /// Keyword to score the listing against
    #[arg(long, short)]
    keyword: String,

    /// JSON file with title, short_description and long_description
    #[arg(long, conflicts_with_all = ["title", "short", "long"])]
    listing: Option<PathBuf>,

    /// App title
    #[arg(long, required_unless_present = "listing")]
    title: Option<String>,

    /// Short description
    #[arg(long, required_unless_present = "listing")]
    short: Option<String>,

    /// Long description
    #[arg(long, required_unless_present = "listing")]
    long: Option<String>,

    /// Weight of the title score
    #[arg(long, default_value_t = 0.3)]
    title_weight: f64,

    /// Weight of the short description score
    #[arg(long, default_value_t = 0.5)]
    short_weight: f64,

    /// Weight of the long description score
    #[arg(long, default_value_t = 0.2)]
    long_weight: f64,

    /// Print the scores as JSON
    #[arg(long)]
    json: bool,
}

impl ScoreArgs {
    fn listing(&self) -> Result<AppListing> {
        match &self.listing {
            Some(path) => AppListing::from_json_file(path),
            None => Ok(AppListing::new(
                self.title.clone().unwrap_or_default(),
                self.short.clone().unwrap_or_default(),
                self.long.clone().unwrap_or_default(),
            )),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Logs go to stderr so stdout carries only the report
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("semscore=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command.unwrap_or(Commands::Demo { json: false }) {
        Commands::Demo { json } => {
            let listing = listing::example_listing();
            run_score(
                &config,
                &listing,
                listing::EXAMPLE_KEYWORD,
                &SectionWeights::default(),
                json,
            )
            .await?;
        }

        Commands::Score(args) => {
            // Reject bad input before any resource work.
            let weights =
                SectionWeights::new(args.title_weight, args.short_weight, args.long_weight)?;
            let listing = args.listing()?;
            run_score(&config, &listing, &args.keyword, &weights, args.json).await?;
        }

        Commands::Download => {
            println!("Downloading resources...");
            println!("  Model destination: {}", config.model_dir.display());
            println!("  Lexicon destination: {}", config.lexicon_dir.display());

            let mut stdout = std::io::stdout();
            download::download_model(&config.model_dir, &config.model_url, &mut stdout).await?;
            download::download_lexicon(&config.lexicon_dir, &config.lexicon_url, &mut stdout)
                .await?;

            println!("\n{}", "Resources downloaded successfully.".bold());
            println!("You can now run `semscore score --keyword <keyword> ...`.");
        }

        Commands::Status => {
            semscore::status::show(&config);
        }
    }

    Ok(())
}

/// Bootstrap resources, build the pipeline and print one report.
async fn run_score(
    config: &Config,
    listing: &AppListing,
    keyword: &str,
    weights: &SectionWeights,
    json: bool,
) -> Result<()> {
    semscore::resources::ensure_resources(config).await?;

    let lemmatizer = WordNetLemmatizer::load(&config.lexicon_dir)?;
    let normalizer = TextNormalizer::new(Arc::new(lemmatizer));
    let embedder = LazyEmbedder::new(&config.model_dir);

    info!(keyword, "Scoring listing");
    let scores = evaluate_listing(&normalizer, &embedder, listing, keyword, weights).await?;

    semscore::output::print_report(keyword, &scores, json)
}
