//! CLI command implementations

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Subcommand};
use trawler_core::extractor::DEFAULT_LANGUAGE;
use trawler_core::providers::trakt::TRAKT_BASE_URL;
use trawler_core::{
    CorrectionTable, Extractor, HttpConfig, HttpIndexApi, ModelType, Orchestrator, PageRequest,
    PatternSet, ProviderConfig, RawResult, ScrapeConfig, TitlePattern, TraktMetadata,
};

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Scrape an index and print the enriched records as JSON
    Search(SearchArgs),
    /// Show the attributes extracted from a release title
    Extract {
        /// Release title
        title: String,
        /// Model type whose patterns apply
        #[arg(long, default_value = "movie")]
        model_type: ModelType,
        /// Extra title pattern, tried after the built-in ones (repeatable)
        #[arg(long = "pattern")]
        patterns: Vec<String>,
    },
    /// Show the canonical identifier a slug is looked up under
    Correct {
        /// Slug guess
        slug: String,
        /// Model type whose correction partition applies
        #[arg(long, default_value = "show")]
        model_type: ModelType,
        /// JSON file with extra corrections
        #[arg(long)]
        corrections: Option<PathBuf>,
    },
}

/// Options of the `search` command
#[derive(Args)]
pub struct SearchArgs {
    /// Provider name used in log lines
    #[arg(long, default_value = "Index")]
    pub name: String,
    /// Search endpoint of the index
    #[arg(long)]
    pub index_url: String,
    /// Base URL of the Trakt API
    #[arg(long, default_value = TRAKT_BASE_URL)]
    pub metadata_url: String,
    /// Trakt API key
    #[arg(long, env = "TRAKT_API_KEY", hide_env_values = true)]
    pub api_key: String,
    /// Model type of the index content
    #[arg(long, default_value = "movie")]
    pub model_type: ModelType,
    /// Language sent to the index and assumed for results without one
    #[arg(long)]
    pub language: Option<String>,
    /// Extra query parameter forwarded to the index, as key=value
    #[arg(long = "param", value_parser = parse_param)]
    pub params: Vec<(String, String)>,
    /// Index does not paginate by page number
    #[arg(long)]
    pub unpaged: bool,
    /// Walk only the first page
    #[arg(long)]
    pub single_page: bool,
    /// Maximum metadata lookups in flight
    #[arg(long)]
    pub max_concurrency: Option<usize>,
    /// JSON file with extra corrections
    #[arg(long)]
    pub corrections: Option<PathBuf>,
    /// Print the run report instead of the bare records
    #[arg(long)]
    pub report: bool,
}

/// Handle the CLI command
///
/// # Errors
/// Returns the error of the command that fails
pub async fn handle_command(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Search(args) => search(args).await,
        Commands::Extract {
            title,
            model_type,
            patterns,
        } => extract(&title, model_type, &patterns),
        Commands::Correct {
            slug,
            model_type,
            corrections,
        } => correct(&slug, model_type, corrections.as_deref()),
    }
}

/// Run a full scrape and print the results
///
/// # Errors
/// - Invalid configuration, URLs or API key
/// - Pagination failure of the index
pub async fn search(args: SearchArgs) -> anyhow::Result<()> {
    let config = scrape_config(&args).context("Invalid configuration")?;
    let query = page_request(&args, &config);
    let corrections = load_corrections(args.corrections.as_deref())?;

    let http = HttpConfig::default();
    let index = HttpIndexApi::new(&args.index_url, &http)?;
    let metadata = TraktMetadata::new(&args.metadata_url, &args.api_key, &http)?;

    let provider = ProviderConfig::new(args.name.clone(), args.model_type, query)?;
    let orchestrator = Orchestrator::new(
        provider,
        Arc::new(index),
        Arc::new(metadata),
        Arc::new(corrections),
        &config,
    )?;

    let query = orchestrator.provider().query.clone();
    let report = orchestrator
        .run(&query)
        .await
        .with_context(|| format!("{} scrape aborted", args.name))?;

    let output = if args.report {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string_pretty(&report.content)?
    };
    println!("{output}");

    Ok(())
}

/// Print the attributes extracted from a title and the pattern that matched
///
/// # Errors
/// - A pattern fails to compile or lacks a `title` group
pub fn extract(title: &str, model_type: ModelType, extra: &[String]) -> anyhow::Result<()> {
    let patterns = extraction_patterns(model_type, extra)?;
    let matched = patterns.first_match(title).map(|p| p.as_str().to_string());
    let extractor = Extractor::new(patterns, tracing::Span::current());

    match (extractor.extract(&RawResult::new(title), DEFAULT_LANGUAGE), matched) {
        (Some(attributes), Some(pattern)) => {
            println!("pattern: {pattern}");
            println!("{}", serde_json::to_string_pretty(&attributes)?);
        }
        _ => println!("No pattern matches '{title}'"),
    }

    Ok(())
}

/// Built-in patterns of the model type followed by the extra ones.
fn extraction_patterns(model_type: ModelType, extra: &[String]) -> trawler_core::Result<PatternSet> {
    let mut patterns = PatternSet::defaults_for(model_type.category())?;
    for source in extra {
        patterns.push(TitlePattern::new(source)?);
    }
    Ok(patterns)
}

/// Print the canonical identifier of a slug
///
/// # Errors
/// - Corrections file cannot be read or parsed
pub fn correct(slug: &str, model_type: ModelType, corrections: Option<&Path>) -> anyhow::Result<()> {
    let table = load_corrections(corrections)?;
    println!("{}", table.correct(model_type.category(), slug));
    Ok(())
}

/// Environment configuration with command-line overrides applied.
fn scrape_config(args: &SearchArgs) -> trawler_core::Result<ScrapeConfig> {
    let mut config = ScrapeConfig::from_env();

    if let Some(max_concurrency) = args.max_concurrency {
        config.max_concurrency = max_concurrency;
    }
    if args.single_page {
        config.test_mode_single_page = true;
    }
    if let Some(language) = &args.language {
        config.default_language = language.to_lowercase();
    }

    config.validate()?;
    Ok(config)
}

fn page_request(args: &SearchArgs, config: &ScrapeConfig) -> PageRequest {
    let request = if args.unpaged {
        PageRequest::new(config.default_language.clone())
    } else {
        PageRequest::paged(config.default_language.clone())
    };

    args.params
        .iter()
        .fold(request, |request, (key, value)| request.with_param(key, value))
}

fn load_corrections(path: Option<&Path>) -> anyhow::Result<CorrectionTable> {
    let mut table = CorrectionTable::builtin();
    if let Some(path) = path {
        table.load_overrides(path)?;
    }
    Ok(table)
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))?;
    if key.trim().is_empty() {
        return Err(format!("empty parameter name in '{raw}'"));
    }
    Ok((key.trim().to_string(), value.trim().to_string()))
}
