use anyhow::{Context, Result};
use catering_companion::catering_config::CateringConfig;
use catering_companion::quantity_display::QuantityPrecision;
use catering_companion::recipe_matcher::MatchMode;
use catering_companion::render::OutputFormat;
use catering_companion::request_handler::{handle_request, run_interactive};
use clap::{Parser, ValueEnum};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

/// Scale catering recipes and print a shopping list and recipe guides
#[derive(Debug, Parser)]
#[command(name = "catering-companion", version, about)]
struct Cli {
    /// Request text, e.g. "Meatballs, Caesar Salad for 300 people"
    request: Vec<String>,

    /// Read one request per line from stdin until EOF or "quit"
    #[arg(short, long)]
    interactive: bool,

    /// Recipe catalog CSV
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// Directory for the generated documents (temporary files when omitted)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Document format: text, markdown or json
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Quantity display: raw or fixed:N
    #[arg(long)]
    precision: Option<QuantityPrecision>,

    /// Recipe name matching: substring or word-boundary
    #[arg(long)]
    match_mode: Option<MatchMode>,

    /// Guest count used when the request has no number
    #[arg(long)]
    default_guests: Option<u32>,

    /// Checkbox columns in the text shopping list
    #[arg(long)]
    columns: Option<usize>,

    /// Language for messages and headings (en, fr)
    #[arg(long)]
    language: Option<String>,

    /// Do not print an affirmation before each plan
    #[arg(long)]
    no_affirmations: bool,

    /// Log output format
    #[arg(long, value_enum, env = "CATERING_LOG_FORMAT", default_value = "text")]
    log_format: LogFormat,
}

impl Cli {
    fn apply_to(&self, config: &mut CateringConfig) {
        if let Some(catalog) = &self.catalog {
            config.catalog_path = catalog.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = Some(dir.clone());
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        if let Some(precision) = self.precision {
            config.precision = precision;
        }
        if let Some(mode) = self.match_mode {
            config.match_mode = mode;
        }
        if let Some(guests) = self.default_guests.filter(|guests| *guests > 0) {
            config.default_guest_count = guests;
        }
        if let Some(columns) = self.columns.filter(|columns| *columns > 0) {
            config.columns = columns;
        }
        if let Some(language) = &self.language {
            config.language = language.to_lowercase();
        }
        if self.no_affirmations {
            config.show_affirmations = false;
        }
    }
}

fn init_logging(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn main() -> Result<ExitCode> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.log_format);

    info!("Starting Catering Companion");

    let mut config = CateringConfig::from_env().context("Invalid configuration")?;
    cli.apply_to(&mut config);

    info!(
        catalog = %config.catalog_path.display(),
        format = ?config.format,
        match_mode = ?config.match_mode,
        "Configuration loaded"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut rng = rand::thread_rng();

    if cli.interactive || cli.request.is_empty() {
        run_interactive(&config, io::stdin().lock(), &mut out, &mut rng)?;
        return Ok(ExitCode::SUCCESS);
    }

    let request = cli.request.join(" ");
    let outcome = handle_request(&config, &request, &mut out, &mut rng)?;

    Ok(if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
