use crate::config::AppConfig;
use crate::errors::AppResult;
use clap::{Parser, Subcommand};

pub mod commands;

/// Bitcoin payment input classifier
#[derive(Parser)]
#[command(name = "payment-intake")]
#[command(about = "Classify Bitcoin payment input: addresses, keys, URIs, payment requests and transactions")]
#[command(version)]
pub struct Cli {
    /// Show debug logging (overrides RUST_LOG and config)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Classify text or a typed binary file and print the outcome as JSON
    Classify(commands::classify::ClassifyCommand),
    /// Encode a raw transaction (hex) into its Base43 barcode form
    EncodeTx(commands::encode::EncodeTxCommand),
    /// Encode a serialized payment request (hex) as a BITCOIN: payload
    EncodeRequest(commands::encode::EncodeRequestCommand),
}

pub async fn run() -> AppResult<()> {
    let cli = Cli::parse();
    let config = AppConfig::get_defaults();

    // Initialise tracing subscriber to capture info!() macros
    // Uses RUST_LOG environment variable (defaults to config logging.filter if not set)
    let filter = if cli.verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.filter))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    match cli.command {
        Commands::Classify(command) => command.run(&config),
        Commands::EncodeTx(command) => command.run(),
        Commands::EncodeRequest(command) => command.run(),
    }
}
