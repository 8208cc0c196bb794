//! Tope CLI - file-based harness for the look-ahead limiter.

mod commands;
mod export;
mod preset;
mod signal;
mod wav;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tope")]
#[command(author, version, about = "Look-ahead peak limiter CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a WAV file through the limiter
    Process(commands::process::ProcessArgs),

    /// Generate test signals
    Generate(commands::generate::GenerateArgs),

    /// Measure block-processing speed
    Timing(commands::timing::TimingArgs),
}

fn main() -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Process(args) => commands::process::run(args),
        Commands::Generate(args) => commands::generate::run(args),
        Commands::Timing(args) => commands::timing::run(args),
    }
}
