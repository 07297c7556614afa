//! fsnd CLI - runs the fyyur booking site and the trivia API
//!
//! - `serve`: start one of the two HTTP servers
//! - `migrate`: create the tables an app needs
//! - `seed`: insert the default trivia categories
//! - `completions`: shell completion scripts

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use fsnd_core::AppConfig;

mod commands;
mod tracing_setup;

use tracing_setup::{init_tracing, TracingConfig};

#[derive(Parser, Debug)]
#[command(
    name = "fsnd",
    author,
    version,
    about = "Serve the fyyur booking site and the trivia API",
    long_about = "Two small PostgreSQL-backed web apps behind one binary: fyyur lists venues, \
                  artists and shows; trivia serves a paginated question bank and a quiz."
)]
struct Cli {
    /// Config file (default: ~/.fsnd/config.toml when present)
    #[arg(long, global = true, value_name = "PATH", env = "FSND_CONFIG")]
    config: Option<PathBuf>,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run an HTTP server until Ctrl+C
    Serve(commands::serve::ServeArgs),
    /// Create an app's tables if they don't exist
    Migrate(commands::migrate::MigrateArgs),
    /// Insert default data (trivia categories)
    Seed(commands::seed::SeedArgs),
    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(Parser, Debug)]
struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: Shell,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)] // PowerShell is a proper noun, not a suffix
enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine; real env vars are never overwritten
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(&TracingConfig { debug: cli.debug }).ok();

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Serve(args) => commands::run_serve(args, &load_config(config_path)?).await?,
        Commands::Migrate(args) => commands::run_migrate(args, &load_config(config_path)?).await?,
        Commands::Seed(args) => commands::run_seed(args, &load_config(config_path)?).await?,
        Commands::Completions(args) => run_completions(args)?,
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    AppConfig::load(path).context("Failed to load configuration")
}

fn run_completions(args: CompletionsArgs) -> Result<()> {
    use clap::CommandFactory;
    use clap_complete::{generate, Shell as CompletionShell};
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();

    let shell = match args.shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
        Shell::Elvish => CompletionShell::Elvish,
    };

    generate(shell, &mut cmd, bin_name, &mut io::stdout());

    Ok(())
}
