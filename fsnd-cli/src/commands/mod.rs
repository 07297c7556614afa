//! Command implementations for the fsnd CLI

pub mod migrate;
pub mod seed;
pub mod serve;

use clap::ValueEnum;
use fsnd_core::{App, AppConfig, ServiceSettings};

// Re-export main dispatcher functions for flat access from main.rs
pub use migrate::run_migrate;
pub use seed::run_seed;
pub use serve::run_serve;

/// App selector shared by every subcommand
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppArg {
    /// Venue/artist/show booking site
    Fyyur,
    /// Trivia question API
    Trivia,
}

impl From<AppArg> for App {
    fn from(arg: AppArg) -> Self {
        match arg {
            AppArg::Fyyur => App::Fyyur,
            AppArg::Trivia => App::Trivia,
        }
    }
}

/// Resolve settings for `app`, letting a `--database-url` flag win over file and env.
pub fn resolve(config: &AppConfig, app: AppArg, database_url: Option<String>) -> ServiceSettings {
    let mut settings = config.service(app.into());
    if let Some(url) = database_url {
        settings.database_url = url;
    }
    settings
}
