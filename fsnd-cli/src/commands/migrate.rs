//! Schema bootstrap command

use anyhow::{Context, Result};
use clap::Parser;
use fsnd_core::db::pool_for;
use fsnd_core::{App, AppConfig};

use super::{resolve, AppArg};

#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Which app's tables to create
    #[arg(value_enum)]
    pub app: AppArg,

    /// Database URL (overrides config/environment)
    #[arg(long)]
    pub database_url: Option<String>,
}

pub async fn run_migrate(args: MigrateArgs, config: &AppConfig) -> Result<()> {
    let settings = resolve(config, args.app, args.database_url);
    let pool = pool_for(&settings)
        .await
        .context("Failed to create database pool")?;

    let bootstrap = match settings.app {
        App::Fyyur => fyyur_server::migrations::run(&pool).await,
        App::Trivia => trivia_server::migrations::run(&pool).await,
    };
    bootstrap.with_context(|| format!("Failed to create {} tables", settings.app.as_str()))?;

    pool.close().await;
    Ok(())
}
