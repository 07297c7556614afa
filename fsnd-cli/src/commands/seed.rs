//! Default data command

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use fsnd_core::db::pool_for;
use fsnd_core::AppConfig;
use trivia_server::db::repos::CategoryRepo;

use super::{resolve, AppArg};

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedTarget {
    /// The six standard trivia categories
    Trivia,
}

#[derive(Parser, Debug)]
pub struct SeedArgs {
    /// What to seed
    #[arg(value_enum)]
    pub target: SeedTarget,

    /// Database URL (overrides config/environment)
    #[arg(long)]
    pub database_url: Option<String>,
}

pub async fn run_seed(args: SeedArgs, config: &AppConfig) -> Result<()> {
    match args.target {
        SeedTarget::Trivia => {
            let settings = resolve(config, AppArg::Trivia, args.database_url);
            let pool = pool_for(&settings)
                .await
                .context("Failed to create database pool")?;

            trivia_server::migrations::run(&pool)
                .await
                .context("Failed to create trivia tables")?;
            let inserted = CategoryRepo::new(&pool)
                .seed_defaults()
                .await
                .context("Failed to seed categories")?;

            if inserted == 0 {
                println!("Categories already present; nothing to seed");
            } else {
                println!("Seeded {inserted} categories");
            }
            pool.close().await;
        }
    }

    Ok(())
}
