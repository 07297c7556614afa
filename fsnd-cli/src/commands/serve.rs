//! HTTP server command
//!
//! Runs either the booking site or the trivia API until Ctrl+C or SIGTERM.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;
use fsnd_core::db::pool_for;
use fsnd_core::{App, AppConfig};

use super::{resolve, AppArg};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Which app to serve
    #[arg(value_enum)]
    pub app: AppArg,

    /// Address to bind to (default: 127.0.0.1:5000 for fyyur, 127.0.0.1:5001 for trivia)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// Database URL (overrides config/environment)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Create missing tables before serving
    #[arg(long)]
    pub migrate: bool,

    /// Allow permissive CORS (all origins) on the booking site - use with caution
    #[arg(long)]
    pub cors_permissive: bool,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs, config: &AppConfig) -> Result<()> {
    let mut settings = resolve(config, args.app, args.database_url);
    if let Some(bind) = args.bind {
        settings.bind = bind;
    }

    tracing::info!("Starting {} server on {}", settings.app.as_str(), settings.bind);

    let pool = pool_for(&settings)
        .await
        .context("Failed to create database pool")?;

    match settings.app {
        App::Fyyur => {
            if args.migrate {
                fyyur_server::migrations::run(&pool)
                    .await
                    .context("Failed to create fyyur tables")?;
            }

            let server = fyyur_server::ServerConfig {
                bind_addr: settings.bind,
                cors_permissive: args.cors_permissive,
            };
            fyyur_server::run_server(pool, server)
                .await
                .context("Server error")?;
        }
        App::Trivia => {
            if args.migrate {
                trivia_server::migrations::run(&pool)
                    .await
                    .context("Failed to create trivia tables")?;
            }
            if args.cors_permissive {
                tracing::debug!("--cors-permissive has no effect: trivia always allows any origin");
            }

            let server = trivia_server::ServerConfig {
                bind_addr: settings.bind,
                page_size: settings.page_size,
            };
            trivia_server::run_server(pool, server)
                .await
                .context("Server error")?;
        }
    }

    Ok(())
}
