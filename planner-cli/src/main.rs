//! Bulk-import tasks into Microsoft Planner from an XLSX spreadsheet

mod api;
mod cli;
mod config;
mod import;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Import(args) => cli::commands::handle_import_command(args).await,
        Commands::Plans => cli::commands::handle_plans_command().await,
        Commands::Buckets(args) => cli::commands::handle_buckets_command(args).await,
    }
}
