//! Command-line interface definitions

pub mod commands;
pub mod prompt;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "planner-cli",
    version,
    about = "Bulk-import tasks into Microsoft Planner from a spreadsheet"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Import tasks from an XLSX file into a plan bucket
    Import(ImportArgs),
    /// List the plans the signed-in user is a member of
    Plans,
    /// List the buckets of a plan
    Buckets(BucketsArgs),
}

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Path to the input spreadsheet (*.xlsx)
    pub file: PathBuf,

    /// Plan id; prompts interactively when omitted
    #[arg(long)]
    pub plan: Option<String>,

    /// Bucket id; prompts interactively when omitted
    #[arg(long)]
    pub bucket: Option<String>,
}

#[derive(Args, Debug)]
pub struct BucketsArgs {
    /// Plan id to list buckets for
    pub plan: String,
}
