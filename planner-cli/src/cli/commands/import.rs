//! Import command handler

use anyhow::{Context, Result, bail};
use colored::*;

use crate::api::PlannerClient;
use crate::cli::ImportArgs;
use crate::cli::prompt;
use crate::config::GraphConfig;
use crate::import::{self, SpreadsheetReader};

pub async fn handle_import_command(args: ImportArgs) -> Result<()> {
    let config = GraphConfig::from_env()?;
    let client = PlannerClient::new(&config)?;

    // Open the spreadsheet before any interactive step, so a bad file
    // fails before the user has picked anything
    let reader = SpreadsheetReader::open(&args.file)
        .with_context(|| format!("Failed to open spreadsheet: {}", args.file.display()))?;

    let plan_id = match args.plan {
        Some(id) => id,
        None => {
            let plans = client.list_plans().await.context("Failed to list plans")?;
            match prompt::select_plan(&plans)? {
                Some(plan) => plan.id.clone(),
                None => bail!("You must select a plan"),
            }
        }
    };

    let bucket_id = match args.bucket {
        Some(id) => id,
        None => {
            let buckets = client
                .list_buckets(&plan_id)
                .await
                .context("Failed to list buckets")?;
            match prompt::select_bucket(&buckets)? {
                Some(bucket) => bucket.id.clone(),
                None => bail!("You must select a bucket"),
            }
        }
    };

    // Spreadsheet order hints are local sort keys, not hints in the
    // service format, so they are never transmitted
    let summary = import::run_import(&client, &plan_id, &bucket_id, false, reader).await?;

    println!(
        "{} {} tasks imported",
        "Import is done:".bright_green().bold(),
        summary.submitted
    );

    Ok(())
}
