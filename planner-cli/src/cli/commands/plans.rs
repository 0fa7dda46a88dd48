//! Plan and bucket listing commands

use anyhow::{Context, Result};
use colored::*;

use crate::api::PlannerClient;
use crate::cli::BucketsArgs;
use crate::config::GraphConfig;

pub async fn handle_plans_command() -> Result<()> {
    let config = GraphConfig::from_env()?;
    let client = PlannerClient::new(&config)?;

    let plans = client.list_plans().await.context("Failed to list plans")?;

    if plans.is_empty() {
        println!("No plans found for this account");
        return Ok(());
    }

    for plan in plans {
        println!("{}  {}", plan.id.cyan(), plan.title);
    }

    Ok(())
}

pub async fn handle_buckets_command(args: BucketsArgs) -> Result<()> {
    let config = GraphConfig::from_env()?;
    let client = PlannerClient::new(&config)?;

    let buckets = client
        .list_buckets(&args.plan)
        .await
        .context("Failed to list buckets")?;

    if buckets.is_empty() {
        println!("Plan {} has no buckets", args.plan);
        return Ok(());
    }

    for bucket in buckets {
        println!("{}  {}", bucket.id.cyan(), bucket.name);
    }

    Ok(())
}
