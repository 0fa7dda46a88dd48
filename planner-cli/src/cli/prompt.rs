//! Interactive selection prompts

use anyhow::{Context, Result};
use dialoguer::{Select, theme::ColorfulTheme};

use crate::api::models::{PlannerBucket, PlannerPlan};

/// Let the user pick a plan. `None` when the list is empty or the
/// prompt was dismissed without choosing.
pub fn select_plan(plans: &[PlannerPlan]) -> Result<Option<&PlannerPlan>> {
    if plans.is_empty() {
        return Ok(None);
    }

    let labels: Vec<String> = plans.iter().map(plan_label).collect();
    let picked = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Select a plan")
        .items(&labels)
        .default(0)
        .interact_opt()
        .context("Plan selection failed")?;

    Ok(picked.map(|index| &plans[index]))
}

/// Same contract as `select_plan`, for buckets
pub fn select_bucket(buckets: &[PlannerBucket]) -> Result<Option<&PlannerBucket>> {
    if buckets.is_empty() {
        return Ok(None);
    }

    let labels: Vec<String> = buckets.iter().map(bucket_label).collect();
    let picked = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Select a bucket")
        .items(&labels)
        .default(0)
        .interact_opt()
        .context("Bucket selection failed")?;

    Ok(picked.map(|index| &buckets[index]))
}

fn plan_label(plan: &PlannerPlan) -> String {
    format!("{} ({})", plan.title, plan.id)
}

fn bucket_label(bucket: &PlannerBucket) -> String {
    format!("{} ({})", bucket.name, bucket.id)
}
