//! Bulk task import pipeline
//!
//! Reads every task from a spreadsheet, orders them by their order hint
//! and submits them one at a time to a plan and bucket. Submission goes
//! through the `TaskSubmitter` trait so the pipeline can be exercised
//! without a live Graph connection.

pub mod reader;

pub use reader::{OpenError, SpreadsheetReader};

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::api::models::PlannerTask;

/// Creates one task at a time in a plan and bucket
#[async_trait]
pub trait TaskSubmitter: Send + Sync {
    /// Create the task and return its service-assigned id
    async fn submit_task(
        &self,
        plan_id: &str,
        bucket_id: &str,
        send_order_hints: bool,
        task: &PlannerTask,
    ) -> Result<String>;
}

/// What an import run accomplished
#[derive(Debug, Clone, Copy)]
pub struct ImportSummary {
    pub submitted: usize,
}

/// Import a batch of tasks into one bucket.
///
/// Tasks are sorted by order hint (ascending, stable) before submission,
/// so spreadsheet hints control the import order even when they are not
/// sent to the service. Submission is sequential and stops at the first
/// failure.
pub async fn run_import<S, I>(
    submitter: &S,
    plan_id: &str,
    bucket_id: &str,
    send_order_hints: bool,
    tasks: I,
) -> Result<ImportSummary>
where
    S: TaskSubmitter,
    I: IntoIterator<Item = PlannerTask>,
{
    let mut tasks: Vec<PlannerTask> = tasks.into_iter().collect();
    tasks.sort_by(|a, b| a.order_hint.cmp(&b.order_hint));

    log::info!("Importing {} tasks into bucket {}", tasks.len(), bucket_id);

    for task in &tasks {
        let task_id = submitter
            .submit_task(plan_id, bucket_id, send_order_hints, task)
            .await
            .with_context(|| format!("Failed to create task '{}'", task.title))?;
        log::debug!("Imported '{}' as {}", task.title, task_id);
    }

    Ok(ImportSummary {
        submitted: tasks.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::PlannerTaskDetails;
    use anyhow::bail;
    use std::sync::Mutex;

    /// Records every submission; fails when it reaches `fail_on`
    #[derive(Default)]
    struct RecordingSubmitter {
        fail_on: Option<String>,
        calls: Mutex<Vec<(String, String, bool, String)>>,
    }

    #[async_trait]
    impl TaskSubmitter for RecordingSubmitter {
        async fn submit_task(
            &self,
            plan_id: &str,
            bucket_id: &str,
            send_order_hints: bool,
            task: &PlannerTask,
        ) -> Result<String> {
            let mut calls = self.calls.lock().unwrap();
            calls.push((
                plan_id.to_string(),
                bucket_id.to_string(),
                send_order_hints,
                task.title.clone(),
            ));
            if self.fail_on.as_deref() == Some(task.title.as_str()) {
                bail!("Graph API returned 500 Internal Server Error");
            }
            Ok(format!("task-{}", calls.len()))
        }
    }

    fn task(title: &str, order_hint: &str) -> PlannerTask {
        PlannerTask {
            title: title.to_string(),
            percent_complete: 0,
            priority: 5,
            order_hint: order_hint.to_string(),
            details: PlannerTaskDetails::default(),
        }
    }

    #[tokio::test]
    async fn submits_tasks_sorted_by_order_hint() {
        let submitter = RecordingSubmitter::default();
        let tasks = vec![task("Second", "b"), task("First", "a"), task("Third", "c")];

        let summary = run_import(&submitter, "plan-1", "bucket-1", false, tasks)
            .await
            .unwrap();

        assert_eq!(summary.submitted, 3);
        let calls = submitter.calls.lock().unwrap();
        let titles: Vec<&str> = calls.iter().map(|c| c.3.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second", "Third"]);
        for (plan_id, bucket_id, send_order_hints, _) in calls.iter() {
            assert_eq!(plan_id, "plan-1");
            assert_eq!(bucket_id, "bucket-1");
            assert!(!send_order_hints);
        }
    }

    #[tokio::test]
    async fn equal_hints_preserve_row_order() {
        let submitter = RecordingSubmitter::default();
        let tasks = vec![
            task("First", "same"),
            task("Second", "same"),
            task("Zero", "0"),
            task("Third", "same"),
        ];

        run_import(&submitter, "plan-1", "bucket-1", false, tasks)
            .await
            .unwrap();

        let calls = submitter.calls.lock().unwrap();
        let titles: Vec<&str> = calls.iter().map(|c| c.3.as_str()).collect();
        assert_eq!(titles, vec!["Zero", "First", "Second", "Third"]);
    }

    #[tokio::test]
    async fn submission_failure_names_the_task() {
        let submitter = RecordingSubmitter {
            fail_on: Some("Doomed".to_string()),
            ..Default::default()
        };

        let err = run_import(&submitter, "plan-1", "bucket-1", false, vec![task("Doomed", "a")])
            .await
            .unwrap_err();

        assert!(format!("{:#}", err).contains("Failed to create task 'Doomed'"));
    }

    #[tokio::test]
    async fn failure_stops_the_sequence() {
        let submitter = RecordingSubmitter {
            fail_on: Some("Bad".to_string()),
            ..Default::default()
        };
        let tasks = vec![task("Good", "a"), task("Bad", "b"), task("Never sent", "c")];

        let result = run_import(&submitter, "plan-1", "bucket-1", false, tasks).await;

        assert!(result.is_err());
        let calls = submitter.calls.lock().unwrap();
        let titles: Vec<&str> = calls.iter().map(|c| c.3.as_str()).collect();
        assert_eq!(titles, vec!["Good", "Bad"]);
    }

    #[tokio::test]
    async fn empty_input_imports_nothing() {
        let submitter = RecordingSubmitter::default();

        let summary = run_import(&submitter, "plan-1", "bucket-1", false, Vec::new())
            .await
            .unwrap();

        assert_eq!(summary.submitted, 0);
        assert!(submitter.calls.lock().unwrap().is_empty());
    }
}
