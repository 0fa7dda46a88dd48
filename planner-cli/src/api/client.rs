//! HTTP client for the Planner endpoints of the Microsoft Graph API

use std::time::Duration;

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::api::models::{
    CreatedTask, GraphCollection, PlannerBucket, PlannerPlan, PlannerTask, PlannerTaskDetails,
    TaskDetailsEtag,
};
use crate::config::GraphConfig;
use crate::import::TaskSubmitter;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Authenticated client scoped to one Graph base URL
pub struct PlannerClient {
    http: reqwest::Client,
    base_url: String,
}

impl PlannerClient {
    pub fn new(config: &GraphConfig) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.access_token))
            .context("Access token contains characters not allowed in an Authorization header")?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// All plans the signed-in user is a member of
    pub async fn list_plans(&self) -> Result<Vec<PlannerPlan>> {
        self.list_collection("/me/planner/plans").await
    }

    /// All buckets of a plan
    pub async fn list_buckets(&self, plan_id: &str) -> Result<Vec<PlannerBucket>> {
        self.list_collection(&format!("/planner/plans/{}/buckets", plan_id))
            .await
    }

    pub async fn create_task(
        &self,
        plan_id: &str,
        bucket_id: &str,
        send_order_hints: bool,
        task: &PlannerTask,
    ) -> Result<CreatedTask> {
        let body = create_task_body(plan_id, bucket_id, send_order_hints, task);
        let response = self
            .http
            .post(self.url("/planner/tasks"))
            .json(&body)
            .send()
            .await
            .context("Task creation request failed")?;
        Self::parse_json_response(response).await
    }

    /// Overwrite a task's details. Graph requires the current etag in `If-Match`.
    pub async fn update_task_details(
        &self,
        task_id: &str,
        details: &PlannerTaskDetails,
    ) -> Result<()> {
        let etag = self.task_details_etag(task_id).await?;
        let response = self
            .http
            .patch(self.url(&format!("/planner/tasks/{}/details", task_id)))
            .header(header::IF_MATCH, etag)
            .json(details)
            .send()
            .await
            .context("Task details update request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("Graph API returned {}: {}", status, body);
        }
        Ok(())
    }

    async fn task_details_etag(&self, task_id: &str) -> Result<String> {
        let url = self.url(&format!("/planner/tasks/{}/details", task_id));
        let details: TaskDetailsEtag = self.get_json(&url).await?;
        Ok(details.etag)
    }

    /// Follow `@odata.nextLink` until the collection is exhausted
    async fn list_collection<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let mut items = Vec::new();
        let mut url = self.url(path);

        loop {
            let page: GraphCollection<T> = self.get_json(&url).await?;
            items.extend(page.value);
            match page.next_link {
                Some(next) => url = next,
                None => break,
            }
        }

        Ok(items)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?;
        Self::parse_json_response(response).await
    }

    async fn parse_json_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("Graph API returned {}: {}", status, body);
        }
        response
            .json()
            .await
            .context("Failed to decode Graph API response")
    }
}

/// Task creation payload. The order hint is only included on request because
/// Planner rejects hints that are not in its own service format.
fn create_task_body(
    plan_id: &str,
    bucket_id: &str,
    send_order_hints: bool,
    task: &PlannerTask,
) -> Value {
    let mut body = json!({
        "planId": plan_id,
        "bucketId": bucket_id,
        "title": task.title,
        "percentComplete": task.percent_complete,
        "priority": task.priority,
    });
    if send_order_hints {
        body["orderHint"] = Value::String(task.order_hint.clone());
    }
    body
}

#[async_trait]
impl TaskSubmitter for PlannerClient {
    async fn submit_task(
        &self,
        plan_id: &str,
        bucket_id: &str,
        send_order_hints: bool,
        task: &PlannerTask,
    ) -> Result<String> {
        let created = self
            .create_task(plan_id, bucket_id, send_order_hints, task)
            .await?;
        log::debug!("Created task {} for '{}'", created.id, task.title);

        if !task.details.is_empty() {
            self.update_task_details(&created.id, &task.details)
                .await
                .with_context(|| {
                    format!(
                        "Task {} was created but its details could not be updated",
                        created.id
                    )
                })?;
        }

        Ok(created.id)
    }
}
