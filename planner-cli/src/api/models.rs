//! Microsoft Planner data models

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A Planner plan as returned by `/me/planner/plans`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannerPlan {
    pub id: String,
    pub title: String,
    /// Group that owns the plan
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub created_date_time: Option<DateTime<Utc>>,
}

/// A bucket inside a plan
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannerBucket {
    pub id: String,
    pub name: String,
    pub plan_id: String,
    pub order_hint: String,
}

/// A task record ready for submission to Planner
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannerTask {
    pub title: String,
    /// 0 = not started, 50 = in progress, 100 = completed
    pub percent_complete: i32,
    /// 0-10, lower is more urgent
    pub priority: i32,
    /// Ordering key; Planner only accepts hints in its own service format
    pub order_hint: String,
    pub details: PlannerTaskDetails,
}

/// The details blob attached to a task (description, checklist, references)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannerTaskDetails {
    pub description: String,
    pub checklist: HashMap<String, ChecklistItem>,
    pub references: HashMap<String, ExternalReference>,
}

impl PlannerTaskDetails {
    /// True when there is nothing worth sending to the details endpoint
    pub fn is_empty(&self) -> bool {
        self.description.is_empty() && self.checklist.is_empty() && self.references.is_empty()
    }
}

/// A checklist entry, keyed by a client-generated id in the details map
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    pub title: String,
    pub is_checked: bool,
    pub order_hint: String,
}

/// An external reference (link), keyed by encoded URL in the details map
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalReference {
    pub alias: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub preview_priority: String,
}

/// Graph collection envelope: `{ "value": [...], "@odata.nextLink": ... }`
#[derive(Debug, Clone, Deserialize)]
pub struct GraphCollection<T> {
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
    #[serde(rename = "@odata.nextLink", default)]
    pub next_link: Option<String>,
}

/// The slice of a task creation response we care about
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedTask {
    pub id: String,
}

/// Etag carried on a task details response, needed for `If-Match` updates
#[derive(Debug, Clone, Deserialize)]
pub struct TaskDetailsEtag {
    #[serde(rename = "@odata.etag")]
    pub etag: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plan_collection_deserializes_graph_envelope() {
        let body = json!({
            "@odata.nextLink": "https://graph.microsoft.com/v1.0/me/planner/plans?$skiptoken=abc",
            "value": [
                {
                    "id": "plan-1",
                    "title": "Roadmap",
                    "owner": "group-9",
                    "createdDateTime": "2024-03-01T09:30:00Z"
                },
                { "id": "plan-2", "title": "Backlog" }
            ]
        });

        let collection: GraphCollection<PlannerPlan> = serde_json::from_value(body).unwrap();
        assert_eq!(collection.value.len(), 2);
        assert_eq!(collection.value[0].id, "plan-1");
        assert_eq!(collection.value[0].owner.as_deref(), Some("group-9"));
        assert!(collection.value[1].owner.is_none());
        assert!(collection.next_link.is_some());
    }

    #[test]
    fn bucket_fields_use_graph_casing() {
        let body = json!({
            "id": "bucket-1",
            "name": "To do",
            "planId": "plan-1",
            "orderHint": "8585269",
        });

        let bucket: PlannerBucket = serde_json::from_value(body).unwrap();
        assert_eq!(bucket.plan_id, "plan-1");
        assert_eq!(bucket.order_hint, "8585269");
    }

    #[test]
    fn empty_details_serialize_with_empty_collections() {
        let details = PlannerTaskDetails {
            description: "Ship it".to_string(),
            ..Default::default()
        };

        let body = serde_json::to_value(&details).unwrap();
        assert_eq!(body["description"], "Ship it");
        assert_eq!(body["checklist"], json!({}));
        assert_eq!(body["references"], json!({}));
    }

    #[test]
    fn details_emptiness_checks_every_collection() {
        assert!(PlannerTaskDetails::default().is_empty());

        let with_description = PlannerTaskDetails {
            description: "notes".to_string(),
            ..Default::default()
        };
        assert!(!with_description.is_empty());

        let mut with_checklist = PlannerTaskDetails::default();
        with_checklist.checklist.insert(
            "item-1".to_string(),
            ChecklistItem {
                title: "step one".to_string(),
                is_checked: false,
                order_hint: " !".to_string(),
            },
        );
        assert!(!with_checklist.is_empty());
    }

    #[test]
    fn created_task_takes_id_from_full_task_payload() {
        let body = json!({
            "@odata.etag": "W/\"JzEtVGFzayAgQEBAQEBAQEBAQEBAQEBARCc=\"",
            "id": "task-42",
            "title": "Write docs",
            "planId": "plan-1",
            "bucketId": "bucket-1",
            "percentComplete": 0,
            "priority": 5,
        });

        let created: CreatedTask = serde_json::from_value(body).unwrap();
        assert_eq!(created.id, "task-42");
    }

    #[test]
    fn details_etag_is_read_from_odata_annotation() {
        let body = json!({
            "@odata.etag": "W/\"JzEtVGFzayBkZXRhaWxzJw==\"",
            "id": "task-42",
            "description": "",
        });

        let details: TaskDetailsEtag = serde_json::from_value(body).unwrap();
        assert_eq!(details.etag, "W/\"JzEtVGFzayBkZXRhaWxzJw==\"");
    }
}
