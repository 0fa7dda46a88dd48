//! Microsoft Graph API client for Planner
//!
//! Covers the small slice of the Graph surface this tool needs: listing
//! plans and buckets, creating tasks, and updating task details.

pub mod client;
pub mod models;

pub use client::PlannerClient;
pub use models::{PlannerBucket, PlannerPlan, PlannerTask, PlannerTaskDetails};
