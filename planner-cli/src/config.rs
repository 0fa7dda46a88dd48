//! Runtime configuration from the environment
//!
//! Authentication is out of scope for this tool: it expects a ready
//! Graph access token in the environment (or a `.env` file) and never
//! acquires or refreshes one itself.

use anyhow::{Context, Result};

pub const ACCESS_TOKEN_VAR: &str = "GRAPH_ACCESS_TOKEN";
pub const BASE_URL_VAR: &str = "GRAPH_BASE_URL";

const DEFAULT_BASE_URL: &str = "https://graph.microsoft.com/v1.0";

/// Connection settings for the Graph API
#[derive(Debug, Clone)]
pub struct GraphConfig {
    pub base_url: String,
    pub access_token: String,
}

impl GraphConfig {
    pub fn from_env() -> Result<Self> {
        let access_token = std::env::var(ACCESS_TOKEN_VAR).with_context(|| {
            format!(
                "{} is not set; provide a Microsoft Graph access token with Tasks.ReadWrite scope",
                ACCESS_TOKEN_VAR
            )
        })?;

        let base_url = std::env::var(BASE_URL_VAR)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            base_url,
            access_token,
        })
    }
}
