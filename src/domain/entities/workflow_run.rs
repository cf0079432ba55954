//! GitHub Actions workflow run, projected to the fields the dashboard shows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single workflow run.
///
/// Deserializes straight from the GitHub REST payload; unknown fields are dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowRun {
    pub id: u64,
    pub status: Option<String>,
    pub conclusion: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub html_url: String,
    pub name: Option<String>,
    pub event: String,
}
