//! Vercel deployment, projected for the status dashboard.

use serde::Serialize;
use serde_json::Value;

pub const NO_COMMIT_MESSAGE: &str = "No commit message";
pub const NO_COMMIT_SHA: &str = "N/A";

/// A deployment as returned by `GET /api/vercel-deployment`.
///
/// `commit_message` and `commit_sha` are lifted out of the provider's git
/// metadata, with placeholders when the deployment was not made from a commit.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    pub url: String,
    pub state: Option<String>,
    pub meta: Value,
    /// Milliseconds since the Unix epoch.
    pub created_at: i64,
    pub creator: Value,
    pub name: String,
    pub target: Option<String>,
    pub commit_message: String,
    pub commit_sha: String,
}

impl Deployment {
    /// Reads a string entry from `meta`, falling back to `default`.
    pub fn meta_str(meta: &Value, key: &str, default: &str) -> String {
        meta.get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .unwrap_or(default)
            .to_string()
    }
}
