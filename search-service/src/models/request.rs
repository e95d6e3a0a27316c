use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /search`.
///
/// Both fields are kept as raw JSON so that the guard can decide what counts
/// as an active term or collection. Absent fields read as `null`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    #[serde(default, alias = "SearchTerm")]
    pub search_term: Value,
    #[serde(default)]
    pub books: Value,
}
