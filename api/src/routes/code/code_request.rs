use serde::{Deserialize, Serialize};

/// Request payload for /api/code.
#[derive(Debug, Deserialize)]
pub struct CodeRequest {
    /// Source code to transform.
    pub code: String,
    /// Task wire name: `spiegazione`, `traduzione`, or `fix`.
    pub task: String,
    /// Target language for `traduzione`; ignored by the other tasks.
    #[serde(default)]
    pub target_lang: Option<String>,
    /// Source language tag; defaults to `python` when omitted.
    #[serde(default)]
    pub source_lang: Option<String>,
}

/// Response payload for /api/code.
#[derive(Debug, Serialize)]
pub struct CodeResponse {
    /// Highlighted markup with changed lines flagged.
    pub result: String,
}
