use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /evaluate`. The context must be a JSON object; anything
/// else is rejected during deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct EvalRequest {
    pub context: serde_json::Map<String, Value>,
    pub rule: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EvalResponse {
    pub result: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}
