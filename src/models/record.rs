use chrono::{DateTime, Utc};
use serde::Serialize;

/// Metadata persisted once per successful generation, under the owning
/// user's record subtree. Never mutated after creation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRecord {
    pub prompt: String,
    pub original_url: Option<String>,
    pub input_image_url: Option<String>,
    pub has_input_image: bool,
    pub aspect_ratio: Option<String>,
    pub generated_images: Vec<String>,
    pub count: usize,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Per-user activity stamp, upserted with merge semantics on every request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub last_active: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}
