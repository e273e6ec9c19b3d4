use crate::{
    config::FirestoreConfig,
    error::{GenError, Result},
    models::{GenerationRecord, UserRecord},
};
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::Client;
use serde_json::{json, Value};

const DEFAULT_BASE_URL: &str = "https://firestore.googleapis.com";
const DEFAULT_DATABASE: &str = "photo";

/// Metadata store over the Firestore REST API. Two writes per generation:
/// a merge upsert of the per-user activity document and a create of the
/// per-generation record. No transaction spans the two.
#[derive(Debug)]
pub struct FirestoreClient {
    client: Client,
    base_url: String,
    project_id: String,
    database: String,
    access_token: Option<String>,
}

impl FirestoreClient {
    pub fn new(config: FirestoreConfig) -> Result<Self> {
        let project_id = config
            .project_id
            .ok_or_else(|| GenError::ConfigError("Firestore project id is required".into()))?;

        Ok(Self {
            client: Client::new(),
            base_url: config
                .base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            project_id,
            database: config
                .database
                .unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
            access_token: config.access_token,
        })
    }

    fn document_url(&self, path: &str) -> String {
        format!(
            "{}/v1/projects/{}/databases/{}/documents/{}",
            self.base_url, self.project_id, self.database, path
        )
    }

    async fn patch_document(
        &self,
        path: &str,
        fields: Value,
        mask_paths: &[&str],
    ) -> Result<()> {
        let url = self.document_url(path);

        let mut query: Vec<(&str, &str)> = Vec::new();
        for field in mask_paths.iter().copied() {
            query.push(("updateMask.fieldPaths", field));
        }

        let mut request = self
            .client
            .patch(&url)
            .query(&query)
            .json(&json!({ "fields": fields }));

        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| GenError::DatabaseError(format!("Firestore request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GenError::DatabaseError(format!(
                "Firestore write failed ({}): {}",
                status, body
            )));
        }

        Ok(())
    }

    /// Merge-upsert the user's activity document. Only the two timestamp
    /// fields are in the update mask, so other fields survive the write.
    pub async fn upsert_user(&self, uid: &str) -> Result<()> {
        let record = UserRecord {
            last_active: Utc::now(),
            created_at: Utc::now(),
        };

        let fields = json!({
            "lastActive": timestamp_value(&record.last_active),
            "createdAt": timestamp_value(&record.created_at),
        });

        self.patch_document(
            &format!("users/{}", uid),
            fields,
            &["lastActive", "createdAt"],
        )
        .await
    }

    /// Create the immutable per-generation record under the user's subtree.
    pub async fn create_generation(
        &self,
        uid: &str,
        generation_id: &str,
        record: &GenerationRecord,
    ) -> Result<()> {
        let path = format!("users/{}/generations/{}", uid, generation_id);
        log::debug!("Writing generation record to {}", path);
        self.patch_document(&path, encode_generation_record(record), &[])
            .await
    }
}

fn timestamp_value(timestamp: &DateTime<Utc>) -> Value {
    json!({ "timestampValue": timestamp.to_rfc3339_opts(SecondsFormat::Millis, true) })
}

fn optional_string_value(value: &Option<String>) -> Value {
    match value {
        Some(s) => json!({ "stringValue": s }),
        None => json!({ "nullValue": null }),
    }
}

/// Firestore typed-value encoding of a generation record. Integer values are
/// strings on the wire.
fn encode_generation_record(record: &GenerationRecord) -> Value {
    let urls: Vec<Value> = record
        .generated_images
        .iter()
        .map(|url| json!({ "stringValue": url }))
        .collect();

    json!({
        "prompt": { "stringValue": record.prompt },
        "originalUrl": optional_string_value(&record.original_url),
        "inputImageUrl": optional_string_value(&record.input_image_url),
        "hasInputImage": { "booleanValue": record.has_input_image },
        "aspectRatio": optional_string_value(&record.aspect_ratio),
        "generatedImages": { "arrayValue": { "values": urls } },
        "count": { "integerValue": record.count.to_string() },
        "status": { "stringValue": record.status },
        "createdAt": timestamp_value(&record.created_at),
    })
}
