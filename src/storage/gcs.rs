use crate::{
    config::StorageConfig,
    error::{GenError, Result},
    storage::AssetStore,
};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;

const DEFAULT_BASE_URL: &str = "https://storage.googleapis.com";
const ASSET_CONTENT_TYPE: &str = "image/jpeg";

/// Cloud Storage backend. Objects land at
/// `users/{uid}/generated/{generation_id}/{index}.jpg`, publicly readable;
/// writing the same triple twice silently replaces the prior asset.
#[derive(Debug)]
pub struct GcsAssetStore {
    client: Client,
    bucket: String,
    base_url: String,
    public_base_url: String,
    access_token: Option<String>,
}

impl GcsAssetStore {
    pub fn new(config: StorageConfig) -> Result<Self> {
        let bucket = config
            .bucket
            .ok_or_else(|| GenError::ConfigError("Storage bucket is required".into()))?;

        let base_url = config
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let public_base_url = config.public_base_url.unwrap_or_else(|| base_url.clone());

        Ok(Self {
            client: Client::new(),
            bucket,
            base_url,
            public_base_url,
            access_token: config.access_token,
        })
    }

    fn object_path(uid: &str, generation_id: &str, index: usize) -> String {
        format!("users/{}/generated/{}/{}.jpg", uid, generation_id, index)
    }

    /// Deterministic: the same (uid, generation id, index) always resolves to
    /// the same URL.
    fn public_url(&self, path: &str) -> String {
        format!("{}/{}/{}", self.public_base_url, self.bucket, path)
    }
}

#[async_trait]
impl AssetStore for GcsAssetStore {
    async fn upload_generated_image(
        &self,
        uid: &str,
        generation_id: &str,
        index: usize,
        base64_data: &str,
    ) -> Result<String> {
        let path = Self::object_path(uid, generation_id, index);

        let bytes = STANDARD
            .decode(base64_data)
            .map_err(|e| GenError::StorageError(format!("Invalid image data: {}", e)))?;

        log::debug!("Uploading {} bytes to {}", bytes.len(), path);

        let url = format!("{}/upload/storage/v1/b/{}/o", self.base_url, self.bucket);
        let mut request = self
            .client
            .post(&url)
            .query(&[
                ("uploadType", "media"),
                ("name", path.as_str()),
                ("predefinedAcl", "publicRead"),
            ])
            .header(reqwest::header::CONTENT_TYPE, ASSET_CONTENT_TYPE)
            .body(bytes);

        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| GenError::StorageError(format!("Storage upload failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GenError::StorageError(format!(
                "Storage upload failed ({}): {}",
                status, body
            )));
        }

        Ok(self.public_url(&path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_path_layout() {
        assert_eq!(
            GcsAssetStore::object_path("u1", "123_abc", 0),
            "users/u1/generated/123_abc/0.jpg"
        );
        assert_eq!(
            GcsAssetStore::object_path("u1", "123_abc", 3),
            "users/u1/generated/123_abc/3.jpg"
        );
    }

    #[test]
    fn test_public_url_is_deterministic() {
        let store = GcsAssetStore::new(StorageConfig::new().with_bucket("photos.appspot.com"))
            .unwrap();

        let path = GcsAssetStore::object_path("u1", "gen1", 0);
        let first = store.public_url(&path);
        let second = store.public_url(&path);

        assert_eq!(first, second);
        assert_eq!(
            first,
            "https://storage.googleapis.com/photos.appspot.com/users/u1/generated/gen1/0.jpg"
        );
    }

    #[test]
    fn test_missing_bucket_is_config_error() {
        let err = GcsAssetStore::new(StorageConfig::new()).unwrap_err();
        assert!(matches!(err, GenError::ConfigError(_)));
    }
}
