use crate::{
    config::Config,
    error::{GenError, Result},
    firestore::FirestoreClient,
    gemini::GeminiClient,
    logger,
    models::{GenerationRecord, GenerationRequest, GenerationResponse, InlineImage},
    storage::{AssetStore, GcsAssetStore},
};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

const DEFAULT_SAMPLE_COUNT: u32 = 4;
const MAX_SAMPLE_COUNT: u32 = 4;

/// Orchestrates one generation request end to end: validation, provider
/// calls, per-image uploads, metadata writes, response assembly. Built once
/// at startup and shared across requests; holds no per-request state.
pub struct GenerateHandler {
    gemini: GeminiClient,
    assets: Arc<dyn AssetStore>,
    metadata: FirestoreClient,
}

impl GenerateHandler {
    pub fn new(config: Config) -> Result<Self> {
        Ok(Self {
            gemini: GeminiClient::new(config.gemini),
            assets: Arc::new(GcsAssetStore::new(config.storage)?),
            metadata: FirestoreClient::new(config.firestore)?,
        })
    }

    /// Handle one generateImage call on behalf of `uid`.
    ///
    /// Validation and auth failures return `Err` before any outbound call.
    /// Every later failure is converted into a soft-failure response
    /// (`success=false`); assets uploaded before the failure are not rolled
    /// back.
    pub async fn handle(
        &self,
        uid: Option<&str>,
        request: GenerationRequest,
    ) -> Result<GenerationResponse> {
        let uid = uid
            .filter(|u| !u.is_empty())
            .ok_or_else(|| GenError::AuthError("User must be authenticated".into()))?;

        let prompt = request
            .prompt
            .as_deref()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| GenError::ValidationError("Prompt is required".into()))?
            .to_string();

        let _timer = logger::timer("generateImage");

        match self.run(uid, &prompt, &request).await {
            Ok(response) => Ok(response),
            Err(err) if err.is_caller_fault() => Err(err),
            Err(err) => {
                log::error!("generateImage error: {}", err);
                Ok(GenerationResponse::failure(err.to_string()))
            }
        }
    }

    async fn run(
        &self,
        uid: &str,
        prompt: &str,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse> {
        let sample_count = normalize_sample_count(request.sample_count);
        let generation_id = request
            .generation_id
            .clone()
            .unwrap_or_else(new_generation_id);

        log::info!(
            "Generating {} image(s) for uid={} generation_id={}",
            sample_count,
            uid,
            generation_id
        );

        let input_image = self.resolve_input_image(request).await?;

        let results = self
            .gemini
            .generate_images(
                prompt,
                sample_count,
                input_image.as_ref(),
                request.aspect_ratio,
            )
            .await?;

        // Upload in generation order so the positional index matches.
        let mut images = Vec::with_capacity(results.len());
        let mut image_urls = Vec::with_capacity(results.len());

        for (index, image) in results.iter().enumerate() {
            let url = self
                .assets
                .upload_generated_image(uid, &generation_id, index, &image.base64_data)
                .await?;
            image_urls.push(url);
            images.push(image.base64_data.clone());
        }

        self.metadata.upsert_user(uid).await?;

        let record = GenerationRecord {
            prompt: prompt.to_string(),
            original_url: request.original_url.clone(),
            input_image_url: request.input_image_url.clone(),
            has_input_image: input_image.is_some(),
            aspect_ratio: request.aspect_ratio.map(|ratio| ratio.as_str().to_string()),
            generated_images: image_urls.clone(),
            count: images.len(),
            status: "completed".to_string(),
            created_at: Utc::now(),
        };

        self.metadata
            .create_generation(uid, &generation_id, &record)
            .await?;

        Ok(GenerationResponse {
            success: true,
            images: Some(images),
            image_urls: Some(image_urls),
            generation_id: Some(generation_id),
            error: None,
        })
    }

    /// Reference image for image-to-image editing: a URL wins over inline
    /// bytes; neither means pure text-to-image.
    async fn resolve_input_image(
        &self,
        request: &GenerationRequest,
    ) -> Result<Option<InlineImage>> {
        if let Some(url) = &request.input_image_url {
            let image = self.gemini.download_image_as_base64(url).await?;
            return Ok(Some(image));
        }

        if let Some(base64_data) = &request.input_image_base64 {
            let mime_type = request
                .input_image_mime_type
                .clone()
                .unwrap_or_else(|| "image/jpeg".to_string());
            return Ok(Some(InlineImage::new(base64_data.clone(), mime_type)));
        }

        Ok(None)
    }
}

/// Missing count defaults to 4; present counts are clamped to [1, 4], never
/// rejected.
fn normalize_sample_count(requested: Option<u32>) -> u32 {
    requested
        .unwrap_or(DEFAULT_SAMPLE_COUNT)
        .clamp(1, MAX_SAMPLE_COUNT)
}

/// Millisecond timestamp plus a short random suffix, unique enough to avoid
/// storage path collisions.
fn new_generation_id() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}_{}", Utc::now().timestamp_millis(), &suffix[..9])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_count_normalization() {
        assert_eq!(normalize_sample_count(None), 4);
        assert_eq!(normalize_sample_count(Some(0)), 1);
        assert_eq!(normalize_sample_count(Some(1)), 1);
        assert_eq!(normalize_sample_count(Some(2)), 2);
        assert_eq!(normalize_sample_count(Some(4)), 4);
        assert_eq!(normalize_sample_count(Some(1000)), 4);
    }

    #[test]
    fn test_generation_id_shape() {
        let id = new_generation_id();
        let (millis, suffix) = id.split_once('_').unwrap();

        assert!(millis.parse::<i64>().unwrap() > 0);
        assert_eq!(suffix.len(), 9);

        assert_ne!(new_generation_id(), new_generation_id());
    }
}
