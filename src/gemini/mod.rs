pub mod types;

use crate::{
    config::GeminiConfig,
    error::{GenError, Result},
    models::{AspectRatio, InlineImage},
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use std::time::Duration;
use types::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, ImageConfig,
    InlineData, Part,
};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the Gemini generateContent API, used for both text-to-image
/// and image-to-image generation.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: config.api_key,
            model: config.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: config
                .base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }

    // Checked per call, not at construction, so a missing credential surfaces
    // as a request-time error rather than a startup failure.
    fn api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| GenError::ConfigError("Gemini API key not configured".into()))
    }

    /// Generate up to `sample_count` images, one generateContent call per
    /// sample. A call may yield no image (provider-side policy can reject a
    /// prompt); only the successful results are returned. Zero results across
    /// all calls is a provider rejection, distinct from a transport failure.
    pub async fn generate_images(
        &self,
        prompt: &str,
        sample_count: u32,
        input_image: Option<&InlineImage>,
        aspect_ratio: Option<AspectRatio>,
    ) -> Result<Vec<InlineImage>> {
        self.api_key()?;

        let mut results = Vec::new();

        for i in 0..sample_count {
            log::debug!(
                "Generating image {}/{} with model {}",
                i + 1,
                sample_count,
                self.model
            );

            if let Some(image) = self
                .generate_single(prompt, input_image, aspect_ratio)
                .await?
            {
                results.push(image);
            }
        }

        if results.is_empty() {
            return Err(GenError::ProviderRejection(
                "No images generated. Model may have rejected the prompt.".into(),
            ));
        }

        log::info!("Generated {} image(s)", results.len());
        Ok(results)
    }

    async fn generate_single(
        &self,
        prompt: &str,
        input_image: Option<&InlineImage>,
        aspect_ratio: Option<AspectRatio>,
    ) -> Result<Option<InlineImage>> {
        // Part order matters: input image first, then the prompt.
        let mut parts = Vec::new();

        if let Some(image) = input_image {
            parts.push(Part::InlineData {
                inline_data: InlineData {
                    mime_type: image.mime_type.clone(),
                    data: image.base64_data.clone(),
                },
            });
        }

        parts.push(Part::Text {
            text: prompt.to_string(),
        });

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts,
            }],
            generation_config: Some(GenerationConfig {
                response_modalities: vec!["TEXT".to_string(), "IMAGE".to_string()],
                image_config: aspect_ratio.map(|ratio| ImageConfig {
                    aspect_ratio: ratio.as_str().to_string(),
                }),
            }),
        };

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key()?)])
            .json(&request)
            .send()
            .await
            .map_err(|e| GenError::TransportError(format!("Gemini request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GenError::TransportError(format!(
                "Gemini API error ({}): {}",
                status, body
            )));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GenError::TransportError(format!("Invalid Gemini response: {}", e)))?;

        Ok(extract_inline_image(&body))
    }

    /// Download an image from a URL and re-encode it as inline base64 data,
    /// taking the mime type from the response's Content-Type header.
    pub async fn download_image_as_base64(&self, image_url: &str) -> Result<InlineImage> {
        let response = self
            .client
            .get(image_url)
            .timeout(DOWNLOAD_TIMEOUT)
            .send()
            .await
            .map_err(|e| GenError::TransportError(format!("Failed to download image: {}", e)))?;

        if !response.status().is_success() {
            return Err(GenError::TransportError(format!(
                "Failed to download image: HTTP {}",
                response.status()
            )));
        }

        let mime_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("image/jpeg")
            .to_string();

        let bytes = response
            .bytes()
            .await
            .map_err(|e| GenError::TransportError(format!("Failed to download image: {}", e)))?;

        Ok(InlineImage::new(STANDARD.encode(&bytes), mime_type))
    }
}

/// First inline image part of the first candidate, if any. Accompanying text
/// parts are ignored.
fn extract_inline_image(response: &GenerateContentResponse) -> Option<InlineImage> {
    let content = response.candidates.first()?.content.as_ref()?;

    for part in &content.parts {
        if let Part::InlineData { inline_data } = part {
            let mime_type = if inline_data.mime_type.is_empty() {
                "image/png"
            } else {
                inline_data.mime_type.as_str()
            };
            return Some(InlineImage::new(inline_data.data.clone(), mime_type));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_api_key_is_config_error() {
        let client = GeminiClient::new(GeminiConfig::new());
        assert!(matches!(client.api_key(), Err(GenError::ConfigError(_))));

        let client = GeminiClient::new(GeminiConfig::new().with_api_key(""));
        assert!(matches!(client.api_key(), Err(GenError::ConfigError(_))));

        let client = GeminiClient::new(GeminiConfig::new().with_api_key("k"));
        assert_eq!(client.api_key().unwrap(), "k");
    }

    #[test]
    fn test_extract_first_inline_part() {
        let body = r#"{
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [
                        {"text": "sure"},
                        {"inlineData": {"mimeType": "image/png", "data": "Zmlyc3Q="}},
                        {"inlineData": {"mimeType": "image/png", "data": "c2Vjb25k"}}
                    ]
                }
            }]
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(body).unwrap();

        let image = extract_inline_image(&response).unwrap();
        assert_eq!(image.base64_data, "Zmlyc3Q=");
        assert_eq!(image.mime_type, "image/png");
    }

    #[test]
    fn test_extract_falls_back_to_png_mime() {
        let body = r#"{
            "candidates": [{
                "content": {"parts": [{"inlineData": {"data": "aW1n"}}]}
            }]
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(body).unwrap();

        let image = extract_inline_image(&response).unwrap();
        assert_eq!(image.mime_type, "image/png");
    }

    #[test]
    fn test_extract_none_when_text_only() {
        let body = r#"{
            "candidates": [{
                "content": {"parts": [{"text": "cannot help with that"}]}
            }]
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(body).unwrap();
        assert!(extract_inline_image(&response).is_none());

        let empty: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(extract_inline_image(&empty).is_none());
    }
}
