use serde::{Deserialize, Serialize};

/// Aspect ratios accepted by the image model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AspectRatio {
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "2:3")]
    TwoThree,
    #[serde(rename = "3:2")]
    ThreeTwo,
    #[serde(rename = "3:4")]
    ThreeFour,
    #[serde(rename = "4:3")]
    FourThree,
    #[serde(rename = "4:5")]
    FourFive,
    #[serde(rename = "5:4")]
    FiveFour,
    #[serde(rename = "9:16")]
    NineSixteen,
    #[serde(rename = "16:9")]
    SixteenNine,
    #[serde(rename = "21:9")]
    TwentyOneNine,
}

impl AspectRatio {
    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::TwoThree => "2:3",
            AspectRatio::ThreeTwo => "3:2",
            AspectRatio::ThreeFour => "3:4",
            AspectRatio::FourThree => "4:3",
            AspectRatio::FourFive => "4:5",
            AspectRatio::FiveFour => "5:4",
            AspectRatio::NineSixteen => "9:16",
            AspectRatio::SixteenNine => "16:9",
            AspectRatio::TwentyOneNine => "21:9",
        }
    }
}

/// Request body of the generateImage callable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationRequest {
    pub prompt: Option<String>,
    pub original_url: Option<String>,
    pub input_image_url: Option<String>,
    pub input_image_base64: Option<String>,
    pub input_image_mime_type: Option<String>,
    pub sample_count: Option<u32>,
    pub aspect_ratio: Option<AspectRatio>,
    pub generation_id: Option<String>,
}

/// Response body of the generateImage callable.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_urls: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GenerationResponse {
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            images: None,
            image_urls: None,
            generation_id: None,
            error: Some(error.into()),
        }
    }
}
