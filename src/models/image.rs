use serde::{Deserialize, Serialize};

/// Image bytes carried inline as a base64 string. Used both for the optional
/// reference image sent to the provider and for each generated result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InlineImage {
    pub base64_data: String,
    pub mime_type: String,
}

impl InlineImage {
    pub fn new(base64_data: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            base64_data: base64_data.into(),
            mime_type: mime_type.into(),
        }
    }
}
