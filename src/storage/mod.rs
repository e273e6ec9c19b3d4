pub mod gcs;

use crate::error::Result;
use async_trait::async_trait;

pub use gcs::GcsAssetStore;

/// Object storage seam for generated images. Uploads are keyed by
/// (uid, generation id, index) and return a publicly resolvable URL.
#[async_trait]
pub trait AssetStore: Send + Sync {
    async fn upload_generated_image(
        &self,
        uid: &str,
        generation_id: &str,
        index: usize,
        base64_data: &str,
    ) -> Result<String>;
}
