pub mod config;
pub mod error;
pub mod firestore;
pub mod gemini;
pub mod handler;
pub mod logger;
pub mod models;
#[cfg(feature = "server")]
pub mod server;
pub mod storage;

pub use config::{Config, FirestoreConfig, GeminiConfig, StorageConfig};
pub use error::{GenError, Result};
pub use firestore::FirestoreClient;
pub use gemini::GeminiClient;
pub use handler::GenerateHandler;
pub use models::{AspectRatio, GenerationRequest, GenerationResponse, InlineImage};
pub use storage::{AssetStore, GcsAssetStore};
