use std::env;

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub bucket: Option<String>,
    pub base_url: Option<String>,
    pub public_base_url: Option<String>,
    pub access_token: Option<String>,
}

#[derive(Debug, Clone)]
pub struct FirestoreConfig {
    pub project_id: Option<String>,
    pub database: Option<String>,
    pub base_url: Option<String>,
    pub access_token: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: Option<u16>,
    pub max_instances: Option<u32>,
    pub gemini: GeminiConfig,
    pub storage: StorageConfig,
    pub firestore: FirestoreConfig,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        GeminiConfig {
            api_key: None,
            model: None,
            base_url: None,
        }
    }
}

impl GeminiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let api_key = env::var("GEMINI_API_KEY").ok();
        let model = env::var("GEMINI_MODEL").ok();
        let base_url = env::var("GEMINI_BASE_URL").ok();

        GeminiConfig {
            api_key,
            model,
            base_url,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            bucket: None,
            base_url: None,
            public_base_url: None,
            access_token: None,
        }
    }
}

impl StorageConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let bucket = env::var("STORAGE_BUCKET").ok();
        let base_url = env::var("STORAGE_BASE_URL").ok();
        let public_base_url = env::var("STORAGE_PUBLIC_BASE_URL").ok();
        let access_token = env::var("GOOGLE_ACCESS_TOKEN").ok();

        StorageConfig {
            bucket,
            base_url,
            public_base_url,
            access_token,
        }
    }

    pub fn with_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = Some(bucket.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_public_base_url(mut self, public_base_url: impl Into<String>) -> Self {
        self.public_base_url = Some(public_base_url.into());
        self
    }

    pub fn with_access_token(mut self, access_token: impl Into<String>) -> Self {
        self.access_token = Some(access_token.into());
        self
    }
}

impl Default for FirestoreConfig {
    fn default() -> Self {
        FirestoreConfig {
            project_id: None,
            database: None,
            base_url: None,
            access_token: None,
        }
    }
}

impl FirestoreConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let project_id = env::var("GOOGLE_PROJECT_ID").ok();
        let database = env::var("FIRESTORE_DATABASE").ok();
        let base_url = env::var("FIRESTORE_BASE_URL").ok();
        let access_token = env::var("GOOGLE_ACCESS_TOKEN").ok();

        FirestoreConfig {
            project_id,
            database,
            base_url,
            access_token,
        }
    }

    pub fn with_project(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_access_token(mut self, access_token: impl Into<String>) -> Self {
        self.access_token = Some(access_token.into());
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: None,
            max_instances: None,
            gemini: GeminiConfig::default(),
            storage: StorageConfig::default(),
            firestore: FirestoreConfig::default(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let port = env::var("PORT").ok().and_then(|port| port.parse().ok());
        let max_instances = env::var("MAX_INSTANCES")
            .ok()
            .and_then(|val| val.parse().ok());

        Config {
            port,
            max_instances,
            gemini: GeminiConfig::from_env(),
            storage: StorageConfig::from_env(),
            firestore: FirestoreConfig::from_env(),
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Fleet-wide instance cap. Enforcement belongs to the hosting platform;
    /// the value is carried here for startup logging and deploy tooling.
    pub fn with_max_instances(mut self, max_instances: u32) -> Self {
        self.max_instances = Some(max_instances);
        self
    }

    pub fn with_gemini(mut self, config: GeminiConfig) -> Self {
        self.gemini = config;
        self
    }

    pub fn with_storage(mut self, config: StorageConfig) -> Self {
        self.storage = config;
        self
    }

    pub fn with_firestore(mut self, config: FirestoreConfig) -> Self {
        self.firestore = config;
        self
    }
}
