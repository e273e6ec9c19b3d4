use genimage::logger::{self, LoggerConfig};
use genimage::Config;

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logger::init_with_config(LoggerConfig::development())?;

    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded successfully"),
        Err(_) => log::warn!("⚠️  No .env file found, using system environment variables"),
    }

    let config = Config::from_env();
    logger::log_config_info(&config);

    if config.gemini.api_key.is_none() {
        log::warn!("⚠️  GEMINI_API_KEY is not set, generation requests will fail");
    }

    let port = config.port.unwrap_or(8080);
    logger::log_startup_info("genimage", env!("CARGO_PKG_VERSION"), port);

    genimage::server::run(config).await?;
    Ok(())
}
