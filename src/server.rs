use crate::{
    config::Config, error::GenError, handler::GenerateHandler, models::GenerationRequest,
};
use actix_web::{http::StatusCode, web, App, HttpRequest, HttpResponse, HttpServer};
use serde::Deserialize;
use serde_json::json;
use std::io;
use std::sync::Arc;

/// Header carrying the verified caller uid. Auth verification itself is the
/// platform gateway's job.
const UID_HEADER: &str = "x-authenticated-uid";

/// Callable envelope: the request payload rides under `data`, the response
/// under `result`.
#[derive(Debug, Deserialize)]
struct CallableEnvelope {
    #[serde(default)]
    data: GenerationRequest,
}

async fn generate_image(
    handler: web::Data<Arc<GenerateHandler>>,
    http: HttpRequest,
    body: web::Json<CallableEnvelope>,
) -> HttpResponse {
    let uid = http
        .headers()
        .get(UID_HEADER)
        .and_then(|value| value.to_str().ok());

    match handler.handle(uid, body.into_inner().data).await {
        Ok(response) => HttpResponse::Ok().json(json!({ "result": response })),
        Err(err) => {
            let status = match err {
                GenError::AuthError(_) => StatusCode::UNAUTHORIZED,
                _ => StatusCode::BAD_REQUEST,
            };
            HttpResponse::build(status).json(json!({
                "error": { "code": err.code(), "message": err.to_string() }
            }))
        }
    }
}

pub async fn run(config: Config) -> io::Result<()> {
    let port = config.port.unwrap_or(8080);
    log::info!(
        "Max concurrent instances (platform-enforced): {}",
        config.max_instances.unwrap_or(10)
    );

    let handler = GenerateHandler::new(config)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;
    let handler = Arc::new(handler);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(handler.clone()))
            .route("/generateImage", web::post().to(generate_image))
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
