//! Health check endpoint.

use actix_web::HttpResponse;
use blog_shared::HealthResponse;

/// Process liveness - does not touch storage.
///
/// GET /health
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse::healthy())
}
