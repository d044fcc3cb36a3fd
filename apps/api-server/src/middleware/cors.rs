//! Cross-origin policy for browser clients.

use actix_cors::Cors;
use actix_web::http::{Uri, header};

const PREFLIGHT_MAX_AGE_SECS: usize = 3600;

/// Build the CORS middleware for the configured origins.
///
/// Any method and request header is allowed. A `*` entry allows every origin;
/// entries that are not absolute origins are skipped with a warning, since
/// actix-cors would otherwise refuse to build the service.
pub fn cors(allowed_origins: &[String]) -> Cors {
    let base = Cors::default()
        .allow_any_method()
        .allow_any_header()
        .expose_headers([header::LOCATION])
        .max_age(PREFLIGHT_MAX_AGE_SECS);

    if allowed_origins.iter().any(|origin| origin == "*") {
        return base.allow_any_origin();
    }

    allowed_origins
        .iter()
        .fold(base, |cors, origin| match origin.parse::<Uri>() {
            Ok(uri) if uri.scheme().is_some() && uri.host().is_some() => {
                cors.allowed_origin(origin)
            }
            _ => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                cors
            }
        })
}
