//! HTTP handlers and route configuration.

mod health;
mod posts;

#[cfg(test)]
mod tests;

use actix_web::web;

use crate::middleware::error::{json_config, path_config, query_config};

/// Version segment every post route lives under.
pub const API_PREFIX: &str = "/api/v1";

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(path_config())
        .app_data(query_config())
        .route("/health", web::get().to(health::health_check))
        .service(
            web::scope(API_PREFIX).service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list_posts))
                    .route("", web::post().to(posts::create_post))
                    // Must precede "/{id}"
                    .route("/recent", web::get().to(posts::recent_posts))
                    .service(
                        web::resource("/{id}")
                            .name(posts::GET_POST_ROUTE)
                            .route(web::get().to(posts::get_post))
                            .route(web::put().to(posts::update_post))
                            .route(web::delete().to(posts::delete_post)),
                    ),
            ),
        );
}
