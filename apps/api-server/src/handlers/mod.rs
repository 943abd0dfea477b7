//! HTTP handlers and route configuration.

mod health;
mod posts;

use actix_web::web;

use crate::middleware::error::json_config;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config()).service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Post routes; mutations require a Bearer token
            .service(
                web::scope("/posts")
                    .route("", web::post().to(posts::create_post))
                    .route("", web::get().to(posts::list_posts))
                    .route("/{post_id}", web::get().to(posts::get_post))
                    .route("/{post_id}", web::patch().to(posts::update_post))
                    .route("/{post_id}", web::put().to(posts::update_post))
                    .route("/{post_id}", web::delete().to(posts::delete_post)),
            ),
    );
}
