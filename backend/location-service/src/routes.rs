/// Route table
///
/// Protected resources wrap a `JwtAuthMiddleware` bound to the auth service,
/// which checks the bearer token and the revocation ledger before the handler
/// runs.
use crate::error::AppError;
use crate::handlers::{auth, health, locations};
use actix_middleware::{metrics_handler, JwtAuthMiddleware, TokenVerifier};
use actix_web::{error::JsonPayloadError, web, HttpRequest};
use std::sync::Arc;

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::Validation(format!("Invalid request body: {}", err)).into()
}

pub fn configure(cfg: &mut web::ServiceConfig, verifier: Arc<dyn TokenVerifier>) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .route("/health", web::get().to(health::health))
        .route("/ready", web::get().to(health::ready))
        .route("/metrics", web::get().to(metrics_handler))
        .route("/signup", web::post().to(auth::signup))
        .route("/login", web::post().to(auth::login))
        .service(
            web::resource("/logout/access")
                .wrap(JwtAuthMiddleware::access(verifier.clone()))
                .route(web::post().to(auth::logout_access)),
        )
        .service(
            web::resource("/logout/refresh")
                .wrap(JwtAuthMiddleware::refresh(verifier.clone()))
                .route(web::post().to(auth::logout_refresh)),
        )
        .service(
            web::resource("/token/refresh")
                .wrap(JwtAuthMiddleware::refresh(verifier.clone()))
                .route(web::post().to(auth::refresh_token)),
        )
        .service(
            web::resource("/location")
                .wrap(JwtAuthMiddleware::access(verifier.clone()))
                .route(web::post().to(locations::create_location))
                .route(web::get().to(locations::list_locations))
                .route(web::put().to(locations::update_location))
                .route(web::delete().to(locations::delete_location)),
        )
        .service(
            web::resource("/secret")
                .wrap(JwtAuthMiddleware::access(verifier))
                .route(web::get().to(auth::secret)),
        );
}
