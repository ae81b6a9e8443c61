/// Liveness and readiness probes
use actix_web::{web, HttpResponse};
use sqlx::PgPool;

/// GET /health
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().body("OK")
}

/// GET /ready
///
/// Round-trips to PostgreSQL when a pool is registered.
pub async fn ready(pool: Option<web::Data<PgPool>>) -> HttpResponse {
    if let Some(pool) = pool {
        if let Err(e) = sqlx::query("SELECT 1").execute(pool.get_ref()).await {
            tracing::warn!(error = %e, "Readiness check failed");
            return HttpResponse::ServiceUnavailable().body("NOT READY");
        }
    }

    HttpResponse::Ok().body("READY")
}
