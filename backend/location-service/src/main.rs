/// Location Service Main Entry Point
///
/// Starts the HTTP server with:
/// - PostgreSQL connection pool and migrations
/// - JWT codec (HS256 secret or RS256 key pair)
/// - Auth and location services wired over the PostgreSQL repositories
use actix_middleware::{Logging, MetricsMiddleware, TokenVerifier};
use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use location_service::{
    config::{LogFormat, LogSettings, Settings},
    db::{PgLocationRepository, PgRevocationLedger, PgUserRepository},
    routes,
    security::PasswordHasher,
    services::{AuthService, LocationService},
    AppState,
};
use std::sync::Arc;
use tracing::info;

fn init_tracing(log: &LogSettings) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&log.filter))
        .with_target(false);

    match log.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.pretty().init(),
    }
}

#[actix_web::main]
async fn main() -> Result<()> {
    let settings = Settings::load().context("Failed to load configuration")?;
    init_tracing(&settings.log);

    info!("Starting Location Service");
    settings.database.log_config();

    let db_pool = db_pool::create_pool(settings.database.clone())
        .await
        .context("Failed to connect to PostgreSQL")?;

    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .context("Failed to run database migrations")?;
    info!("Database migrations completed");

    let codec = settings
        .jwt
        .build_codec()
        .context("Failed to initialize JWT codec")?;
    info!(algorithm = ?codec.algorithm(), "JWT codec initialized");

    let hasher = PasswordHasher::new(settings.password)
        .context("Failed to initialize password hasher")?;

    let auth = AuthService::new(
        Arc::new(PgUserRepository::new(db_pool.clone())),
        Arc::new(PgRevocationLedger::new(db_pool.clone())),
        hasher,
        codec,
    );
    let locations = LocationService::new(
        Arc::new(PgLocationRepository::new(db_pool.clone())),
        settings.locations.enforce_ownership,
    );
    info!(
        enforce_ownership = settings.locations.enforce_ownership,
        "Services initialized"
    );

    let verifier: Arc<dyn TokenVerifier> = Arc::new(auth.clone());
    let state = web::Data::new(AppState::new(auth, locations));
    let pool_data = web::Data::new(db_pool);

    let bind_address = settings.server.bind_address();
    info!("HTTP server listening on {}", bind_address);

    HttpServer::new(move || {
        let verifier = verifier.clone();
        App::new()
            .app_data(state.clone())
            .app_data(pool_data.clone())
            .wrap(MetricsMiddleware)
            .wrap(Logging)
            .configure(|cfg| routes::configure(cfg, verifier))
    })
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run()
    .await
    .context("HTTP server error")?;

    info!("Location Service stopped");
    Ok(())
}
