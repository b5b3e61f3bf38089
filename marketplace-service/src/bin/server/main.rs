use std::sync::Arc;

use auth::Authenticator;
use auth::PasswordHasher;
use marketplace_service::config::Config;
use marketplace_service::domain::identity::service::SessionService;
use marketplace_service::domain::product::service::ProductService;
use marketplace_service::domain::vendor::service::VendorService;
use marketplace_service::inbound::http::router::create_router;
use marketplace_service::inbound::http::router::AppState;
use marketplace_service::outbound::health::PostgresHealthProbe;
use marketplace_service::outbound::repositories::PostgresIdentityRepository;
use marketplace_service::outbound::repositories::PostgresProductRepository;
use marketplace_service::outbound::repositories::PostgresVendorRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "marketplace_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "marketplace-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        app = %config.app.name,
        http_port = config.server.http_port,
        access_token_minutes = config.jwt.access_token_minutes,
        refresh_token_days = config.jwt.refresh_token_days,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let authenticator = Arc::new(Authenticator::new(
        &config.jwt.secret,
        PasswordHasher::with_cost(config.password.hash_cost),
        config.jwt.lifetimes(),
    ));

    let identity_repository = Arc::new(PostgresIdentityRepository::new(pg_pool.clone()));
    let vendor_repository = Arc::new(PostgresVendorRepository::new(pg_pool.clone()));
    let product_repository = Arc::new(PostgresProductRepository::new(pg_pool.clone()));

    let state = AppState {
        app_name: config.app.name.as_str().into(),
        session_service: Arc::new(SessionService::new(identity_repository, authenticator)),
        vendor_service: Arc::new(VendorService::new(Arc::clone(&vendor_repository))),
        product_service: Arc::new(ProductService::new(product_repository, vendor_repository)),
        health_probe: Arc::new(PostgresHealthProbe::new(pg_pool)),
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(state, &config.server.allowed_origins);

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");
    Ok(())
}
