mod core;
mod features;
mod shared;

use crate::core::config::{AppConfig, Config, DatabaseConfig};
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::core::{database, middleware};
use crate::features::registrations::{
    routes as registrations_routes, PgRegistrationRepository, RegistrationRepository,
    RegistrationService,
};
use axum::{extract::DefaultBodyLimit, Router};
use sqlx::PgPool;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    tracing::info!(
        "Configuration loaded: tokio_worker_threads={}, pid={}",
        worker_threads,
        std::process::id()
    );

    let (pool, reachable) = connect_database(&config.database).await?;

    let pg_repository = Arc::new(PgRegistrationRepository::new(pool));
    if reachable {
        pg_repository
            .ensure_schema()
            .await
            .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
    }
    let repository: Arc<dyn RegistrationRepository> = pg_repository;
    let registration_service = Arc::new(RegistrationService::new(repository));
    tracing::info!("Registration service initialized");

    let mut openapi = ApiDoc::openapi();
    SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    }
    .modify(&mut openapi);

    let swagger =
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi));

    let app = build_app(
        registrations_routes::routes(registration_service).merge(swagger),
        &config.app,
    );

    serve(app, &config.app).await
}

/// Connect to the database. An unreachable database is logged and replaced by
/// a lazy pool so the server still starts; the repository migrates on first
/// use once it is back. The flag reports whether the startup connect worked.
async fn connect_database(config: &DatabaseConfig) -> anyhow::Result<(PgPool, bool)> {
    match database::create_pool(config).await {
        Ok(pool) => {
            tracing::info!("Database connected: {}", config.redacted_url());
            Ok((pool, true))
        }
        Err(e) => {
            tracing::error!(
                "Database connection error ({}): {}. Requests will fail until it is reachable",
                config.redacted_url(),
                e
            );
            Ok((database::create_lazy_pool(config)?, false))
        }
    }
}

/// Feature routes plus the shared HTTP layers.
fn build_app(routes: Router, config: &AppConfig) -> Router {
    // Simple health check endpoint
    async fn health_check() -> axum::http::StatusCode {
        axum::http::StatusCode::OK
    }
    let health_route = Router::new().route("/health", axum::routing::get(health_check));

    Router::new()
        .merge(routes)
        .merge(health_route)
        .layer(DefaultBodyLimit::max(config.max_request_body_size))
        .layer(
            ServiceBuilder::new()
                // Client-supplied ids are kept; others get a UUID v7
                .layer(SetRequestIdLayer::new(
                    middleware::request_id_header(),
                    middleware::MakeRequestUuid,
                ))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(middleware::RequestSpan)
                        .on_request(DefaultOnRequest::new().level(Level::INFO))
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                .layer(PropagateRequestIdLayer::new(middleware::request_id_header()))
                .layer(middleware::cors_layer(&config.cors_allowed_origins)),
        )
}

async fn serve(app: Router, config: &AppConfig) -> anyhow::Result<()> {
    let addr = config.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    // Use socket2 for TCP listener configuration
    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    socket.set_nodelay(true)?;

    let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
    socket.set_tcp_keepalive(&keepalive)?;

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server running on {}", format!("http://{}", addr));
    tracing::info!(
        "Swagger UI available at {}",
        format!("http://{}/swagger-ui/", addr)
    );

    axum::serve(listener, app).await?;

    Ok(())
}
