pub mod domain;
pub mod handlers;
pub mod shared;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use axum::body::Body;
    use axum::http::{header, Method, Request};
    use axum::middleware::{self, Next};
    use axum::response::Response;
    use axum::{
        routing::{get, post},
        Router,
    };
    use std::net::SocketAddr;
    use tokio::net::TcpListener;
    use tower_http::cors::{Any, CorsLayer};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    // Директория для файловых логов
    let log_dir = std::path::Path::new("target").join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("backend.log"))?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| {
                // Отключаем логи SQL запросов, но оставляем логи приложения
                "info,sqlx=warn,sea_orm=warn".into()
            }),
        ))
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::sync::Arc::new(log_file))
                .with_ansi(false),
        )
        .init();

    // Простой middleware для логирования запросов
    async fn request_logger(req: Request<Body>, next: Next) -> Response {
        let start = std::time::Instant::now();
        let method = req.method().clone();
        let path = req.uri().path().to_string();

        let response = next.run(req).await;

        tracing::info!(
            "{:>5}ms | {} {:>6} {}",
            start.elapsed().as_millis(),
            response.status().as_u16(),
            method,
            path
        );
        response
    }

    let config = shared::config::load_config()?;

    // Initialize database (loads config from config.toml)
    shared::data::db::initialize_database()
        .await
        .map_err(|e| anyhow::anyhow!("db init failed: {e}"))?;

    // Системный клиент (код "SYS") должен существовать всегда
    domain::a001_customer::service::ensure_sys_customer_exists().await?;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION]);

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        // Customer handlers
        .route(
            "/api/customer",
            get(handlers::a001_customer::list_all).post(handlers::a001_customer::upsert),
        )
        .route(
            "/api/customer/:id",
            get(handlers::a001_customer::get_by_id).delete(handlers::a001_customer::delete),
        )
        .route(
            "/api/customer/testdata",
            post(handlers::a001_customer::insert_test_data),
        )
        // Role handlers
        .route(
            "/api/role",
            get(handlers::a002_role::list_all).post(handlers::a002_role::upsert),
        )
        .route(
            "/api/role/assignable",
            get(handlers::a002_role::list_assignable),
        )
        .route(
            "/api/role/:id",
            get(handlers::a002_role::get_by_id).delete(handlers::a002_role::delete),
        )
        .route(
            "/api/role/testdata",
            post(handlers::a002_role::insert_test_data),
        )
        // Navigation config handlers
        .route(
            "/api/navigation-config",
            get(handlers::a003_navigation_config::list_all)
                .post(handlers::a003_navigation_config::upsert),
        )
        .route(
            "/api/navigation-config/list",
            get(handlers::a003_navigation_config::list_paginated),
        )
        .route(
            "/api/navigation-config/catalog",
            get(handlers::a003_navigation_config::resolve_scope_catalog),
        )
        .route(
            "/api/navigation-config/effective",
            get(handlers::a003_navigation_config::get_effective),
        )
        .route(
            "/api/navigation-config/:id",
            get(handlers::a003_navigation_config::get_by_id)
                .delete(handlers::a003_navigation_config::delete),
        )
        .route(
            "/api/navigation-config/testdata",
            post(handlers::a003_navigation_config::insert_test_data),
        )
        .layer(middleware::from_fn(request_logger))
        .layer(cors);

    let addr: SocketAddr = ([0, 0, 0, 0], config.server.port).into();

    tracing::info!("Attempting to bind server to http://{}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => {
            tracing::info!("Server successfully bound to {}", addr);
            listener
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Error: Port {} is already in use. Please ensure no other process is using this port.",
                    config.server.port
                );
            } else {
                tracing::error!("Failed to bind to port {}. Error: {}", config.server.port, e);
            }
            return Err(e.into());
        }
    };

    axum::serve(listener, app).await?;

    Ok(())
}
