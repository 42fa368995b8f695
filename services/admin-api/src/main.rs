//! Orderdesk Admin API
//!
//! Back-office HTTP service for orders, users, statistics and invoices.
//!
//! ## REST Endpoints
//!
//! - `GET /api/orders` - Page of orders, newest first
//! - `GET /api/orders/search` - Search orders
//! - `PATCH /api/orders/{id}/payment-status` - Set payment status
//! - `POST /api/orders/{id}/full-analysis` - Start the full analysis
//! - `GET /api/users` - Page of users
//! - `GET /api/users/search` - Search users
//! - `PATCH /api/users/{id}/change-password` - Set a new password
//! - `POST /api/users/{id}/generate-magic-link` - Issue a sign-in link
//! - `GET /api/statistics` - Dashboard counts
//! - `POST /api/create-invoice` - Fetch or create an order's invoice
//! - `POST /api/generate-invoice-pdf` - Render an invoice as PDF
//!
//! ## Health Endpoints
//!
//! - `GET /health` - Liveness check
//! - `GET /ready` - Readiness check
//! - `GET /metrics` - Prometheus metrics

mod config;
mod error;
mod extractors;
mod handlers;
mod state;

use std::net::SocketAddr;

use axum::routing::{get, patch, post};
use axum::{middleware, Router};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::extractors::require_admin_token;
use crate::handlers::{health, ready};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive("admin_api=debug".parse()?))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Orderdesk Admin API");

    let config = Config::from_env()?;
    tracing::info!(
        http_port = config.http_port,
        token_required = config.admin_token.is_some(),
        "Configuration loaded"
    );

    let metrics_handle = if config.metrics_enabled {
        Some(setup_metrics()?)
    } else {
        None
    };

    let pool = orderdesk_db::create_pool(&config.database_url).await?;
    tracing::info!("Database pool created");

    if config.run_migrations {
        orderdesk_db::run_migrations(&pool).await?;
        tracing::info!("Migrations applied");
    }

    let http_addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let state = AppState::new(pool, config);
    let app = build_router(state, metrics_handle);

    tracing::info!("HTTP server listening on {}", http_addr);
    let listener = tokio::net::TcpListener::bind(http_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

fn build_router(state: AppState, metrics_handle: Option<PrometheusHandle>) -> Router {
    let request_timeout = state.request_timeout();

    let api = Router::new()
        // Orders
        .route("/orders", get(handlers::list_orders))
        .route("/orders/search", get(handlers::search_orders))
        .route(
            "/orders/{id}/payment-status",
            patch(handlers::update_payment_status),
        )
        .route(
            "/orders/{id}/full-analysis",
            post(handlers::start_full_analysis),
        )
        // Users
        .route("/users", get(handlers::list_users))
        .route("/users/search", get(handlers::search_users))
        .route(
            "/users/{id}/change-password",
            patch(handlers::change_password),
        )
        .route(
            "/users/{id}/generate-magic-link",
            post(handlers::generate_magic_link),
        )
        // Dashboard and invoices
        .route("/statistics", get(handlers::get_statistics))
        .route("/create-invoice", post(handlers::create_invoice))
        .route("/generate-invoice-pdf", post(handlers::generate_invoice_pdf))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_admin_token,
        ));

    // Health routes (no timeout - must always respond quickly)
    let health_routes = Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready));

    let metrics_route = if let Some(handle) = metrics_handle {
        Router::new().route("/metrics", get(move || async move { handle.render() }))
    } else {
        Router::new()
    };

    // Outermost first
    let middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TimeoutLayer::new(request_timeout));

    Router::new()
        .nest("/api", api)
        .layer(middleware)
        .merge(health_routes)
        .merge(metrics_route)
        .with_state(state)
}

fn setup_metrics() -> anyhow::Result<PrometheusHandle> {
    // Most calls are one or two queries; directory drains and PDF rendering are the slow tail
    let latency_buckets = &[0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0];

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("orderdesk_operation_duration_seconds".to_string()),
            latency_buckets,
        )?
        .install_recorder()?;

    metrics::describe_histogram!(
        "orderdesk_operation_duration_seconds",
        "Admin API operation latency in seconds by operation and result"
    );
    metrics::describe_counter!(
        "orderdesk_payment_status_updates_total",
        "Payment status updates by new status"
    );
    metrics::describe_counter!(
        "orderdesk_invoices_created_total",
        "Invoices created on first request"
    );

    Ok(handle)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
