//! Inventory Server - software-asset inventory tracker
//!
//! Architecture:
//! - SeaORM for database access (SQLite)
//! - Axum for the HTTP API
//! - Spreadsheet import/export for bulk reconciliation
//! - Tokio for async runtime

mod entities;
mod error;
mod handlers;
mod reconcile;
mod services;
mod state;

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::{Method, header};
use axum::routing::{delete, get, post};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::handlers::{customer, ithc, project, software, templates};
use crate::state::AppState;

#[tokio::main]
async fn main() {
  dotenvy::dotenv().ok();

  // Initialize tracing
  tracing_subscriber::registry()
    .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
      "inventory=debug,tower_http=debug,sea_orm=warn".into()
    }))
    .with(tracing_subscriber::fmt::layer())
    .init();

  let db_url = env::var("DATABASE_URL")
    .unwrap_or_else(|_| "sqlite:inventory.db?mode=rwc".into());

  info!("Starting Inventory Server v{}", env!("CARGO_PKG_VERSION"));

  let app_state = Arc::new(AppState::new(&db_url).await);

  let app = Router::new()
    .route("/health", get(handlers::health))
    // Software
    .route("/api/software", get(software::list).post(software::create))
    .route("/api/software/search", get(software::search))
    .route("/api/software/import", post(software::import))
    .route(
      "/api/software/{id}",
      get(software::get).put(software::update).delete(software::delete),
    )
    // Projects
    .route("/api/projects", get(project::list).post(project::create))
    .route("/api/projects/search", get(project::search))
    .route("/api/projects/import", post(project::import))
    .route(
      "/api/projects/{id}",
      get(project::get).put(project::update).delete(project::delete),
    )
    .route(
      "/api/projects/{id}/customers/{customer_id}",
      post(project::add_customer).delete(project::remove_customer),
    )
    .route("/api/projects/{id}/releases", post(project::create_release))
    .route("/api/releases/{id}", delete(project::delete_release))
    // Customers
    .route("/api/customers", get(customer::list).post(customer::create))
    .route("/api/customers/search", get(customer::search))
    .route("/api/customers/import", post(customer::import))
    .route(
      "/api/customers/{id}",
      get(customer::get).put(customer::update).delete(customer::delete),
    )
    // ITHC
    .route("/api/ithc/software", get(ithc::list).post(ithc::create))
    .route("/api/ithc/software/search", get(ithc::search))
    .route("/api/ithc/software/import", post(ithc::import))
    .route(
      "/api/ithc/software/{id}",
      get(ithc::get).put(ithc::update).delete(ithc::delete),
    )
    // Templates
    .route("/api/templates/{template_type}", get(templates::download))
    // Middleware
    .layer(
      ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(
          CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([
              Method::GET,
              Method::PUT,
              Method::POST,
              Method::DELETE,
            ])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        ),
    )
    // Spreadsheet uploads can exceed the default 2 MB body cap
    .layer(DefaultBodyLimit::max(16 * 1024 * 1024))
    .with_state(app_state);

  let port: u16 =
    env::var("PORT").ok().and_then(|p| p.parse().ok()).unwrap_or(3000);
  let addr = SocketAddr::from(([0, 0, 0, 0], port));

  info!("HTTP server listening on {}", addr);

  let listener =
    tokio::net::TcpListener::bind(addr).await.expect("Failed to bind");
  axum::serve(listener, app).await.expect("Server error");
}
