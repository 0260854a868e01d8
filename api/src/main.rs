//! Staffbook API Server
//!
//! Company and employee registry with role-based access.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use sea_orm::Database;
use serde::Serialize;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;
use tower_governor::GovernorLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod auth;
mod config;
mod domain;
mod entity;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::{
    ensure_schema, InMemoryReadCache, PostgresCompanyRepository, PostgresEmployeeRepository,
    PostgresUserRepository,
};
use app::{CompanyService, EmployeeService, UserService};
use config::{Config, RateLimit};
use domain::ports::{CompanyRepository, EmployeeRepository, ReadCache, UserRepository};

pub type DynCompanyService = CompanyService<dyn CompanyRepository, dyn ReadCache>;
pub type DynEmployeeService =
    EmployeeService<dyn EmployeeRepository, dyn CompanyRepository, dyn ReadCache>;
pub type DynUserService = UserService<dyn UserRepository>;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub company_service: Arc<DynCompanyService>,
    pub employee_service: Arc<DynEmployeeService>,
    pub user_service: Arc<DynUserService>,
}

impl AppState {
    /// Wire the services over one set of adapters
    pub fn new(
        companies: Arc<dyn CompanyRepository>,
        employees: Arc<dyn EmployeeRepository>,
        users: Arc<dyn UserRepository>,
        cache: Arc<dyn ReadCache>,
        session_ttl: chrono::Duration,
    ) -> Self {
        Self {
            company_service: Arc::new(CompanyService::new(companies.clone(), cache.clone())),
            employee_service: Arc::new(EmployeeService::new(employees, companies, cache)),
            user_service: Arc::new(UserService::new(users, session_ttl)),
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the full router. Registration and login are rate limited per peer IP
/// when `rate_limit` is set.
pub fn build_router(state: AppState, rate_limit: Option<RateLimit>) -> anyhow::Result<Router> {
    let mut public_auth_routes = Router::new()
        .route("/users/register", post(handlers::register))
        .route("/users/login", post(handlers::login));

    if let Some(limit) = rate_limit {
        // PeerIpKeyExtractor needs the socket address from into_make_service_with_connect_info
        let governor_config = Arc::new(
            GovernorConfigBuilder::default()
                .key_extractor(PeerIpKeyExtractor)
                .per_second(limit.per_second)
                .burst_size(limit.burst_size)
                .finish()
                .context("Invalid rate limit configuration")?,
        );

        public_auth_routes = public_auth_routes.layer(GovernorLayer {
            config: governor_config,
        });
    }

    let protected_routes = Router::new()
        .route("/users/logout", post(handlers::logout))
        .route("/users/profile", get(handlers::profile))
        .route(
            "/companies",
            get(handlers::list_companies).post(handlers::create_company),
        )
        .route("/companies/all", get(handlers::list_all_companies))
        .route("/companies/town/:town", get(handlers::companies_by_town))
        .route("/companies/budget", get(handlers::companies_by_budget))
        .route(
            "/companies/:name",
            get(handlers::get_company).delete(handlers::remove_company),
        )
        .route(
            "/employees",
            get(handlers::list_employees).post(handlers::create_employee),
        )
        .route("/employees/search", get(handlers::search_employees))
        .route(
            "/employees/by-name/:full_name",
            get(handlers::get_employee_by_name).delete(handlers::fire_employee_by_name),
        )
        .route(
            "/employees/by-name/:full_name/transfer",
            post(handlers::transfer_employee_by_name),
        )
        .route(
            "/employees/:id",
            get(handlers::get_employee).delete(handlers::fire_employee),
        )
        .route("/employees/:id/transfer", post(handlers::transfer_employee))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::auth_middleware,
        ));

    let app = Router::new()
        // Health check (no auth)
        .route("/health", get(health))
        .merge(public_auth_routes)
        .merge(protected_routes)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,staffbook_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Staffbook API...");

    let config = Config::from_env()?;

    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    ensure_schema(&db)
        .await
        .context("Failed to create database schema")?;

    let cache: Arc<dyn ReadCache> = Arc::new(InMemoryReadCache::new(
        config.cache_ttl,
        config.cache_max_entries,
    ));

    let state = AppState::new(
        Arc::new(PostgresCompanyRepository::new(db.clone())),
        Arc::new(PostgresEmployeeRepository::new(db.clone())),
        Arc::new(PostgresUserRepository::new(db)),
        cache,
        config.session_ttl,
    );

    state
        .user_service
        .bootstrap(&config.default_password)
        .await
        .context("Failed to seed roles and default users")?;

    let app = build_router(state, config.rate_limit)?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("Server error")?;

    Ok(())
}
