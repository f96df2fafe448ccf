//! # Server Setup
//!
//! Server initialization, route registration, and HTTP server startup.
//!
//! This module provides the main server setup function that loads
//! configuration, connects the store, builds the Axum router with its
//! middleware stack, and serves until Ctrl-C.

// region: --- Imports
use axum::{
    extract::FromRef,
    http::{header, HeaderValue, Method, StatusCode},
    middleware,
    routing::{get, post, put},
    Router,
};
use lib_core::{connect_store, Config, DynStore};
use lib_utils::get_env_or;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{error, info};

use crate::handlers::{auth, health, todos};
use crate::middleware::{log_requests, require_auth, stamp_req, RequestStamp};
use crate::services::{AccountService, TaskService};
// endregion: --- Imports

// region: --- AppState
/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub accounts: AccountService,
    pub tasks: TaskService,
}

impl AppState {
    /// Wire the services to `store` using the timeouts and secrets in `config`.
    pub fn new(store: DynStore, config: Config) -> Self {
        Self {
            accounts: AccountService::new(store.clone(), &config),
            tasks: TaskService::new(store, config.db_timeout()),
            config,
        }
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for AccountService {
    fn from_ref(state: &AppState) -> Self {
        state.accounts.clone()
    }
}

impl FromRef<AppState> for TaskService {
    fn from_ref(state: &AppState) -> Self {
        state.tasks.clone()
    }
}
// endregion: --- AppState

// region: --- Server Configuration
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:8080")
    pub bind_address: String,
    /// Allowed CORS origins
    pub allowed_origins: Vec<String>,
}

impl ServerConfig {
    /// Read `BIND_ADDRESS` and a comma-separated `CORS_ORIGINS`, falling back
    /// to the defaults for anything unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let allowed_origins = std::env::var("CORS_ORIGINS")
            .ok()
            .map(|raw| parse_origins(&raw))
            .filter(|origins| !origins.is_empty())
            .unwrap_or(defaults.allowed_origins);

        Self {
            bind_address: get_env_or("BIND_ADDRESS", &defaults.bind_address),
            allowed_origins,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
                "http://localhost:8080".to_string(),
                "http://127.0.0.1:8080".to_string(),
            ],
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
// endregion: --- Server Configuration

// region: --- Server Setup
/// Initialize and start the HTTP server
///
/// # Errors
///
/// This function will return an error if:
/// - Configuration loading or validation fails
/// - The store cannot be reached within `DB_TIMEOUT_SECS`
/// - Server binding fails
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    let log_level = std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase();

    let filter = match log_level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {
            tracing_subscriber::EnvFilter::new(&log_level)
        }
        _ => tracing_subscriber::EnvFilter::new("info"),
    };

    // A subscriber may already be installed (tests, embedding)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .try_init();

    info!(" TODO BACKEND STARTING");
    info!(" Log level: {}", log_level);

    info!("Loading configuration...");
    let app_config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    app_config.validate().map_err(|e| anyhow::anyhow!(e))?;
    info!("Configuration: {:?}", app_config);

    let store = connect_store(&app_config).await.map_err(|e| {
        error!("Could not reach the database: {}", e);
        anyhow::anyhow!(e)
    })?;

    let state = AppState::new(store, app_config);
    let app = create_router(state, &config.allowed_origins);

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    info!(" SERVER READY: http://{}", config.bind_address);

    log_server_info();

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Create the main application router with all routes
pub fn create_router(state: AppState, allowed_origins: &[String]) -> Router {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    info!("[ROUTE SETUP] Registering HTTP routes...");

    // Protected routes: the identity is resolved before any body is read
    let todo_routes = Router::new()
        .route(
            "/todos",
            post(todos::create_todo)
                .get(todos::list_todos)
                .put(todos::update_todo)
                .delete(todos::delete_todo),
        )
        .route("/todos/status", put(todos::update_todo_status))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/", get(health::live))
        .route("/health", get(health::health))
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .merge(todo_routes)
        .fallback(|| async {
            info!("[404 HANDLER] Unmatched route - returning 404");
            (StatusCode::NOT_FOUND, "Route not found")
        })
        .with_state(state)
        // Comprehensive request/response logging
        .layer(middleware::from_fn(log_requests))
        // Tower HTTP trace layer for spans
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        request_id = %RequestStamp::id_of(request),
                        method = %request.method(),
                        uri = %request.uri(),
                        version = ?request.version(),
                    )
                },
            ),
        )
        .layer(cors)
        // Request stamping is outermost so every layer above sees the id
        .layer(middleware::from_fn(stamp_req))
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received, draining connections..."),
        Err(e) => {
            error!("Could not listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

/// Log server information
fn log_server_info() {
    info!("");
    info!("Public Endpoints:");
    info!("   GET    /                        - Liveness probe");
    info!("   GET    /health                  - Health check");
    info!("   POST   /register                - Create account");
    info!("   POST   /login                   - Login");
    info!("");
    info!("Protected Endpoints (Bearer token):");
    info!("   POST   /todos                   - Create todo");
    info!("   GET    /todos?page=&limit=      - List own todos");
    info!("   PUT    /todos?id=               - Update todo");
    info!("   PUT    /todos/status?id=        - Update todo status");
    info!("   DELETE /todos?id=               - Delete todo");
    info!("");
}
// endregion: --- Server Setup
