//! CRM server - customer records over HTTP and an interactive console.
//!
//! This binary serves the web interface on port 3001 (override with `PORT`)
//! and runs the text menu on stdin/stdout at the same time.
//!
//! # Architecture
//!
//! - Axum web framework
//! - Askama templates for the customer listing
//! - `PostgreSQL` for customer records
//! - A console task sharing the same store handle
//!
//! Quitting the console leaves the web server running. The process stops on
//! Ctrl+C or SIGTERM.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crm_server::config::ServerConfig;
use crm_server::console::Console;
use crm_server::db::{self, CustomerStore, PgCustomerStore};
use crm_server::routes;
use crm_server::state::AppState;

#[tokio::main]
async fn main() {
    // Load configuration from environment
    let config = ServerConfig::from_env().expect("Failed to load configuration");

    // Initialize tracing with EnvFilter
    // Defaults to info level for our crate if RUST_LOG is not set
    // Logs go to stderr so they stay out of the console menu on stdout
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "crm_server=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // The pool connects lazily; an unreachable database is reported below
    let pool = db::create_pool(&config.database_url).expect("Invalid DATABASE_URL");

    // NOTE: Migrations are NOT run automatically on startup.
    // Run them explicitly via: cargo run -p crm-cli -- migrate

    let store: Arc<dyn CustomerStore> = Arc::new(PgCustomerStore::new(pool));
    let state = AppState::new(store);

    let app = routes::router(state.clone());

    // Start server
    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");
    tracing::info!("Server is running on http://localhost:{}", config.port);

    tokio::spawn(check_database(state.clone()));
    tokio::spawn(run_console(state));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Ping the database once and log the outcome. Never fatal.
async fn check_database(state: AppState) {
    match state.store().ping().await {
        Ok(()) => tracing::info!("Connected to database"),
        Err(e) => tracing::error!(error = %e, "Database connection failed"),
    }
}

/// Run the console menu on stdin/stdout until the user quits.
async fn run_console(state: AppState) {
    let mut console = match Console::stdio(state.store_handle()) {
        Ok(console) => console,
        Err(e) => {
            tracing::error!(error = %e, "Failed to start console");
            return;
        }
    };

    match console.run().await {
        Ok(()) => tracing::info!("Console closed; web server keeps running"),
        Err(e) => tracing::error!(error = %e, "Console stopped on I/O error"),
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
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
