use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use books_manager::{config, db, server};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "books_manager=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    dotenvy::dotenv().ok();

    // Check for --profile CLI argument
    let args: Vec<String> = std::env::args().collect();
    let profile = args
        .iter()
        .position(|arg| arg == "--profile")
        .and_then(|pos| args.get(pos + 1).cloned());

    let config = config::Config::from_env_with_profile(profile);
    tracing::debug!("Loaded configuration: {:?}", config);

    // Initialize database
    let db = db::init_db(&config.database_url)
        .await
        .expect("Failed to initialize database");

    let app = server::build_router(db, &config.cors_allowed_origins);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!(
        "Books manager listening on {} (profile: {})",
        addr,
        config.profile
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
