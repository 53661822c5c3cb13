//! UniEvents backend
//!
//! Main application entry point

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing::info;

use unievents::{
    config::Settings,
    database::{connection, DatabaseService},
    routes::create_routes,
    services::ServiceFactory,
    state::AppState,
    utils::logging,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging; the guard must outlive the server
    let _guard = logging::init_logging(&settings.logging)?;

    info!("Starting UniEvents backend...");

    // Initialize database connection
    info!("Connecting to database...");
    let db_config = connection::DatabaseConfig {
        url: settings.database.url.clone(),
        max_connections: settings.database.max_connections,
        min_connections: settings.database.min_connections,
        ..Default::default()
    };
    let pool = connection::create_pool(&db_config).await?;

    // Run database migrations
    connection::run_migrations(&pool).await?;

    // Initialize services
    info!("Initializing services...");
    let db = DatabaseService::new(pool.clone());
    let services = ServiceFactory::new(settings.clone(), db.clone()).await?;

    let state = AppState::new(settings.clone(), pool, db, services);
    let app = create_routes(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;
    info!("UniEvents API listening on http://{}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
