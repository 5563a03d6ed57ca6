//! CampusHub Events Platform
//!
//! Main application entry point

use tracing::info;

use campushub::{
    config::Settings,
    database::{connection::create_pool, DatabaseService},
    handlers::{create_router, AppState},
    services::ServiceFactory,
    utils::logging,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging; the guard keeps the file writer alive until exit
    let _logging_guard = logging::init_logging(&settings.logging)?;

    info!("Starting CampusHub events platform...");

    // Initialize database connection
    info!("Connecting to database...");
    let pool_config = campushub::database::connection::PoolConfig::from(&settings.database);
    let db_pool = create_pool(&pool_config).await?;

    // Run database migrations
    info!("Running database migrations...");
    campushub::database::connection::run_migrations(&db_pool).await?;

    // Initialize database service
    let database_service = DatabaseService::new(db_pool.clone());

    // Initialize services
    info!("Initializing services...");
    let services = ServiceFactory::new(settings.clone(), database_service.clone()).await?;

    let state = AppState {
        pool: db_pool,
        db: database_service,
        services,
    };

    let app = create_router(state);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("CampusHub API listening on {}", addr);

    axum::serve(listener, app).await?;

    info!("CampusHub has been shut down.");

    Ok(())
}
