use anyhow::Result;
use clap::{Parser, Subcommand};
use sqlx::{migrate::MigrateDatabase, sqlite::SqlitePoolOptions};

/// semainier - weekly meal planning for households
#[derive(Parser)]
#[command(name = "semainier")]
#[command(about = "Self-hosted weekly meal planning service", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run database migrations
    Migrate,
    /// Drop database if exists and recreate with migrations
    Reset,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = semainier::config::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    // Initialize observability (tracing + logging)
    semainier::observability::init_observability(
        "semainier",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    match cli.command {
        Commands::Serve { host, port } => serve_command(config, host, port).await,
        Commands::Migrate => migrate_command(config).await,
        Commands::Reset => reset_command(config).await,
    }
}

#[tracing::instrument(skip(config))]
async fn serve_command(
    config: semainier::config::Config,
    host_override: Option<String>,
    port_override: Option<u16>,
) -> Result<()> {
    tracing::info!("Starting semainier server...");

    // Use CLI overrides if provided, otherwise use config
    let host = host_override.unwrap_or_else(|| config.server.host.clone());
    let port = port_override.unwrap_or(config.server.port);

    // Set up database connection pool
    let pool = SqlitePoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;

    let app = semainier::create_app(pool, config);

    // Start server
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

#[tracing::instrument(skip(config))]
async fn migrate_command(config: semainier::config::Config) -> Result<()> {
    tracing::info!("Running database migrations...");

    // Create database if it doesn't exist
    if !sqlx::Sqlite::database_exists(&config.database.url).await? {
        tracing::info!("Database does not exist, creating: {}", config.database.url);
        sqlx::Sqlite::create_database(&config.database.url).await?;
    }

    // Set up database connection pool
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(&config.database.url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    tracing::info!("Migrations completed successfully");

    Ok(())
}

#[tracing::instrument(skip(config))]
async fn reset_command(config: semainier::config::Config) -> Result<()> {
    tracing::info!("Resetting database...");

    // Drop database if it exists
    if sqlx::Sqlite::database_exists(&config.database.url).await? {
        tracing::warn!("Dropping existing database: {}", config.database.url);
        sqlx::Sqlite::drop_database(&config.database.url).await?;
        tracing::info!("Database dropped successfully");
    } else {
        tracing::info!("Database does not exist, nothing to drop");
    }

    // Run migrate command to recreate and apply migrations
    migrate_command(config).await?;

    tracing::info!("Database reset completed successfully");

    Ok(())
}
