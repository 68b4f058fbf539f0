//! `userdird` — the userdir server binary.
//!
//! Usage:
//!   userdird [-c <context-name-or-path>] [--listen <addr>] [--data-dir <dir>]
//!
//! The context name resolves to `/etc/userdir/<name>.toml`. If a path with
//! `/` or `.` is given, it's used directly. Without a config file the
//! server uses built-in defaults (a local `data.sqlite`).

mod config;
mod routes;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::info;

use directory::DirectoryModule;
use userdir_core::Module;

use config::ServerConfig;

/// userdir server.
#[derive(Parser, Debug)]
#[command(name = "userdird", about = "userdir server")]
struct Cli {
    /// Context name or path to config file.
    #[arg(short = 'c', long = "config")]
    config: Option<String>,

    /// Listen address (overrides config file).
    #[arg(long = "listen")]
    listen: Option<String>,

    /// Data directory (overrides config file).
    #[arg(long = "data-dir")]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    // Load server configuration, if given.
    let server_config = match &cli.config {
        Some(name) => {
            let path = ServerConfig::resolve_path(name);
            info!("Loading configuration from {}", path.display());
            ServerConfig::load(&path)?
        }
        None => ServerConfig::default(),
    };

    // CLI flags override the config file.
    let core_config = userdir_core::ServiceConfig {
        data_dir: cli.data_dir.or(server_config.storage.data_dir),
        sqlite_path: server_config.storage.sqlite_path,
        listen: cli
            .listen
            .or(server_config.listen)
            .unwrap_or_else(|| "0.0.0.0:8080".to_string()),
    };

    if let Some(ref data_dir) = core_config.data_dir {
        std::fs::create_dir_all(data_dir)?;
    }

    // Initialize storage. The schema is created on module init.
    let sql: Arc<dyn userdir_sql::SQLStore> = Arc::new(
        userdir_sql::SqliteStore::open(&core_config.resolve_sqlite_path())
            .map_err(|e| anyhow::anyhow!("failed to open SQL store: {}", e))?,
    );

    let directory_module = DirectoryModule::new(sql)?;
    info!("Directory module initialized");

    let module_routes = vec![(directory_module.name(), directory_module.routes())];

    // Build router.
    let app = routes::build_router(module_routes);

    // Start server.
    let listener = tokio::net::TcpListener::bind(&core_config.listen).await?;
    info!("userdir server listening on {}", core_config.listen);
    axum::serve(listener, app).await?;

    Ok(())
}
