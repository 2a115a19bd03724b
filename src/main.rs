use clap::Parser;
use petmart::config::Config;
use petmart::server::Server;
use std::sync::{Arc, Mutex};
use tracing::info;

/// Command-line options
#[derive(Debug, Parser)]
#[command(name = "petmart", about = "Pet marketplace backend")]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long)]
    config: Option<String>,

    /// Listening address override
    #[arg(long)]
    addr: Option<String>,

    /// Data directory override
    #[arg(long)]
    data_dir: Option<String>,

    /// Uploads directory override
    #[arg(long)]
    uploads_dir: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if let Some(addr) = cli.addr {
        config.server_addr = addr;
    }
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(dir) = cli.uploads_dir {
        config.uploads_dir = dir;
    }

    // Initialize logging
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config.log.level.clone()));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true);
    match &config.log.file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            subscriber.with_writer(Mutex::new(file)).init();
        }
        None => subscriber.init(),
    }

    info!("Starting PetMart - pet marketplace backend");
    info!("Version: 0.1.0");

    // Ensure data and upload directories exist with seeded store files
    config.bootstrap()?;

    // Create and start TCP server
    let server = Arc::new(Server::bind(&config).await?);
    info!("Server listening on: {}", server.local_addr());

    // Start server (blocking)
    server.run().await;

    Ok(())
}
