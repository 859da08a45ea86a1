//! Professor ranking service
//!
//! ```sh
//! # Run with default config (~/.config/professor-ranking/config.toml)
//! professor-ranking
//!
//! # Custom config path and port
//! professor-ranking --config /etc/professor-ranking/config.toml --port 8080
//!
//! # Validate config without starting
//! professor-ranking --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use professor_ranking::config::{default_config_path, AppConfig};
use professor_ranking::server::{init_tracing, ServerHandle, ServerOptions};

/// REST backend for browsing courses and professors and rating them.
#[derive(Parser, Debug)]
#[command(
    name = "professor-ranking",
    version,
    about = "Course and professor ranking REST API",
    long_about = "REST API for browsing courses and professors, publishing reviews \
                  and tracking approved courses.\n\n\
                  Default config: ~/.config/professor-ranking/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "RANKING_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config_path = cli.config.unwrap_or_else(default_config_path);

    let loaded = AppConfig::load(&config_path);
    let mut config = match &loaded {
        Ok(cfg) => cfg.clone(),
        Err(_) => {
            let mut cfg = AppConfig::default();
            cfg.apply_env(|key| std::env::var(key).ok());
            cfg
        }
    };
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }

    init_tracing(&config);
    match loaded {
        Ok(_) => info!("Configuration loaded from {}", config_path.display()),
        Err(e) => {
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
        }
    }

    if let Some(port) = cli.port {
        info!("CLI override: port = {}", port);
        config.server.port = port;
    }

    if cli.check {
        config.validate()?;
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   Environment : {:?}", config.environment);
        println!("   Address     : {}", config.listen_address());
        println!("   Database    : {}", config.database.url);
        println!("   Log level   : {}", config.logging.level);
        return Ok(());
    }

    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
    })
    .await?;

    handle.install_signal_handler();
    info!("Press Ctrl+C to shutdown gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}
