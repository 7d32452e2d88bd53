//! hxpage — server-rendered site with HTMX partial rendering
//!
//! Usage:
//!   hxpage                                  # Default port 8000
//!   hxpage --port 8080                      # Custom port
//!   hxpage --config site.json               # Load config from a JSON file
//!   hxpage --dev-user ada:admin             # Preview pages as a signed-in admin

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use axum::Extension;
use clap::Parser;
use hxpage::dev::parse_dev_user;
use hxpage::pages::site_router;
use hxpage_core::{AuthUser, Config, Environment};
use hxpage_transport::PageServer;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "hxpage", about = "hxpage — server-rendered pages with HTMX")]
struct Cli {
    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Port to listen on (0 for OS-assigned); overrides the config file
    #[arg(long)]
    port: Option<u16>,

    /// Hostname to bind to; overrides the config file
    #[arg(long)]
    hostname: Option<String>,

    /// Environment (local, test, development, staging, production)
    #[arg(long)]
    env: Option<Environment>,

    /// Serve every request as this user, `name`, `name:user` or `name:admin` (local previews only)
    #[arg(long, value_parser = parse_dev_user)]
    dev_user: Option<AuthUser>,

    /// Enable verbose logging
    #[arg(long)]
    verbose: bool,

    /// Write logs to a file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_tracing(cli: &Cli) -> anyhow::Result<()> {
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    if let Some(ref log_path) = cli.log_file {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create log directory {}", parent.display()))?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)
            .with_context(|| format!("failed to open log file {}", log_path.display()))?;

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .init();

        eprintln!("Logging to {}", log_path.display());
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    Ok(())
}

/// Defaults, then the config file, then command-line overrides.
fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    if let Some(port) = cli.port {
        config.http.port = port;
    }
    if let Some(ref hostname) = cli.hostname {
        config.http.hostname = hostname.clone();
    }
    if let Some(env) = cli.env {
        config.app.environment = env;
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli)?;

    let config = Arc::new(load_config(&cli)?);

    let (mut router, routes) = site_router().into_parts();
    if let Some(user) = cli.dev_user.clone() {
        router = router.layer(Extension(user));
    }

    let mut server = PageServer::start_with_routes(config.clone(), router, routes)
        .await
        .context("failed to start server")?;

    println!();
    println!("  {} ({})", config.app.name, config.app.environment);
    println!("  Listening:  http://{}:{}", config.http.hostname, server.port());
    if let Some(ref user) = cli.dev_user {
        let role = if user.admin { "admin" } else { "user" };
        println!("  Dev user:   {} ({role})", user.name);
    }
    println!();
    println!("  Press Ctrl+C to stop.");
    println!();

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for Ctrl+C")?;

    info!("Shutting down");
    server.stop().await;

    Ok(())
}
