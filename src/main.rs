//! EagleForge Tools MCP Server - Main Entry Point
//!
//! Speaks MCP over stdin/stdout. Logs go to stderr.

use clap::{Parser, Subcommand};
use eagleforge_tools_mcp::config::ServerConfig;
use eagleforge_tools_mcp::dispatcher::{Dispatcher, HttpBackend};
use eagleforge_tools_mcp::observability::init_logging_with_verbosity;
use eagleforge_tools_mcp::server::McpServer;
use eagleforge_tools_mcp::tools::catalog;
use eagleforge_tools_mcp::transport::serve_stdio;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use tracing::{error, info};

/// MCP server bridging AI agents to the EagleForge paid tools API
#[derive(Parser)]
#[command(name = "eagleforge-tools-mcp")]
#[command(about = "MCP server for the EagleForge paid tools API")]
#[command(version)]
struct Cli {
    /// Optional TOML configuration file; environment variables still win
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbose logging (-v debug, -vv trace) unless LOG_LEVEL is set
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve MCP over stdio (default)
    Serve,
    /// Print the tool catalog as JSON
    Tools,
    /// Validate configuration
    Config {
        /// Show the resolved configuration with the API key masked
        #[arg(long)]
        show: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_logging_with_verbosity(cli.verbose);

    let config = match ServerConfig::load(cli.config.as_deref()) {
        Ok(config) => Arc::new(config),
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    let result = match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => run_server(config).await,
        Commands::Tools => print_catalog(),
        Commands::Config { show } => handle_config_command(&config, show),
    };

    if let Err(e) = result {
        error!("Command failed: {}", e);
        process::exit(1);
    }

    info!("Application shutdown complete");
    // A pending stdin read holds a blocking thread that runtime drop would wait on
    process::exit(0);
}

async fn run_server(config: Arc<ServerConfig>) -> Result<(), Box<dyn std::error::Error>> {
    info!(
        backend = %config.backend.base_url,
        "Starting EagleForge tools MCP server v{}",
        env!("CARGO_PKG_VERSION")
    );

    let backend = HttpBackend::new(config)?;
    let server = Arc::new(McpServer::new(Dispatcher::new(Arc::new(backend))));

    tokio::select! {
        result = serve_stdio(server) => {
            result?;
            info!("Client disconnected, shutting down");
        }
        _ = shutdown_signal() => {
            info!("Received shutdown signal, shutting down");
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}

fn print_catalog() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(catalog())?);
    Ok(())
}

fn handle_config_command(
    config: &ServerConfig,
    show: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if show {
        println!("{}", toml::to_string_pretty(&config.redacted())?);
    }

    info!("Configuration validation complete");
    Ok(())
}
