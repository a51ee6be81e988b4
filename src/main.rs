//! Netfront - Server-rendered front-end for network-management APIs

use anyhow::Result;
use clap::{Parser, Subcommand};
use netfront::{config::FrontendConfig, FrontendBuilder};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "netfront")]
#[command(author = "Netfront Team")]
#[command(version)]
#[command(about = "Server-rendered front-end for network-management APIs")]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "NETFRONT_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the front-end server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(long)]
        port: Option<u16>,

        /// Backend API origin
        #[arg(long)]
        api_url: Option<String>,
    },

    /// Show configuration
    Config {
        /// Show default configuration
        #[arg(long)]
        default: bool,
    },

    /// List installed plugins
    Plugins,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("netfront={},tower_http=debug", log_level).into());
    let registry = tracing_subscriber::registry().with(filter);
    if cli.json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    let config = FrontendConfig::resolve(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve {
            host,
            port,
            api_url,
        } => {
            run_server(config, host, port, api_url).await?;
        }
        Commands::Config { default } => {
            show_config(if default { None } else { Some(&config) })?;
        }
        Commands::Plugins => {
            list_plugins(&config).await?;
        }
    }

    Ok(())
}

async fn run_server(
    config: FrontendConfig,
    host: Option<String>,
    port: Option<u16>,
    api_url: Option<String>,
) -> Result<()> {
    let mut builder = FrontendBuilder::new().config(config);
    if let Some(host) = host {
        builder = builder.host(host);
    }
    if let Some(port) = port {
        builder = builder.port(port);
    }
    if let Some(url) = api_url {
        builder = builder.api_url(url);
    }

    let frontend = builder.build()?;
    tracing::info!("Netfront is starting. Press Ctrl+C to stop.");
    frontend.serve().await?;
    Ok(())
}

async fn list_plugins(config: &FrontendConfig) -> Result<()> {
    println!("Plugin directory: {}", config.plugins.dir.display());
    if !config.plugins.enabled {
        println!("Plugins are disabled");
        return Ok(());
    }

    let manifests = netfront::plugins::discover(&config.plugins.dir).await?;
    if manifests.is_empty() {
        println!("No plugins installed");
    }
    for manifest in manifests {
        println!(
            "  {} ({}) -> /plugins/{}",
            manifest.title, manifest.identifier, manifest.mount_path
        );
    }
    Ok(())
}

fn show_config(config: Option<&FrontendConfig>) -> Result<()> {
    let config = config.cloned().unwrap_or_default();
    let toml = toml::to_string_pretty(&config)?;
    println!("{}", toml);
    Ok(())
}
