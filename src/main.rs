use anyhow::Result;
use biomaterial_finder::config::{find_config_file, get_config, load_config, Config};
use biomaterial_finder::mcp::server::McpServer;
use biomaterial_finder::service::DiscoveryService;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Biomaterial Finder - discover biomaterials from the BioOne registry over MCP
#[derive(Parser, Debug)]
#[command(name = "biomaterial-finder")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Discover biomaterials from the BioOne registry over MCP", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (can be used multiple times for more verbosity: -v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short)]
    quiet: bool,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Request timeout in seconds (overrides the config file)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the MCP server (stdio unless --http is given)
    Serve {
        /// Run in streamable HTTP mode instead of stdio
        #[arg(long)]
        http: bool,

        /// Port for HTTP mode
        #[arg(long, short, default_value_t = 3000)]
        port: u16,

        /// Host to bind in HTTP mode
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Serve {
            http: false,
            port: 3000,
            host: "127.0.0.1".to_string(),
        }
    }
}

fn load(cli: &Cli) -> Result<Config> {
    let mut config = if let Some(path) = &cli.config {
        load_config(path)?
    } else if let Some(path) = find_config_file() {
        load_config(&path)?
    } else {
        get_config()?
    };

    if let Some(timeout) = cli.timeout {
        config.registry.timeout_secs = timeout;
    }

    Ok(config)
}

/// Log directive for the crate given the CLI flags and configured level
fn log_directive(verbose: u8, quiet: bool, configured: &str) -> String {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => configured,
            1 => "debug",
            _ => "trace",
        }
    };
    format!("biomaterial_finder={}", level)
}

fn init_tracing(cli: &Cli, config: &Config) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG")
            .unwrap_or_else(|_| log_directive(cli.verbose, cli.quiet, &config.logging.level)),
    );

    // stdout carries the MCP protocol, so logs go to stderr
    let json = config.logging.is_json();
    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load(&cli)?;
    init_tracing(&cli, &config);

    if let Some(path) = cli.config.clone().or_else(find_config_file) {
        tracing::info!("Using config file: {}", path.display());
    }

    let service = DiscoveryService::from_config(&config)?;
    let server = McpServer::new(Arc::new(service))?;

    match cli.command.unwrap_or_default() {
        Commands::Serve { http: true, port, host } => {
            let addr = format!("{}:{}", host, port);
            let (bound_addr, handle) = server.run_http(&addr).await?;
            tracing::info!("MCP server listening on {}", bound_addr);

            handle
                .await
                .map_err(|e| anyhow::anyhow!("Server task failed: {}", e))?;
        }
        Commands::Serve { http: false, .. } => {
            server.run().await?;
        }
    }

    Ok(())
}
