mod check_cmd;
mod status_cmd;

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use slashgate_commands::build_default_dispatcher;
use slashgate_config::{config_file_path, load_config, log_report, validate};
use slashgate_gateway::{start_server, GatewayState};

#[derive(Parser)]
#[command(name = "slashgate")]
#[command(about = "slashgate — slash command gateway for chat-ops integrations")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP gateway
    Serve {
        /// Config file (default: $SLASHGATE_CONFIG or ./slashgate.yaml)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
        /// Address to bind the HTTP server to
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Validate a config file and print it with secrets masked
    Check {
        /// Config file to check (default: $SLASHGATE_CONFIG or ./slashgate.yaml)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Query a running gateway's health endpoint
    Status {
        /// Port the gateway listens on
        #[arg(short, long, default_value_t = 8080)]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config, port, bind } => run_server(config, port, bind).await?,
        Commands::Check { config } => {
            let ok = check_cmd::run(&config_file_path(config.as_deref())).await?;
            if !ok {
                std::process::exit(1);
            }
        }
        Commands::Status { port } => status_cmd::run(port).await?,
    }

    Ok(())
}

async fn run_server(config: Option<PathBuf>, port: Option<u16>, bind: Option<String>) -> Result<()> {
    let path = config_file_path(config.as_deref());
    let mut config = load_config(&path).await?;

    slashgate_logging::init_logger(
        &config.logging.level,
        config.logging.dir.as_deref().map(std::path::Path::new),
        config.logging.json,
    );

    if let Some(port) = port {
        config.server.port = port;
    }
    if let Some(bind) = bind {
        config.server.bind = bind;
    }

    let report = validate(&config);
    log_report(&report);
    if !report.is_valid() {
        bail!("Config at {} has {} error(s)", path.display(), report.errors.len());
    }

    let addr: SocketAddr = format!("{}:{}", config.server.bind, config.server.port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", config.server.bind, config.server.port))?;
    let endpoint = config.server.path.clone();

    info!(config = %path.display(), addr = %addr, path = %endpoint, "Starting slashgate");

    let dispatcher = build_default_dispatcher(config)?;
    start_server(addr, GatewayState::new(dispatcher), &endpoint).await
}
