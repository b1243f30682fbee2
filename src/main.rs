use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{info, warn};
use trial_scout::{config::Config, routes::create_router, utils::init_logger, AppState};

#[derive(Parser)]
#[command(name = "trial-scout", version, about = "Find and triage clinical trials by specialty")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API (default)
    Serve {
        /// Override PORT
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run one specialty lookup and print the JSON response
    Search {
        /// oncology, hematology, radiology, cardiology or neurology
        specialty: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = Config::from_env()?;
    let _log_guard = init_logger(&config.logging);

    match cli.command.unwrap_or(Command::Serve { port: None }) {
        Command::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            serve(config).await
        }
        Command::Search { specialty } => {
            let state = AppState::from_config(config)?;
            let response = state.trial_service()?.search_by_specialty(&specialty).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(())
        }
    }
}

async fn serve(config: Config) -> anyhow::Result<()> {
    info!("Configuration loaded: {:?}", config.server);
    info!(search = ?config.search, "Search provider settings");

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    // Create shared state
    let state = AppState::from_config(config)?;
    if state.trials.is_none() {
        warn!("EXA_API_KEY not set; trial searches will fail until it is configured");
    }

    // Create router
    let app = create_router(state);

    // Start server
    info!("Server listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}
