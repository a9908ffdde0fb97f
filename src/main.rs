use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use weld::agent::client::ChatClient;
use weld::api::{create_router, AppState};
use weld::config::Config;
use weld::fetch::HttpFetcher;
use weld::session::MemorySessionStore;
use weld::store::http::HttpDocumentStore;

#[derive(Parser)]
#[command(name = "weld")]
#[command(about = "Staged API-integration agent server")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the weld server
    Serve {
        /// Port for HTTP API
        #[arg(short, long, default_value = "8000")]
        port: u16,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "weld=debug,tower_http=debug".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn build_state(config: &Config) -> AppState {
    let store = Arc::new(HttpDocumentStore::new(
        config.store_url.clone(),
        config.store_api_key.clone(),
    ));

    AppState {
        sessions: Arc::new(MemorySessionStore::new()),
        artifacts: store.clone(),
        capabilities: store,
        fetcher: Arc::new(HttpFetcher::new()),
        agent: Arc::new(ChatClient::with_base_url(
            config.agent_api_key.clone(),
            config.model.clone(),
            config.agent_url.clone(),
        )),
    }
}

async fn serve(port: u16) -> anyhow::Result<()> {
    let config = Config::from_env();
    let app = create_router(build_state(&config));

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
    tracing::info!("weld server listening on http://127.0.0.1:{}", port);

    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Some(Commands::Serve { port }) => serve(port).await?,
        None => serve(8000).await?,
    }

    Ok(())
}
