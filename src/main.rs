use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use colored::Colorize;
use dotenv::dotenv;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use product_insight::api;
use product_insight::commands::lookup;
use product_insight::config::{AppConfig, ConfigError};
use product_insight::pipeline::Pipeline;
use product_insight::providers::build_provider;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Barcode to nutrition or drug-label assessment", long_about = None)]
struct Args {
    /// Look up a single product code and print the report
    #[arg(long)]
    code: Option<String>,

    /// Serve the HTTP endpoint
    #[arg(long)]
    server: bool,

    #[arg(long, default_value = "5000")]
    port: u16,

    /// Generative-text backend: gemini or openai (overrides LLM_PROVIDER)
    #[arg(long)]
    provider: Option<String>,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Provider error: {0}")]
    Provider(String),
    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),
    #[error("{0}")]
    Lookup(String),
    #[error("Nothing to do: pass --code <CODE> or --server")]
    NoMode,
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run(Args::parse()).await {
        eprintln!("{}", e.to_string().red());
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), AppError> {
    let provider_override = args.provider.clone();
    let config = AppConfig::from_vars(|key| match (key, &provider_override) {
        ("LLM_PROVIDER", Some(name)) => Some(name.clone()),
        _ => env::var(key).ok(),
    })?;

    let provider = build_provider(config.provider.clone())
        .await
        .map_err(|e| AppError::Provider(e.to_string()))?;
    let model = provider
        .get_model_info()
        .await
        .map_err(|e| AppError::Provider(e.to_string()))?;
    info!(provider = %config.provider.kind, %model, "generative provider ready");

    let pipeline = Pipeline::from_config(&config, provider)?;

    if let Some(code) = args.code {
        return lookup::handle_command(&code, &pipeline).await.map_err(AppError::Lookup);
    }

    if !args.server {
        return Err(AppError::NoMode);
    }

    let app = api::create_api(Arc::new(pipeline), model);
    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "API server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
