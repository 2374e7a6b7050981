use anyhow::Result;
use payval::config::ServiceConfig;
use payval::server::ServerBuilder;
use tracing_subscriber::EnvFilter;

/// Environment variable naming the YAML config file
const CONFIG_PATH_ENV: &str = "PAYVAL_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "payval.yaml";

#[tokio::main]
async fn main() -> Result<()> {
    let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = ServiceConfig::load_or_default(&path)?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!(config = %path, "starting payval");
    ServerBuilder::new(config).serve().await
}
