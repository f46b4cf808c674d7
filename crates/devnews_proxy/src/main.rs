use std::sync::Arc;

use devnews_logging::{news_warn, LogDestination};
use devnews_proxy::config::API_KEY_VAR;
use devnews_proxy::{ApiKeySource, EnvApiKey, ProxyConfig};
use log::LevelFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    devnews_logging::initialize(LogDestination::Terminal, LevelFilter::Info);

    let config = ProxyConfig::from_env()?;
    let api_key = EnvApiKey::new(API_KEY_VAR);
    if api_key.api_key().is_none() {
        // Requests fail with a 500 until the variable is set.
        news_warn!("{}", api_key.missing_message());
    }

    devnews_proxy::serve(config, Arc::new(api_key)).await
}
