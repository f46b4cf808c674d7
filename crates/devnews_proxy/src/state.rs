use std::sync::Arc;

use devnews_engine::{Fetcher, Provider};
use url::Url;

use crate::config::ApiKeySource;

pub struct ProxyState {
    pub provider: Provider,
    pub upstream: Url,
    pub api_key: Arc<dyn ApiKeySource>,
    pub fetcher: Arc<dyn Fetcher>,
}
