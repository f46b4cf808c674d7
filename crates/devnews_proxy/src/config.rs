use std::net::SocketAddr;

use devnews_engine::{FetchSettings, Provider, UnknownProvider};
use thiserror::Error;
use url::Url;

pub const API_KEY_VAR: &str = "NEWS_API_TOKEN";
pub const PROVIDER_VAR: &str = "NEWS_PROVIDER";
pub const UPSTREAM_VAR: &str = "NEWS_UPSTREAM_URL";
pub const ADDR_VAR: &str = "NEWS_PROXY_ADDR";
pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";

/// Where the proxy finds its upstream API key. Consulted on every request.
pub trait ApiKeySource: Send + Sync {
    fn api_key(&self) -> Option<String>;

    /// Error text returned to callers when no key is available.
    fn missing_message(&self) -> String;
}

/// Reads the key from an environment variable at request time.
#[derive(Debug, Clone)]
pub struct EnvApiKey {
    var: String,
}

impl EnvApiKey {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvApiKey {
    fn default() -> Self {
        Self::new(API_KEY_VAR)
    }
}

impl ApiKeySource for EnvApiKey {
    fn api_key(&self) -> Option<String> {
        std::env::var(&self.var)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }

    fn missing_message(&self) -> String {
        format!("{} environment variable is not set", self.var)
    }
}

/// Fixed key, mainly for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct StaticApiKey(pub Option<String>);

impl ApiKeySource for StaticApiKey {
    fn api_key(&self) -> Option<String> {
        self.0.clone().filter(|key| !key.trim().is_empty())
    }

    fn missing_message(&self) -> String {
        "news API key is not configured".to_string()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Provider(#[from] UnknownProvider),
    #[error("NEWS_UPSTREAM_URL is not a valid URL ({value:?}): {reason}")]
    Upstream { value: String, reason: String },
    #[error("NEWS_PROXY_ADDR is not a valid socket address ({value:?}): {reason}")]
    Addr { value: String, reason: String },
}

#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub provider: Provider,
    pub upstream: Url,
    pub addr: SocketAddr,
    pub fetch: FetchSettings,
}

impl ProxyConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from a variable lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let provider = match get(PROVIDER_VAR) {
            Some(name) => name.parse::<Provider>()?,
            None => Provider::default(),
        };

        let upstream_raw = get(UPSTREAM_VAR).unwrap_or_else(|| provider.default_endpoint().to_string());
        let upstream = Url::parse(upstream_raw.trim()).map_err(|err| ConfigError::Upstream {
            value: upstream_raw.clone(),
            reason: err.to_string(),
        })?;

        let addr_raw = get(ADDR_VAR).unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = addr_raw.trim().parse().map_err(|err: std::net::AddrParseError| ConfigError::Addr {
            value: addr_raw.clone(),
            reason: err.to_string(),
        })?;

        Ok(Self {
            provider,
            upstream,
            addr,
            fetch: FetchSettings::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_to_newsapi_on_localhost() {
        let config = ProxyConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.provider, Provider::NewsApi);
        assert_eq!(config.upstream.as_str(), "https://newsapi.org/v2/everything");
        assert_eq!(config.addr, "127.0.0.1:3000".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn provider_picks_its_endpoint() {
        let config = ProxyConfig::from_lookup(lookup(&[(PROVIDER_VAR, "currents")])).unwrap();
        assert_eq!(config.provider, Provider::Currents);
        assert_eq!(
            config.upstream.as_str(),
            "https://api.currentsapi.services/v1/search"
        );
    }

    #[test]
    fn overrides_are_applied() {
        let config = ProxyConfig::from_lookup(lookup(&[
            (UPSTREAM_VAR, "http://127.0.0.1:9000/mirror"),
            (ADDR_VAR, "0.0.0.0:8080"),
        ]))
        .unwrap();
        assert_eq!(config.upstream.as_str(), "http://127.0.0.1:9000/mirror");
        assert_eq!(config.addr.port(), 8080);
    }

    #[test]
    fn invalid_values_are_reported() {
        assert!(matches!(
            ProxyConfig::from_lookup(lookup(&[(PROVIDER_VAR, "bing")])),
            Err(ConfigError::Provider(_))
        ));
        assert!(matches!(
            ProxyConfig::from_lookup(lookup(&[(UPSTREAM_VAR, "not a url")])),
            Err(ConfigError::Upstream { .. })
        ));
        assert!(matches!(
            ProxyConfig::from_lookup(lookup(&[(ADDR_VAR, "localhost")])),
            Err(ConfigError::Addr { .. })
        ));
    }

    #[test]
    fn static_key_treats_blank_as_missing() {
        assert_eq!(StaticApiKey(Some("  ".to_string())).api_key(), None);
        assert_eq!(StaticApiKey(Some("k".to_string())).api_key(), Some("k".to_string()));
    }

    #[test]
    fn env_key_names_variable_when_missing() {
        let source = EnvApiKey::new("DEVNEWS_TEST_UNSET_KEY_VAR");
        assert_eq!(source.api_key(), None);
        assert_eq!(
            source.missing_message(),
            "DEVNEWS_TEST_UNSET_KEY_VAR environment variable is not set"
        );
    }
}
