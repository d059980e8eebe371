use anyhow::Context;
use std::time::Duration;
use url::Url;

/// Provider API instances queried in order until one resolves.
const DEFAULT_PROVIDERS: &[&str] = &[
    "https://pipedapi.kavin.rocks",
    "https://pipedapi.adminforge.de",
    "https://api.piped.private.coffee",
];

/// CDN host substituted into resolved stream URLs.
const DEFAULT_TARGET_HOST: &str = "manifest.googlevideo.com";

/// Some upstream hosts reject requests carrying a default client signature.
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Static service configuration.
///
/// Passed explicitly into the resolver, fetcher and router so tests can
/// inject their own provider lists and timeouts. Not mutable at runtime.
#[derive(Debug, Clone)]
pub struct Config {
    /// Ordered provider endpoint bases; the first listed is tried first.
    pub providers: Vec<Url>,

    /// Hard timeout for one provider query. A timed-out attempt is abandoned
    /// and the next endpoint is tried; the same endpoint is never retried.
    pub provider_timeout: Duration,

    /// Overall timeout for the final manifest fetch.
    pub fetch_timeout: Duration,

    /// Redirect bound for the manifest fetch.
    pub max_redirects: usize,

    /// Host substituted into resolved stream URLs. `None` disables
    /// substitution and serves the provider-resolved URL as-is.
    pub target_host: Option<String>,

    /// Client identification sent on upstream requests.
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            providers: DEFAULT_PROVIDERS
                .iter()
                .map(|p| Url::parse(p).expect("default provider URL is valid"))
                .collect(),
            provider_timeout: Duration::from_millis(5000),
            fetch_timeout: Duration::from_millis(10_000),
            max_redirects: 5,
            target_host: Some(DEFAULT_TARGET_HOST.to_string()),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Config {
    /// Build a configuration from the defaults plus environment overrides.
    ///
    /// `PROVIDERS` is a comma-separated endpoint list; `TARGET_HOST` replaces
    /// the substitution host, with an empty value disabling substitution.
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Ok(list) = std::env::var("PROVIDERS") {
            config.providers = parse_provider_list(&list)?;
        }

        if let Ok(host) = std::env::var("TARGET_HOST") {
            let host = host.trim().to_string();
            config.target_host = (!host.is_empty()).then_some(host);
        }

        Ok(config)
    }
}

/// Parse a comma-separated provider endpoint list.
pub fn parse_provider_list(list: &str) -> anyhow::Result<Vec<Url>> {
    let providers = list
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| Url::parse(s).with_context(|| format!("invalid provider URL: {s}")))
        .collect::<anyhow::Result<Vec<_>>>()?;

    anyhow::ensure!(!providers.is_empty(), "provider list is empty");
    Ok(providers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(!config.providers.is_empty());
        assert_eq!(config.provider_timeout, Duration::from_millis(5000));
        assert_eq!(config.fetch_timeout, Duration::from_millis(10_000));
        assert_eq!(config.max_redirects, 5);
        assert_eq!(config.target_host.as_deref(), Some(DEFAULT_TARGET_HOST));
    }

    #[test]
    fn test_parse_provider_list() {
        let providers =
            parse_provider_list("https://a.example, https://b.example/api ,").unwrap();
        assert_eq!(providers.len(), 2);
        assert_eq!(providers[0].as_str(), "https://a.example/");
        assert_eq!(providers[1].as_str(), "https://b.example/api");
    }

    #[test]
    fn test_parse_provider_list_rejects_garbage() {
        assert!(parse_provider_list("not a url").is_err());
        assert!(parse_provider_list("").is_err());
        assert!(parse_provider_list(" , ,").is_err());
    }
}
