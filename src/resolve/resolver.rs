use crate::{Config, Error, Result};
use reqwest::Client;
use url::Url;

use super::extract::{self, ExtractRule};

/// The stream a provider resolved, with its provenance.
///
/// Lives for the duration of one request; never persisted.
#[derive(Debug, Clone)]
pub struct ResolvedStream {
    pub url: Url,
    pub provider: Url,
}

/// Resolves a stream identifier against an ordered list of provider
/// endpoints, returning the first success.
///
/// Attempts are strictly sequential and each is bounded by the per-attempt
/// timeout baked into the client. The resolver keeps no state across
/// requests: no cache, no circuit-breaking of recently failed endpoints.
#[derive(Clone)]
pub struct Resolver {
    client: Client,
    providers: Vec<Url>,
}

impl Resolver {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::builder()
                .timeout(config.provider_timeout)
                .user_agent(config.user_agent.as_str())
                .build()
                .expect("Failed to create HTTP client"),
            providers: config.providers.clone(),
        }
    }

    /// Resolve an identifier to a stream URL, trying providers in order.
    ///
    /// Network errors, timeouts, bad statuses, malformed bodies and missing
    /// formats all fold into the same per-endpoint failure signal; they
    /// differ only in the diagnostic logged. Only exhaustion of the whole
    /// list surfaces to the caller.
    pub async fn resolve(&self, id: &str) -> Result<ResolvedStream> {
        if id.trim().is_empty() {
            return Err(Error::EmptyStreamId);
        }

        let rules = extract::default_rules();

        for provider in &self.providers {
            match self.try_provider(provider, id, &rules).await {
                Ok(stream) => {
                    tracing::info!(provider = %stream.provider, url = %stream.url, "resolved stream");
                    return Ok(stream);
                }
                Err(e) => {
                    tracing::debug!(provider = %provider, error = %e, "provider attempt failed");
                }
            }
        }

        Err(Error::StreamNotFound(id.to_string()))
    }

    /// One bounded attempt against a single provider endpoint.
    async fn try_provider(
        &self,
        provider: &Url,
        id: &str,
        rules: &[Box<dyn ExtractRule>],
    ) -> Result<ResolvedStream> {
        let response = self
            .client
            .get(query_url(provider, id)?)
            .send()
            .await
            .map_err(|e| Error::ProviderUnreachable {
                provider: provider.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::ProviderUnreachable {
                provider: provider.to_string(),
                reason: format!("HTTP {}", status),
            });
        }

        let body: serde_json::Value =
            response.json().await.map_err(|e| Error::ProviderMalformed {
                provider: provider.to_string(),
                reason: e.to_string(),
            })?;

        let raw = extract::extract_stream_url(&body, rules).ok_or_else(|| {
            Error::ProviderNoFormat {
                provider: provider.to_string(),
            }
        })?;

        // Providers may report the URL relative to their own base.
        let url = match Url::parse(&raw) {
            Ok(url) => url,
            Err(_) => provider.join(&raw).map_err(|_| Error::ProviderMalformed {
                provider: provider.to_string(),
                reason: format!("unresolvable stream url: {}", raw),
            })?,
        };

        Ok(ResolvedStream {
            url,
            provider: provider.clone(),
        })
    }
}

/// Build the metadata query URL for one provider.
fn query_url(provider: &Url, id: &str) -> Result<Url> {
    let mut url = provider.clone();
    url.path_segments_mut()
        .map_err(|_| Error::InvalidUrl(provider.to_string()))?
        .pop_if_empty()
        .extend(["streams", id]);
    Ok(url)
}
