use crate::{Config, Error, Result};
use bytes::Bytes;
use reqwest::{Client, redirect};
use url::Url;

/// HTTP client for retrieving manifests from resolved stream URLs.
///
/// Configured separately from the resolver's client: it follows a bounded
/// number of redirects, applies the overall fetch timeout and sends the
/// fixed client identification header some upstream hosts require.
#[derive(Clone)]
pub struct ManifestFetcher {
    client: Client,
}

impl ManifestFetcher {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::builder()
                .timeout(config.fetch_timeout)
                .redirect(redirect::Policy::limited(config.max_redirects))
                .user_agent(config.user_agent.as_str())
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    /// Fetch a manifest body to completion.
    ///
    /// A body cut short by a network error or timeout surfaces as an error
    /// rather than as truncated data.
    pub async fn fetch(&self, url: &Url) -> Result<Bytes> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(Error::FetchFailed {
                url: url.to_string(),
                reason: format!("HTTP {}", status),
            });
        }

        Ok(response.bytes().await?)
    }

    /// Fetch a manifest and return it as text.
    pub async fn fetch_text(&self, url: &Url) -> Result<String> {
        let bytes = self.fetch(url).await?;
        String::from_utf8(bytes.to_vec()).map_err(|e| Error::FetchFailed {
            url: url.to_string(),
            reason: format!("Invalid UTF-8: {}", e),
        })
    }
}
