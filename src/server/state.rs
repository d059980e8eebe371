use crate::{Config, fetch::ManifestFetcher, resolve::Resolver};
use std::sync::Arc;

/// Shared application state.
///
/// The only state shared between requests: read-only configuration and the
/// two pre-built HTTP clients.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Resolver,
    pub fetcher: ManifestFetcher,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            resolver: Resolver::new(&config),
            fetcher: ManifestFetcher::new(&config),
            config: Arc::new(config),
        }
    }
}
