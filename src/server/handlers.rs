pub mod manifest;
pub mod stream_url;

pub use manifest::handle_manifest;
pub use stream_url::handle_stream_url;

use super::state::AppState;
use crate::address;

/// Apply the configured CDN host substitution to a resolved stream URL.
pub(crate) fn apply_target_host(state: &AppState, url: &str) -> String {
    match state.config.target_host.as_deref() {
        Some(host) => address::substitute_host(url, host),
        None => url.to_string(),
    }
}
