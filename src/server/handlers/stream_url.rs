use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};

use crate::{Result, server::state::AppState};

use super::apply_target_host;

/// Handle GET /get/url/{id} requests.
///
/// Returns the final absolute stream URL as plain text without fetching the
/// manifest, for players that talk to the CDN directly.
pub async fn handle_stream_url(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response> {
    tracing::info!(%id, "stream url request");

    let resolved = state.resolver.resolve(&id).await?;
    let final_url = apply_target_host(&state, resolved.url.as_str());

    Ok(([(header::CONTENT_TYPE, "text/plain")], final_url).into_response())
}
