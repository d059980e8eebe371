use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use url::Url;

use crate::{Error, Result, manifest, server::state::AppState};

use super::apply_target_host;

/// Handle GET /get/{id} requests.
///
/// Resolves the identifier, fetches the manifest from the final URL and
/// serves it with every relative reference made absolute.
pub async fn handle_manifest(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response> {
    tracing::info!(%id, "manifest request");

    // The player endpoint reports resolution exhaustion as a server error,
    // not as a 404.
    let resolved = state.resolver.resolve(&id).await.map_err(|e| match e {
        Error::StreamNotFound(id) => {
            Error::Internal(format!("no provider could resolve stream: {id}"))
        }
        other => other,
    })?;

    let final_url = Url::parse(&apply_target_host(&state, resolved.url.as_str()))?;

    let content = state.fetcher.fetch_text(&final_url).await?;

    // Relative references resolve against the URL the manifest was actually
    // fetched from, after host substitution.
    let rewritten = manifest::rewrite(&content, &final_url);

    tracing::debug!("Rewritten manifest:\n{}", rewritten);

    Ok((
        [(header::CONTENT_TYPE, "application/vnd.apple.mpegurl")],
        rewritten,
    )
        .into_response())
}
