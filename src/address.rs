use url::Url;

/// Replace the host of a resolved stream URL with a configured CDN host.
///
/// The directly-resolved URL may point at a host that is rate-limited or
/// blocked for direct client access while an equivalent CDN host serves the
/// same content. The scheme is forced to https; path and query are kept
/// intact. Returns the input unchanged if it cannot be parsed or rewritten.
pub fn substitute_host(url: &str, target_host: &str) -> String {
    let Ok(mut parsed) = Url::parse(url) else {
        return url.to_string();
    };

    // Tolerate a scheme prefix or trailing path accidentally embedded in the
    // configured target.
    let host = target_host
        .trim_start_matches("https://")
        .trim_start_matches("http://");
    let host = host.split('/').next().unwrap_or(host);

    if host.is_empty() || parsed.set_host(Some(host)).is_err() {
        return url.to_string();
    }
    let _ = parsed.set_scheme("https");

    parsed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitutes_host_preserving_path_and_query() {
        let result = substitute_host(
            "https://r1---sn-abc.googlevideo.com/videoplayback?id=1",
            "manifest.googlevideo.com",
        );
        assert_eq!(
            result,
            "https://manifest.googlevideo.com/videoplayback?id=1"
        );
    }

    #[test]
    fn test_forces_https() {
        let result = substitute_host("http://origin.example/live/index.m3u8", "cdn.example.com");
        assert_eq!(result, "https://cdn.example.com/live/index.m3u8");
    }

    #[test]
    fn test_strips_scheme_from_target() {
        let result = substitute_host("https://origin.example/a", "https://cdn.example.com/");
        assert_eq!(result, "https://cdn.example.com/a");
    }

    #[test]
    fn test_unparseable_url_passes_through() {
        assert_eq!(substitute_host("not a url", "cdn.example.com"), "not a url");
    }

    #[test]
    fn test_empty_target_passes_through() {
        let url = "https://origin.example/a";
        assert_eq!(substitute_host(url, ""), url);
    }
}
