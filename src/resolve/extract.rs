use serde::Deserialize;
use serde_json::Value;

/// One deliverable rendition as reported by a provider.
///
/// Providers disagree on field names; the alias covers the schemas seen in
/// the wild. A descriptor's URL may be relative to the provider base.
#[derive(Debug, Clone, Deserialize)]
pub struct FormatDescriptor {
    /// Container/type tag, e.g. `hls` or `video/mp4`.
    #[serde(default, alias = "type")]
    pub format: Option<String>,

    /// Human-readable quality label, e.g. `720p`.
    #[serde(default)]
    pub quality: Option<String>,

    #[serde(default)]
    pub url: Option<String>,
}

impl FormatDescriptor {
    /// Whether this descriptor delivers the given streaming format, by type
    /// tag or by its quality label mentioning the format name.
    fn matches(&self, format: &str) -> bool {
        self.format
            .as_deref()
            .is_some_and(|tag| tag.to_ascii_lowercase().contains(format))
            || self
                .quality
                .as_deref()
                .is_some_and(|q| q.to_ascii_lowercase().contains(format))
    }
}

/// Strategy for extracting a stream URL from one provider response schema.
///
/// Supporting an additional provider means adding or extending a rule, never
/// touching the resolver's control flow.
pub trait ExtractRule: Send + Sync {
    fn extract(&self, body: &Value) -> Option<String>;
}

/// Scans descriptor collections for an entry matching the target format.
pub struct FormatListRule {
    collections: &'static [&'static str],
    format: &'static str,
}

impl ExtractRule for FormatListRule {
    fn extract(&self, body: &Value) -> Option<String> {
        for collection in self.collections {
            let Some(entries) = body.get(collection).and_then(Value::as_array) else {
                continue;
            };

            for entry in entries {
                let Ok(descriptor) = serde_json::from_value::<FormatDescriptor>(entry.clone())
                else {
                    continue;
                };

                if descriptor.matches(self.format)
                    && let Some(url) = descriptor.url
                {
                    return Some(url);
                }
            }
        }

        None
    }
}

/// Falls back to a top-level direct stream URL field.
pub struct DirectUrlRule {
    fields: &'static [&'static str],
}

impl ExtractRule for DirectUrlRule {
    fn extract(&self, body: &Value) -> Option<String> {
        self.fields.iter().find_map(|field| {
            body.get(*field)
                .and_then(Value::as_str)
                .filter(|url| !url.is_empty())
                .map(str::to_string)
        })
    }
}

/// Default extraction strategies, tried in order: a matching descriptor
/// wins over the top-level direct-URL fallback.
pub fn default_rules() -> Vec<Box<dyn ExtractRule>> {
    vec![
        Box::new(FormatListRule {
            collections: &[
                "videoStreams",
                "audioStreams",
                "adaptiveFormats",
                "formatStreams",
            ],
            format: "hls",
        }),
        Box::new(DirectUrlRule {
            fields: &["hls", "hlsUrl"],
        }),
    ]
}

/// Run the rule sequence against a provider response body.
pub fn extract_stream_url(body: &Value, rules: &[Box<dyn ExtractRule>]) -> Option<String> {
    rules.iter().find_map(|rule| rule.extract(body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn extract(body: &Value) -> Option<String> {
        extract_stream_url(body, &default_rules())
    }

    #[test]
    fn test_matches_descriptor_by_type_tag() {
        let body = json!({
            "videoStreams": [
                { "format": "MPEG_4", "quality": "720p", "url": "https://a.example/v.mp4" },
                { "format": "hls", "quality": "1080p", "url": "https://a.example/v.m3u8" },
            ]
        });
        assert_eq!(extract(&body).as_deref(), Some("https://a.example/v.m3u8"));
    }

    #[test]
    fn test_matches_descriptor_by_quality_label() {
        let body = json!({
            "adaptiveFormats": [
                { "type": "video/mp4; codecs=\"avc1\"", "quality": "HLS (adaptive)", "url": "/hls/abc.m3u8" },
            ]
        });
        assert_eq!(extract(&body).as_deref(), Some("/hls/abc.m3u8"));
    }

    #[test]
    fn test_descriptor_wins_over_direct_field() {
        let body = json!({
            "formatStreams": [
                { "type": "application/x-mpegURL", "url": "https://a.example/list.m3u8" },
            ],
            "hls": "https://a.example/direct.m3u8",
        });
        assert_eq!(extract(&body).as_deref(), Some("https://a.example/list.m3u8"));
    }

    #[test]
    fn test_falls_back_to_direct_field() {
        let body = json!({
            "videoStreams": [
                { "format": "MPEG_4", "quality": "720p", "url": "https://a.example/v.mp4" },
            ],
            "hls": "https://a.example/direct.m3u8",
        });
        assert_eq!(extract(&body).as_deref(), Some("https://a.example/direct.m3u8"));

        let body = json!({ "hlsUrl": "https://a.example/other.m3u8" });
        assert_eq!(extract(&body).as_deref(), Some("https://a.example/other.m3u8"));
    }

    #[test]
    fn test_no_usable_url() {
        assert_eq!(extract(&json!({})), None);
        assert_eq!(extract(&json!({ "hls": "" })), None);
        assert_eq!(
            extract(&json!({ "videoStreams": [ { "format": "hls" } ] })),
            None
        );
        assert_eq!(
            extract(&json!({ "videoStreams": "not-a-list", "hls": 42 })),
            None
        );
    }
}
