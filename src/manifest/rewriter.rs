use super::classifier::{LineClassifier, LineType};
use url::Url;

/// Rewrite every relative reference in an HLS manifest into an absolute URL.
///
/// `source_url` is the URL the manifest was fetched from; relative references
/// resolve against it the way a browser resolves them against a `<base>`.
/// Line count and order are preserved exactly: directives and blank lines
/// pass through untouched, and a reference that cannot be resolved is kept
/// as-is rather than dropped.
pub fn rewrite(manifest: &str, source_url: &Url) -> String {
    let mut output = manifest
        .lines()
        .map(|line| rewrite_line(line, source_url))
        .collect::<Vec<_>>()
        .join("\n");

    if manifest.ends_with('\n') {
        output.push('\n');
    }

    output
}

fn rewrite_line(line: &str, source_url: &Url) -> String {
    if LineClassifier::classify(line) != LineType::Reference {
        return line.to_string();
    }

    let reference = line.trim();
    if is_absolute(reference) {
        return line.to_string();
    }

    match source_url.join(reference) {
        Ok(resolved) => resolved.to_string(),
        Err(e) => {
            tracing::debug!(reference, error = %e, "keeping unresolvable manifest line");
            line.to_string()
        }
    }
}

/// References with a scheme or a protocol-relative prefix need no rewriting.
fn is_absolute(reference: &str) -> bool {
    reference.starts_with("http://")
        || reference.starts_with("https://")
        || reference.starts_with("//")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source_url() -> Url {
        Url::parse("https://host/path/master.m3u8").unwrap()
    }

    #[test]
    fn test_rewrites_relative_references_only() {
        let input = "#EXTM3U\nseg0.ts\nhttps://cdn.x/seg1.ts\n#EXT-X-ENDLIST";
        let output = rewrite(input, &source_url());
        assert_eq!(
            output,
            "#EXTM3U\nhttps://host/path/seg0.ts\nhttps://cdn.x/seg1.ts\n#EXT-X-ENDLIST"
        );
    }

    #[test]
    fn test_protocol_relative_reference_passes_through() {
        let output = rewrite("//cdn.x/seg1.ts", &source_url());
        assert_eq!(output, "//cdn.x/seg1.ts");
    }

    #[test]
    fn test_parent_directory_reference() {
        let output = rewrite("../audio/seg.aac", &source_url());
        assert_eq!(output, "https://host/audio/seg.aac");
    }

    #[test]
    fn test_preserves_line_count() {
        let input = "#EXTM3U\n\nseg0.ts\n\n#EXT-X-ENDLIST\n";
        let output = rewrite(input, &source_url());
        assert_eq!(output.lines().count(), input.lines().count());
        assert!(output.ends_with('\n'));
    }

    #[test]
    fn test_idempotent_on_already_absolute_references() {
        let input = "#EXTM3U\nseg0.ts\nhttps://cdn.x/seg1.ts\n#EXT-X-ENDLIST";
        let url = source_url();
        let once = rewrite(input, &url);
        let twice = rewrite(&once, &url);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_unresolvable_reference_is_preserved() {
        // A cannot-be-a-base source URL makes every relative join fail; the
        // line must survive untouched rather than be dropped or blanked.
        let source = Url::parse("mailto:ops@example.com").unwrap();
        let output = rewrite("#EXTM3U\nseg0.ts", &source);
        assert_eq!(output, "#EXTM3U\nseg0.ts");
    }

    #[test]
    fn test_query_on_reference_survives_resolution() {
        let output = rewrite("seg0.ts?token=abc", &source_url());
        assert_eq!(output, "https://host/path/seg0.ts?token=abc");
    }
}
