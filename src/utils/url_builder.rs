use urlencoding::encode;

/// Build an absolute URL from a base URL and a path
pub fn absolute_url(base_url: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    let base = base_url.trim_end_matches('/');
    let trimmed = path.trim_start_matches('/');
    if trimmed.is_empty() {
        return base.to_string();
    }
    format!("{}/{}", base, trimmed)
}

/// Percent-encode a user supplied value so it stays a single path segment
pub fn path_segment(raw: &str) -> String {
    encode(raw.trim()).into_owned()
}
