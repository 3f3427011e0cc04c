/// Resolve a URL returned by the API against `base`.
///
/// Empty input stays empty, absolute `http(s)` URLs are returned as-is,
/// anything else is treated as relative to `base`.
pub fn resolve_url(base: &str, url: &str) -> String {
    if url.is_empty() {
        return String::new();
    }
    if url.starts_with("http") {
        return url.to_string();
    }
    format!("{}{}", base, url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_url() {
        let base = "https://blog.example";
        assert_eq!(resolve_url(base, ""), "");
        assert_eq!(resolve_url(base, "https://cdn.example/a.png"), "https://cdn.example/a.png");
        assert_eq!(resolve_url(base, "http://cdn.example/a.png"), "http://cdn.example/a.png");
        assert_eq!(resolve_url(base, "/upload/a.png"), "https://blog.example/upload/a.png");
    }
}
