//! URL helpers

/// Normalize a user-supplied endpoint: trailing slashes are stripped and
/// `https://` is prepended unless the value already starts with `http`.
pub fn normalize_base_url(endpoint: &str) -> String {
    let trimmed = endpoint.trim().trim_end_matches('/');
    if trimmed.starts_with("http") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

/// Join a base URL and a relative path with exactly one `/`.
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
