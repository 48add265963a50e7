//! Formatting of error bodies for display as chat text

/// Render a response body for humans: JSON is pretty-printed inside a
/// fenced `json` block, anything else is returned as-is.
pub fn pretty_object(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.starts_with("```json") {
        return trimmed.to_string();
    }
    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(value) if !is_empty_object(&value) => {
            let pretty = serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string());
            ["```json", pretty.as_str(), "```"].join("\n")
        }
        _ => body.to_string(),
    }
}

fn is_empty_object(value: &serde_json::Value) -> bool {
    value.as_object().is_some_and(|o| o.is_empty())
}
