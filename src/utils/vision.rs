//! Vision model detection by model name

const VISION_KEYWORDS: &[&str] = &["vision", "claude-3", "gpt-4o", "gemini-1.5"];

/// Whether the model accepts image parts.
pub fn is_vision_model(model: &str) -> bool {
    let model = model.to_ascii_lowercase();
    let gpt4_turbo = model.contains("gpt-4-turbo") && !model.contains("preview");
    gpt4_turbo || VISION_KEYWORDS.iter().any(|k| model.contains(k))
}
