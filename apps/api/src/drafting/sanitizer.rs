//! Response sanitizer: strips code fences and isolates the likeliest JSON payload.
//!
//! Never fails: text without braces is handed on unchanged for the text extractor.

/// Strips ```json ... ``` or ``` ... ``` fences, then narrows to the span between
/// the first `{` and the last `}` when both exist in that order.
pub fn sanitize_response(raw: &str) -> &str {
    let text = strip_code_fences(raw);

    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if end > start => &text[start..=end],
        _ => text,
    }
}

fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    let text = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
        .unwrap_or(text);
    text.strip_suffix("```").unwrap_or(text).trim()
}
