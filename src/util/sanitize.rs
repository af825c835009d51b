//! Free-text sanitization and tolerant JSON access.

use serde_json::Value;

/// Default cap applied to user-supplied text.
pub const DEFAULT_MAX_INPUT_LENGTH: usize = 1000;

/// Escape angle brackets, cap the length and trim surrounding whitespace.
///
/// Text longer than `max_length` characters (after escaping) is cut and
/// suffixed with `...`.
pub fn sanitize_input(text: &str, max_length: usize) -> String {
    let escaped = text.replace('<', "&lt;").replace('>', "&gt;");

    let capped = if escaped.chars().count() > max_length {
        let mut cut: String = escaped.chars().take(max_length).collect();
        cut.push_str("...");
        cut
    } else {
        escaped
    };

    capped.trim().to_string()
}

/// Like [`sanitize_input`], but accepts any JSON value. Non-strings yield "".
pub fn sanitize_value(value: &Value, max_length: usize) -> String {
    match value {
        Value::String(text) => sanitize_input(text, max_length),
        _ => String::new(),
    }
}

/// Look up `key` on a JSON object, falling back to `default` for missing
/// keys and for values that are not objects.
pub fn safe_get(data: &Value, key: &str, default: Value) -> Value {
    data.as_object()
        .and_then(|map| map.get(key))
        .cloned()
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_escapes_markup() {
        let result = sanitize_input("<script>alert('xss')</script>", DEFAULT_MAX_INPUT_LENGTH);
        assert!(!result.contains("<script>"));
        assert!(result.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_length_limit() {
        let long_text = "a".repeat(1500);
        let result = sanitize_input(&long_text, 1000);
        assert_eq!(result.len(), 1003);
        assert!(result.ends_with("..."));
    }

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(sanitize_input("  test  ", DEFAULT_MAX_INPUT_LENGTH), "test");
    }

    #[test]
    fn test_non_string_value() {
        assert_eq!(sanitize_value(&json!(123), DEFAULT_MAX_INPUT_LENGTH), "");
        assert_eq!(sanitize_value(&json!(" <b> "), DEFAULT_MAX_INPUT_LENGTH), "&lt;b&gt;");
    }

    #[test]
    fn test_safe_get() {
        let data = json!({"key": "value"});
        assert_eq!(safe_get(&data, "key", Value::Null), json!("value"));
        assert_eq!(safe_get(&data, "missing", json!(7)), json!(7));
        assert_eq!(safe_get(&json!([1, 2]), "key", json!("d")), json!("d"));
    }
}
