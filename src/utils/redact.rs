use crate::utils::text::truncate_utf8_prefix;
use once_cell::sync::Lazy;
use serde_json::Value;
use std::collections::HashSet;

const DEFAULT_REDACTION: &str = "[REDACTED]";

static SENSITIVE_HEADER_KEYS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "qradarcsrf",
        "cookie",
        "sec",
        "authorization",
        "proxy-authorization",
    ]
    .into_iter()
    .collect()
});

pub fn is_sensitive_header(name: &str) -> bool {
    SENSITIVE_HEADER_KEYS.contains(name.trim().to_lowercase().as_str())
}

/// Header list as a JSON object suitable for log metadata.
pub fn redact_headers(headers: &[(String, String)]) -> Value {
    let mut out = serde_json::Map::new();
    for (name, value) in headers {
        let shown = if is_sensitive_header(name) {
            DEFAULT_REDACTION.to_string()
        } else {
            value.clone()
        };
        out.insert(name.clone(), Value::String(shown));
    }
    Value::Object(out)
}

pub fn preview_text(value: &str, max_bytes: usize) -> String {
    if value.len() <= max_bytes {
        return value.to_string();
    }
    format!("{}...", truncate_utf8_prefix(value, max_bytes))
}

#[cfg(test)]
mod tests {
    use super::{preview_text, redact_headers};
    use serde_json::Value;

    #[test]
    fn redact_headers_hides_csrf_and_cookie() {
        let headers = vec![
            ("QRadarCSRF".to_string(), "token-value".to_string()),
            ("Cookie".to_string(), "SEC=abc".to_string()),
            ("Content-Type".to_string(), "application/json".to_string()),
        ];
        let out = redact_headers(&headers);
        assert_eq!(out["QRadarCSRF"], Value::String("[REDACTED]".to_string()));
        assert_eq!(out["Cookie"], Value::String("[REDACTED]".to_string()));
        assert_eq!(
            out["Content-Type"],
            Value::String("application/json".to_string())
        );
    }

    #[test]
    fn preview_text_marks_truncation() {
        assert_eq!(preview_text("abcdef", 3), "abc...");
        assert_eq!(preview_text("abc", 3), "abc");
    }
}
