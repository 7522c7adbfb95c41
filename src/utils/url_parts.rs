/// Replaces every `{name}` placeholder in `path` with `value`.
pub fn substitute_path_parameter(path: &str, name: &str, value: &str) -> String {
    let placeholder = format!("{{{}}}", name);
    path.replace(&placeholder, value)
}

/// Appends `name=value` unescaped; the separator depends on whether `path`
/// already carries a `?`.
pub fn append_query_parameter(path: &str, name: &str, value: &str) -> String {
    let separator = if path.contains('?') { '&' } else { '?' };
    format!("{}{}{}={}", path, separator, name, value)
}

pub fn append_form_parameter(body: Option<String>, name: &str, value: &str) -> String {
    match body {
        None => format!("{}={}", name, value),
        Some(mut existing) => {
            existing.push('&');
            existing.push_str(name);
            existing.push('=');
            existing.push_str(value);
            existing
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitute_replaces_all_occurrences() {
        assert_eq!(
            substitute_path_parameter("/api/items/{id}/children/{id}", "id", "7"),
            "/api/items/7/children/7"
        );
    }

    #[test]
    fn substitute_leaves_other_placeholders() {
        assert_eq!(
            substitute_path_parameter("/api/{a}/{ab}", "a", "x"),
            "/api/x/{ab}"
        );
    }

    #[test]
    fn append_query_picks_separator_from_existing_path() {
        let once = append_query_parameter("/api/items", "a", "1");
        assert_eq!(once, "/api/items?a=1");
        assert_eq!(append_query_parameter(&once, "b", "2"), "/api/items?a=1&b=2");
        assert_eq!(
            append_query_parameter("/api/items?x=1", "a", "2"),
            "/api/items?x=1&a=2"
        );
    }

    #[test]
    fn append_form_joins_with_ampersand() {
        let body = append_form_parameter(None, "a", "1");
        assert_eq!(append_form_parameter(Some(body), "b", "2"), "a=1&b=2");
    }
}
