//! Locates a JSON object literal embedded in an HTML page as a global
//! variable assignment, e.g. `_ROUTER_DATA = {...};` inside a script tag.

/// Global variable the share page assigns its hydration state to.
pub const ROUTER_DATA_MARKER: &str = "_ROUTER_DATA";

/// Find the JSON object assigned to `marker` inside `html`.
///
/// Scans forward from each occurrence of the marker, expecting `=` and an
/// object literal. The end of the object is found by balanced-brace scanning
/// (string- and escape-aware), so semicolons or braces inside string values
/// do not cut the match short.
#[must_use]
pub fn find_embedded_json<'a>(html: &'a str, marker: &str) -> Option<&'a str> {
    let mut from = 0;
    while let Some(rel) = html[from..].find(marker) {
        let after = from + rel + marker.len();
        let rest = html[after..].trim_start();
        if let Some(assigned) = rest.strip_prefix('=') {
            let assigned = assigned.trim_start();
            if assigned.starts_with('{') {
                if let Some(end) = object_end(assigned) {
                    return Some(&assigned[..=end]);
                }
            }
        }
        from = after;
    }
    None
}

/// Byte offset of the `}` that closes the object starting at byte 0.
///
/// Only structural characters outside of string literals count toward the
/// brace depth; these are all ASCII, so byte-wise scanning is safe in UTF-8.
fn object_end(s: &str) -> Option<usize> {
    let mut depth: usize = 0;
    let mut in_string = false;
    let mut escaped = false;

    for (i, b) in s.bytes().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_assignment() {
        let html = r#"<script>window._ROUTER_DATA = {"a": 1};</script>"#;
        assert_eq!(
            find_embedded_json(html, ROUTER_DATA_MARKER),
            Some(r#"{"a": 1}"#)
        );
    }

    #[test]
    fn test_nested_objects() {
        let html = r#"_ROUTER_DATA={"a":{"b":{"c":2}},"d":[{"e":3}]};more"#;
        assert_eq!(
            find_embedded_json(html, ROUTER_DATA_MARKER),
            Some(r#"{"a":{"b":{"c":2}},"d":[{"e":3}]}"#)
        );
    }

    #[test]
    fn test_braces_and_semicolons_inside_strings() {
        // A first-semicolon match would truncate this payload
        let html = r#"_ROUTER_DATA = {"text": "wait; }{ not done", "n": 1};"#;
        assert_eq!(
            find_embedded_json(html, ROUTER_DATA_MARKER),
            Some(r#"{"text": "wait; }{ not done", "n": 1}"#)
        );
    }

    #[test]
    fn test_escaped_quotes_inside_strings() {
        let html = r#"_ROUTER_DATA = {"quote": "she said \"hi}\""};"#;
        assert_eq!(
            find_embedded_json(html, ROUTER_DATA_MARKER),
            Some(r#"{"quote": "she said \"hi}\""}"#)
        );
    }

    #[test]
    fn test_whitespace_around_assignment() {
        let html = "_ROUTER_DATA   =\n  {\"a\": 1};";
        assert_eq!(
            find_embedded_json(html, ROUTER_DATA_MARKER),
            Some("{\"a\": 1}")
        );
    }

    #[test]
    fn test_marker_absent() {
        assert_eq!(find_embedded_json("<html></html>", ROUTER_DATA_MARKER), None);
    }

    #[test]
    fn test_marker_without_assignment() {
        // Marker mentioned in prose, real assignment later in the page
        let html = r#"see _ROUTER_DATA docs ... _ROUTER_DATA = {"a": 1};"#;
        assert_eq!(
            find_embedded_json(html, ROUTER_DATA_MARKER),
            Some(r#"{"a": 1}"#)
        );
    }

    #[test]
    fn test_unterminated_object() {
        let html = r#"_ROUTER_DATA = {"a": {"b": 1}"#;
        assert_eq!(find_embedded_json(html, ROUTER_DATA_MARKER), None);
    }
}
