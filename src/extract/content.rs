//! URL extraction from structured content fields

use crate::model::FieldValue;
use regex::Regex;
use std::sync::LazyLock;

/// Absolute http(s) URL inside free text: runs until whitespace, a quote or `<`
static URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)https?://[^\s"<]+"#).expect("valid URL pattern"));

/// Collects every absolute URL found in the text leaves of a field value
///
/// Lists and maps are walked recursively, map entries in stored order. Numbers, booleans
/// and nulls contribute nothing. Duplicates are kept.
pub fn extract_field_urls(value: &FieldValue) -> Vec<String> {
    let mut urls = Vec::new();
    collect(value, &mut urls);
    urls
}

/// Finds every URL in a single string
pub fn extract_text_urls(text: &str) -> Vec<String> {
    URL_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

fn collect(value: &FieldValue, urls: &mut Vec<String>) {
    match value {
        FieldValue::Text(text) => urls.extend(extract_text_urls(text)),
        FieldValue::List(items) => {
            for item in items {
                collect(item, urls);
            }
        }
        FieldValue::Map(entries) => {
            for (_, item) in entries {
                collect(item, urls);
            }
        }
        FieldValue::Null | FieldValue::Bool(_) | FieldValue::Number(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_urls_stop_at_delimiters() {
        let text = concat!(
            "See https://a.example/x and ",
            r#"<a href="http://b.example/y">b</a><br>HTTPS://C.example/z"#
        );
        assert_eq!(
            extract_text_urls(text),
            vec!["https://a.example/x", "http://b.example/y", "HTTPS://C.example/z"]
        );
    }

    #[test]
    fn test_no_urls() {
        assert!(extract_text_urls("plain text, www.example.com, ftp://x").is_empty());
    }

    #[test]
    fn test_nested_traversal_order() {
        let value = FieldValue::map([
            ("body", FieldValue::text("intro https://one.example")),
            (
                "blocks",
                FieldValue::List(vec![
                    FieldValue::map([("link", FieldValue::text("https://two.example/"))]),
                    FieldValue::Number(4.0),
                    FieldValue::Bool(true),
                    FieldValue::Null,
                    FieldValue::List(vec![FieldValue::text("https://three.example")]),
                ]),
            ),
            ("footer", FieldValue::text("https://one.example")),
        ]);

        assert_eq!(
            extract_field_urls(&value),
            vec![
                "https://one.example",
                "https://two.example/",
                "https://three.example",
                "https://one.example",
            ]
        );
    }

    #[test]
    fn test_scalars_yield_nothing() {
        assert!(extract_field_urls(&FieldValue::Null).is_empty());
        assert!(extract_field_urls(&FieldValue::Number(1.0)).is_empty());
    }
}
