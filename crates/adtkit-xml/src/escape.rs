//! Escaping for values interpolated into request bodies.

use std::borrow::Cow;

/// Escapes a value for use inside a double-quoted XML attribute or as
/// element text.
pub fn escape(value: &str) -> Cow<'_, str> {
    if !value.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(value);
    }
    let mut out = String::with_capacity(value.len() + 8);
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_value_is_borrowed() {
        assert!(matches!(escape("Z_TEST"), Cow::Borrowed("Z_TEST")));
    }

    #[test]
    fn test_markup_is_escaped() {
        assert_eq!(escape(r#"a "b" & <c>"#), "a &quot;b&quot; &amp; &lt;c&gt;");
    }
}
