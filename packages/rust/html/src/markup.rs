//! Shared markup helpers: escaping, the document shell, type badges.

use std::borrow::Cow;
use std::fmt::{self, Write};

/// Escape text for use in element content and quoted attribute values.
pub fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// `Dark Ice` → `dark-ice`, for class names.
pub(crate) fn slug(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '-')
        .collect()
}

/// Zero-padded display number, e.g. `#007`.
pub(crate) fn number(index: u32) -> String {
    format!("#{index:03}")
}

/// Write a complete document around `body`.
pub(crate) fn document(
    out: &mut String,
    title: &str,
    body: impl FnOnce(&mut String) -> fmt::Result,
) -> fmt::Result {
    writeln!(out, "<!DOCTYPE html>")?;
    writeln!(out, "<html lang=\"en\">")?;
    writeln!(out, "<head>")?;
    writeln!(out, "  <meta charset=\"utf-8\">")?;
    writeln!(out, "  <title>{}</title>", escape(title))?;
    writeln!(out, "  <link rel=\"stylesheet\" href=\"{}\">", crate::STYLESHEET_FILE)?;
    writeln!(out, "</head>")?;
    writeln!(out, "<body>")?;
    body(out)?;
    writeln!(out, "</body>")?;
    writeln!(out, "</html>")
}

/// Write a `<ul class="types">` badge list.
pub(crate) fn type_badges(out: &mut String, indent: &str, types: &[String]) -> fmt::Result {
    writeln!(out, "{indent}<ul class=\"types\">")?;
    for ty in types {
        writeln!(
            out,
            "{indent}  <li class=\"type type-{}\">{}</li>",
            slug(ty),
            escape(ty)
        )?;
    }
    writeln!(out, "{indent}</ul>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_special_characters() {
        assert_eq!(escape("Mr. Mime"), "Mr. Mime");
        assert!(matches!(escape("Mr. Mime"), Cow::Borrowed(_)));
        assert_eq!(
            escape("<b>\"Farfetch'd\" & co</b>"),
            "&lt;b&gt;&quot;Farfetch&#39;d&quot; &amp; co&lt;/b&gt;"
        );
    }

    #[test]
    fn slug_for_class_names() {
        assert_eq!(slug("Grass"), "grass");
        assert_eq!(slug("Dark  Ice"), "dark-ice");
        assert_eq!(slug("???"), "");
    }

    #[test]
    fn number_is_zero_padded() {
        assert_eq!(number(7), "#007");
        assert_eq!(number(1024), "#1024");
    }
}
