//! HTML text escaping and the trusted-markup boundary

use serde::Serialize;
use std::fmt;

/// Escape text for inclusion in HTML element content or quoted attributes
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
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
    out
}

/// Pre-rendered markup produced by the backend or a plugin.
///
/// `Markup` is spliced into pages verbatim and is never escaped. Whoever
/// produces it (the backend view or the plugin) owns sanitization; this crate
/// only transports it. Values read from resource objects must never be
/// wrapped in `Markup`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Markup(String);

impl Markup {
    /// Wrap a trusted markup string
    pub fn trusted(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<b class="x">Tom & 'Jerry'</b>"#),
            "&lt;b class=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_markup_is_verbatim() {
        let markup = Markup::trusted("<div class=\"plugin\">&nbsp;</div>");
        assert_eq!(markup.to_string(), "<div class=\"plugin\">&nbsp;</div>");
        assert!(!markup.is_empty());
        assert!(Markup::trusted("  \n").is_empty());
    }
}
