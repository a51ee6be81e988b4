//! Field formatting and label derivation

use super::html::escape;
use super::value::FieldValue;
use std::fmt;

/// Placeholder shown for null or empty values
pub const PLACEHOLDER: &str = "—";

/// Glyph shown for `true`
pub const TRUE_GLYPH: &str = "✅";

/// Glyph shown for `false`
pub const FALSE_GLYPH: &str = "🚫";

/// Display form of one field value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedValue {
    /// Null or empty string
    Placeholder,
    /// Literal scalar or a reference's display label
    Text(String),
    /// Unordered list, one entry per element, in element order
    List(Vec<String>),
    /// Boolean glyph
    Glyph(bool),
}

impl RenderedValue {
    /// HTML for a table cell. Text is escaped; values are data, not markup.
    pub fn to_html(&self) -> String {
        match self {
            RenderedValue::List(items) => {
                let mut html = String::from(r#"<ul class="list-unstyled">"#);
                for item in items {
                    html.push_str("<li>");
                    html.push_str(&escape(item));
                    html.push_str("</li>");
                }
                html.push_str("</ul>");
                html
            }
            other => escape(&other.to_string()),
        }
    }
}

impl fmt::Display for RenderedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderedValue::Placeholder => f.write_str(PLACEHOLDER),
            RenderedValue::Text(text) => f.write_str(text),
            RenderedValue::List(items) => f.write_str(&items.join(", ")),
            RenderedValue::Glyph(true) => f.write_str(TRUE_GLYPH),
            RenderedValue::Glyph(false) => f.write_str(FALSE_GLYPH),
        }
    }
}

/// Render one field value
pub fn format(value: &FieldValue) -> RenderedValue {
    match value {
        FieldValue::Null => RenderedValue::Placeholder,
        FieldValue::List(items) => RenderedValue::List(items.iter().map(inline).collect()),
        FieldValue::Reference { display, .. } => RenderedValue::Text(display.clone()),
        FieldValue::Bool(b) => RenderedValue::Glyph(*b),
        FieldValue::Scalar(s) => RenderedValue::Text(s.clone()),
    }
}

// Single-line text for a list element.
fn inline(value: &FieldValue) -> String {
    match value {
        FieldValue::List(items) => items.iter().map(inline).collect::<Vec<_>>().join(", "),
        other => format(other).to_string(),
    }
}

/// `"rack_group_count"` → `"Rack Group Count"`
pub fn humanize(key: &str) -> String {
    key.split('_')
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
