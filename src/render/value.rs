//! Field values classified once at ingestion

use indexmap::IndexMap;
use serde_json::Value;

/// The display-relevant shape of one field value.
///
/// Built once from the raw JSON so that formatting never has to inspect
/// runtime types again.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// JSON `null` or the empty string
    Null,
    /// String or number, kept as its literal text
    Scalar(String),
    /// Link to another resource (`{display, url, ...}`)
    Reference { display: String, url: Option<String> },
    /// Ordered sequence
    List(Vec<FieldValue>),
    /// Boolean flag
    Bool(bool),
}

impl FieldValue {
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => FieldValue::Null,
            Value::String(s) if s.is_empty() => FieldValue::Null,
            Value::String(s) => FieldValue::Scalar(s.clone()),
            Value::Number(n) => FieldValue::Scalar(n.to_string()),
            Value::Bool(b) => FieldValue::Bool(*b),
            Value::Array(items) => FieldValue::List(items.iter().map(Self::from_json).collect()),
            Value::Object(map) => match map.get("display") {
                Some(display) => FieldValue::Reference {
                    display: literal(display),
                    url: map.get("url").and_then(Value::as_str).map(str::to_string),
                },
                // Objects without a display label have no natural rendering;
                // show their compact JSON instead of dropping them.
                None => FieldValue::Scalar(value.to_string()),
            },
        }
    }

    /// Literal text, if this is a scalar
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            FieldValue::Scalar(s) => Some(s),
            _ => None,
        }
    }
}

fn literal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// One backend-managed entity, fields kept in document order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceObject {
    fields: IndexMap<String, FieldValue>,
}

impl ResourceObject {
    /// Ingest a JSON document. Returns `None` unless it is a JSON object.
    pub fn from_json(value: &Value) -> Option<Self> {
        let map = value.as_object()?;
        let fields = map
            .iter()
            .map(|(key, value)| (key.clone(), FieldValue::from_json(value)))
            .collect();
        Some(Self { fields })
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// Fields in document order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn scalar(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(FieldValue::as_scalar)
    }

    pub fn name(&self) -> Option<&str> {
        self.scalar("name")
    }

    pub fn display(&self) -> Option<&str> {
        self.scalar("display")
    }

    pub fn slug(&self) -> Option<&str> {
        self.scalar("slug")
    }

    pub fn url(&self) -> Option<&str> {
        self.scalar("url")
    }

    pub fn created(&self) -> Option<&str> {
        self.scalar("created")
    }

    pub fn last_updated(&self) -> Option<&str> {
        self.scalar("last_updated")
    }

    /// Heading for the detail page: `name`, then `display`
    pub fn title(&self) -> &str {
        self.name().or_else(|| self.display()).unwrap_or_default()
    }
}
