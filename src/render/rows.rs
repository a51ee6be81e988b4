//! Display rows for one tier of a resource object

use super::format::{format, humanize, RenderedValue};
use super::value::ResourceObject;
use super::visibility::{is_visible, Tier};

/// One labeled row of a detail table
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRow {
    /// Raw field name, used as the row's stable key
    pub key: String,
    /// Humanized label
    pub label: String,
    pub rendered: RenderedValue,
    pub tier: Tier,
}

/// Rows for the fields of `object` visible in `tier`, in field order
pub fn rows(object: &ResourceObject, tier: Tier) -> Vec<FieldRow> {
    object
        .fields()
        .filter(|(key, _)| is_visible(key, tier))
        .map(|(key, value)| FieldRow {
            key: key.to_string(),
            label: humanize(key),
            rendered: format(value),
            tier,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> ResourceObject {
        ResourceObject::from_json(&json!({
            "id": 5,
            "url": "/api/x/5/",
            "display": "X5",
            "name": "X5",
            "status": {"display": "Active"}
        }))
        .unwrap()
    }

    #[test]
    fn test_advanced_rows() {
        let rows = rows(&sample(), Tier::Advanced);
        let summary: Vec<(&str, String)> = rows
            .iter()
            .map(|r| (r.key.as_str(), r.rendered.to_string()))
            .collect();
        assert_eq!(
            summary,
            vec![("name", "X5".to_string()), ("status", "Active".to_string())]
        );
        assert_eq!(rows[1].label, "Status");
    }

    #[test]
    fn test_basic_rows() {
        let rows = rows(&sample(), Tier::Basic);
        let keys: Vec<&str> = rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["id", "url", "display"]);
        assert!(rows.iter().all(|r| r.tier == Tier::Basic));
    }

    #[test]
    fn test_empty_object() {
        let object = ResourceObject::default();
        assert!(rows(&object, Tier::Advanced).is_empty());
    }
}
