//! Menu taxonomy document

use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Ordered menu taxonomy as published by the backend
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuDocument {
    pub entries: Vec<MenuEntry>,
}

/// One top-level menu
#[derive(Debug, Clone, PartialEq)]
pub struct MenuEntry {
    pub name: String,
    /// Group name → group, in document order
    pub groups: IndexMap<String, GroupEntry>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupEntry {
    /// href → item, in document order
    pub items: IndexMap<String, MenuItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuItem {
    pub name: String,
}

impl MenuDocument {
    /// Ingest the raw menu JSON.
    ///
    /// Never fails: anything that is not shaped like a menu is skipped, so a
    /// backend that adds or drops fields degrades to a smaller menu.
    pub fn from_json(value: &Value) -> Self {
        let Some(entries) = value.as_array() else {
            tracing::warn!("Menu document is not an array, rendering empty menu");
            return Self::default();
        };

        let entries = entries
            .iter()
            .filter_map(|entry| {
                let parsed = MenuEntry::from_json(entry);
                if parsed.is_none() {
                    tracing::debug!("Skipping malformed menu entry");
                }
                parsed
            })
            .collect();
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl MenuEntry {
    fn from_json(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let name = object.get("name")?.as_str()?.to_string();

        // Current backends nest groups under `properties`; accept both shapes.
        let groups = object
            .get("groups")
            .and_then(Value::as_object)
            .or_else(|| {
                object
                    .get("properties")
                    .and_then(|p| p.get("groups"))
                    .and_then(Value::as_object)
            })
            .map(parse_groups)
            .unwrap_or_default();

        Some(Self { name, groups })
    }
}

fn parse_groups(groups: &Map<String, Value>) -> IndexMap<String, GroupEntry> {
    groups
        .iter()
        .map(|(name, group)| {
            let items = group
                .get("items")
                .and_then(Value::as_object)
                .map(parse_items)
                .unwrap_or_default();
            (name.clone(), GroupEntry { items })
        })
        .collect()
}

fn parse_items(items: &Map<String, Value>) -> IndexMap<String, MenuItem> {
    items
        .iter()
        .map(|(href, item)| {
            let name = item
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or(href)
                .to_string();
            (href.clone(), MenuItem { name })
        })
        .collect()
}
