//! Menu tree assembly

use super::document::MenuDocument;

/// Top-level dropdown
#[derive(Debug, Clone, PartialEq)]
pub struct MenuNode {
    /// Stable key derived from the entry name
    pub key: String,
    pub label: String,
    pub groups: Vec<MenuGroupNode>,
}

/// Group header and the block it introduces
#[derive(Debug, Clone, PartialEq)]
pub struct MenuGroupNode {
    /// `"{entry}/{group}"`
    pub key: String,
    pub header: String,
    /// Items followed by a terminating divider
    pub children: Vec<MenuChild>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MenuChild {
    Item(MenuItemNode),
    Divider,
}

/// Navigable link
#[derive(Debug, Clone, PartialEq)]
pub struct MenuItemNode {
    /// The href, which is unique within its group
    pub key: String,
    pub href: String,
    pub label: String,
}

/// Project the menu document into navigation nodes, order untouched
pub fn build(document: &MenuDocument) -> Vec<MenuNode> {
    document
        .entries
        .iter()
        .map(|entry| MenuNode {
            key: entry.name.clone(),
            label: entry.name.clone(),
            groups: entry
                .groups
                .iter()
                .map(|(header, group)| {
                    let mut children: Vec<MenuChild> = group
                        .items
                        .iter()
                        .map(|(href, item)| {
                            MenuChild::Item(MenuItemNode {
                                key: href.clone(),
                                href: href.clone(),
                                label: item.name.clone(),
                            })
                        })
                        .collect();
                    children.push(MenuChild::Divider);

                    MenuGroupNode {
                        key: format!("{}/{}", entry.name, header),
                        header: header.clone(),
                        children,
                    }
                })
                .collect(),
        })
        .collect()
}
