//! Route table and plugin route registration

use super::component::LazyComponent;
use super::manifest::{is_path_segment, PluginManifest};
use std::sync::Arc;

/// Shared parent of every plugin route
pub const PLUGINS_PREFIX: &str = "/plugins/";

/// Child of [`PLUGINS_PREFIX`] listing installed plugins
pub const INSTALLED_PLUGINS_PATH: &str = "installed-plugins";

/// What a route renders
#[derive(Debug, Clone)]
pub enum RouteTarget {
    /// Landing page
    Home,
    /// Generic list view for `/:app_name/:model_name`
    ListView,
    /// Generic detail view for `/:app_name/:model_name/:id`
    DetailView,
    /// Registry listing
    InstalledPlugins,
    /// Page contributed by a plugin
    Plugin(PluginRoute),
    /// Parent of child routes, renders nothing itself
    Group,
}

/// A mounted plugin page
#[derive(Debug, Clone)]
pub struct PluginRoute {
    pub identifier: String,
    pub title: String,
    pub mount_path: String,
    pub component: Arc<LazyComponent>,
}

#[derive(Debug, Clone)]
pub struct RouteEntry {
    /// Path relative to the parent entry
    pub path: String,
    pub target: RouteTarget,
    pub children: Vec<RouteEntry>,
}

impl RouteEntry {
    fn leaf(path: &str, target: RouteTarget) -> Self {
        Self {
            path: path.to_string(),
            target,
            children: Vec::new(),
        }
    }
}

/// Application route table
#[derive(Debug, Clone)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    /// Built-in routes, before any plugin is registered
    pub fn base() -> Self {
        Self {
            entries: vec![
                RouteEntry::leaf("/", RouteTarget::Home),
                RouteEntry::leaf("/:app_name/:model_name", RouteTarget::ListView),
                RouteEntry::leaf("/:app_name/:model_name/:id", RouteTarget::DetailView),
                RouteEntry {
                    path: PLUGINS_PREFIX.to_string(),
                    target: RouteTarget::Group,
                    children: vec![RouteEntry::leaf(
                        INSTALLED_PLUGINS_PATH,
                        RouteTarget::InstalledPlugins,
                    )],
                },
            ],
        }
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    /// Every routable entry with its absolute path, in table order
    pub fn flatten(&self) -> Vec<(String, &RouteTarget)> {
        let mut out = Vec::new();
        for entry in &self.entries {
            flatten_into(entry, "", &mut out);
        }
        out
    }

    /// Registered plugin routes, in registration order
    pub fn plugins(&self) -> Vec<&PluginRoute> {
        self.entries
            .iter()
            .filter(|e| e.path == PLUGINS_PREFIX)
            .flat_map(|e| e.children.iter())
            .filter_map(|child| match &child.target {
                RouteTarget::Plugin(route) => Some(route),
                _ => None,
            })
            .collect()
    }

    fn plugins_parent(&mut self) -> &mut RouteEntry {
        let idx = match self.entries.iter().position(|e| e.path == PLUGINS_PREFIX) {
            Some(idx) => idx,
            None => {
                self.entries.push(RouteEntry {
                    path: PLUGINS_PREFIX.to_string(),
                    target: RouteTarget::Group,
                    children: Vec::new(),
                });
                self.entries.len() - 1
            }
        };
        &mut self.entries[idx]
    }
}

fn join_path(parent: &str, child: &str) -> String {
    if parent.is_empty() {
        child.to_string()
    } else if parent.ends_with('/') {
        format!("{}{}", parent, child)
    } else {
        format!("{}/{}", parent, child)
    }
}

fn flatten_into<'a>(entry: &'a RouteEntry, parent: &str, out: &mut Vec<(String, &'a RouteTarget)>) {
    let path = join_path(parent, &entry.path);
    if !matches!(entry.target, RouteTarget::Group) {
        out.push((path.clone(), &entry.target));
    }
    for child in &entry.children {
        flatten_into(child, &path, out);
    }
}

/// Mount one route per manifest under `/plugins/`.
///
/// Manifest order is kept. Re-running with manifests that are already
/// registered adds nothing. A manifest whose mount path is invalid or already
/// taken is skipped. Loaders are wrapped, not invoked.
pub fn augment_routes(mut base: RouteTable, manifests: &[PluginManifest]) -> RouteTable {
    let parent = base.plugins_parent();

    for manifest in manifests {
        let already_registered = parent.children.iter().any(|child| {
            matches!(&child.target, RouteTarget::Plugin(route) if route.identifier == manifest.identifier)
        });
        if already_registered {
            tracing::debug!(plugin = %manifest.identifier, "Plugin route already registered");
            continue;
        }

        if !is_path_segment(&manifest.mount_path) {
            tracing::warn!(
                plugin = %manifest.identifier,
                mount_path = %manifest.mount_path,
                "Invalid plugin mount path, skipping"
            );
            continue;
        }

        if parent.children.iter().any(|child| child.path == manifest.mount_path) {
            tracing::warn!(
                plugin = %manifest.identifier,
                mount_path = %manifest.mount_path,
                "Plugin mount path already taken, skipping"
            );
            continue;
        }

        tracing::info!(
            plugin = %manifest.identifier,
            path = %join_path(PLUGINS_PREFIX, &manifest.mount_path),
            "Registered plugin route"
        );
        parent.children.push(RouteEntry::leaf(
            &manifest.mount_path,
            RouteTarget::Plugin(PluginRoute {
                identifier: manifest.identifier.clone(),
                title: manifest.title.clone(),
                mount_path: manifest.mount_path.clone(),
                component: Arc::new(LazyComponent::new(manifest.loader.clone())),
            }),
        ));
    }

    base
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::component::tests::CountingLoader;
    use std::sync::atomic::Ordering;

    fn manifest(id: &str, mount: &str) -> PluginManifest {
        PluginManifest::new(id, mount, Arc::new(CountingLoader::new("<p>plugin</p>")))
    }

    fn paths(table: &RouteTable) -> Vec<String> {
        table.flatten().into_iter().map(|(p, _)| p).collect()
    }

    #[test]
    fn test_base_routes() {
        assert_eq!(
            paths(&RouteTable::base()),
            vec![
                "/",
                "/:app_name/:model_name",
                "/:app_name/:model_name/:id",
                "/plugins/installed-plugins",
            ]
        );
    }

    #[test]
    fn test_augment_preserves_order() {
        let table = augment_routes(
            RouteTable::base(),
            &[manifest("two", "plugin-two"), manifest("one", "plugin-one")],
        );
        let paths = paths(&table);
        assert_eq!(
            &paths[3..],
            &[
                "/plugins/installed-plugins".to_string(),
                "/plugins/plugin-two".to_string(),
                "/plugins/plugin-one".to_string(),
            ]
        );
        let ids: Vec<&str> = table.plugins().iter().map(|p| p.identifier.as_str()).collect();
        assert_eq!(ids, vec!["two", "one"]);
    }

    #[test]
    fn test_augment_is_idempotent() {
        let manifests = vec![manifest("one", "plugin-one"), manifest("two", "plugin-two")];
        let once = augment_routes(RouteTable::base(), &manifests);
        let twice = augment_routes(once, &manifests);

        assert_eq!(twice.plugins().len(), 2);
        assert_eq!(paths(&twice).len(), 6);
    }

    #[test]
    fn test_augment_skips_conflicting_mounts() {
        let table = augment_routes(
            RouteTable::base(),
            &[
                manifest("listing", INSTALLED_PLUGINS_PATH),
                manifest("one", "shared"),
                manifest("two", "shared"),
                manifest("three", "a/b"),
            ],
        );
        let ids: Vec<&str> = table.plugins().iter().map(|p| p.identifier.as_str()).collect();
        assert_eq!(ids, vec!["one"]);
    }

    #[test]
    fn test_augment_does_not_load_components() {
        let loader = CountingLoader::new("<p>lazy</p>");
        let calls = loader.calls.clone();
        let table = augment_routes(
            RouteTable::base(),
            &[PluginManifest::new("lazy", "lazy", Arc::new(loader))],
        );

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(!table.plugins()[0].component.is_loaded());
    }

    #[test]
    fn test_augment_creates_parent_when_missing() {
        let table = augment_routes(
            RouteTable { entries: Vec::new() },
            &[manifest("one", "one")],
        );
        assert_eq!(paths(&table), vec!["/plugins/one"]);
    }
}
