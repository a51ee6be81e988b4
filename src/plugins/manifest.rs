//! Plugin manifests and discovery

use super::component::{ComponentLoader, FileComponentLoader};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tokio::fs;

/// Manifest file expected in every plugin directory
pub const MANIFEST_FILE: &str = "manifest.json";

fn default_entry() -> String {
    "index.html".to_string()
}

/// On-disk manifest (`<plugin>/manifest.json`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ManifestFile {
    /// Unique, stable plugin identifier
    pub identifier: String,
    /// URL path segment under `/plugins/`
    pub mount_path: String,
    /// Human readable name
    #[serde(default)]
    pub title: Option<String>,
    /// Entry page, relative to the plugin directory
    #[serde(default = "default_entry")]
    pub entry: String,
}

impl ManifestFile {
    pub fn validate(&self) -> Result<()> {
        if self.identifier.trim().is_empty() {
            return Err(Error::Plugin("identifier must not be empty".to_string()));
        }
        if !is_path_segment(&self.mount_path) {
            return Err(Error::Plugin(format!(
                "mount_path '{}' is not a single URL path segment",
                self.mount_path
            )));
        }
        if self.entry.contains("..") || Path::new(&self.entry).is_absolute() {
            return Err(Error::Plugin(format!(
                "entry '{}' must stay inside the plugin directory",
                self.entry
            )));
        }
        Ok(())
    }
}

/// Whether `s` can be mounted as `/plugins/{s}`
pub(crate) fn is_path_segment(s: &str) -> bool {
    !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        && s != "."
        && s != ".."
}

/// Registration record for one plugin
#[derive(Clone)]
pub struct PluginManifest {
    pub identifier: String,
    pub mount_path: String,
    pub title: String,
    /// Deferred reference to the plugin UI; only invoked on navigation
    pub loader: Arc<dyn ComponentLoader>,
}

impl PluginManifest {
    pub fn new(
        identifier: impl Into<String>,
        mount_path: impl Into<String>,
        loader: Arc<dyn ComponentLoader>,
    ) -> Self {
        let identifier = identifier.into();
        Self {
            title: identifier.clone(),
            identifier,
            mount_path: mount_path.into(),
            loader,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    fn from_file(file: ManifestFile, plugin_dir: &Path) -> Self {
        let loader = Arc::new(FileComponentLoader::new(plugin_dir.join(&file.entry)));
        let title = file.title.unwrap_or_else(|| file.identifier.clone());
        Self {
            identifier: file.identifier,
            mount_path: file.mount_path,
            title,
            loader,
        }
    }
}

impl std::fmt::Debug for PluginManifest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginManifest")
            .field("identifier", &self.identifier)
            .field("mount_path", &self.mount_path)
            .field("title", &self.title)
            .finish()
    }
}

async fn load_manifest(plugin_dir: &Path) -> Result<PluginManifest> {
    let content = fs::read_to_string(plugin_dir.join(MANIFEST_FILE)).await?;
    let file: ManifestFile = serde_json::from_str(&content)?;
    file.validate()?;
    Ok(PluginManifest::from_file(file, plugin_dir))
}

/// Scan `dir` for installed plugins.
///
/// Every sub-directory holding a `manifest.json` is one plugin. Results are
/// ordered by directory name so registration order is stable across runs.
/// Invalid manifests are skipped with a warning. A missing directory means no
/// plugins are installed.
pub async fn discover(dir: &Path) -> Result<Vec<PluginManifest>> {
    if !fs::try_exists(dir).await.unwrap_or(false) {
        tracing::info!(dir = %dir.display(), "Plugin directory not found, no plugins installed");
        return Ok(Vec::new());
    }

    let mut plugin_dirs = Vec::new();
    let mut entries = fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let is_dir = fs::metadata(&path).await.map(|m| m.is_dir()).unwrap_or(false);
        if is_dir && fs::try_exists(path.join(MANIFEST_FILE)).await.unwrap_or(false) {
            plugin_dirs.push(path);
        }
    }
    plugin_dirs.sort();

    let mut manifests = Vec::with_capacity(plugin_dirs.len());
    for plugin_dir in plugin_dirs {
        match load_manifest(&plugin_dir).await {
            Ok(manifest) => {
                tracing::debug!(
                    plugin = %manifest.identifier,
                    mount_path = %manifest.mount_path,
                    "Discovered plugin"
                );
                manifests.push(manifest);
            }
            Err(e) => {
                tracing::warn!("Skipping plugin {}: {}", plugin_dir.display(), e);
            }
        }
    }
    Ok(manifests)
}
