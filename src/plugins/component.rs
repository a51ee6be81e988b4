//! Plugin UI components and their deferred loaders

use crate::error::{Error, Result};
use crate::render::Markup;
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// A loaded plugin page
pub trait PluginComponent: Send + Sync {
    /// Body markup of the plugin page
    fn render(&self) -> Markup;
}

/// Deferred reference to a plugin's UI code
#[async_trait]
pub trait ComponentLoader: Send + Sync {
    async fn load(&self) -> Result<Arc<dyn PluginComponent>>;
}

/// Component wrapping fixed markup
#[derive(Debug, Clone)]
pub struct StaticComponent {
    markup: Markup,
}

impl StaticComponent {
    pub fn new(markup: Markup) -> Self {
        Self { markup }
    }
}

impl PluginComponent for StaticComponent {
    fn render(&self) -> Markup {
        self.markup.clone()
    }
}

/// Loader reading a plugin's entry page from disk
#[derive(Debug, Clone)]
pub struct FileComponentLoader {
    path: PathBuf,
}

impl FileComponentLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ComponentLoader for FileComponentLoader {
    async fn load(&self) -> Result<Arc<dyn PluginComponent>> {
        tracing::debug!(path = %self.path.display(), "Loading plugin component");
        let html = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            Error::Plugin(format!("Failed to read {}: {}", self.path.display(), e))
        })?;
        Ok(Arc::new(StaticComponent::new(Markup::trusted(html))))
    }
}

/// A component that is loaded on first use and kept afterwards.
///
/// Failed loads are not cached; the next navigation tries again.
pub struct LazyComponent {
    loader: Arc<dyn ComponentLoader>,
    cell: OnceCell<Arc<dyn PluginComponent>>,
}

impl LazyComponent {
    pub fn new(loader: Arc<dyn ComponentLoader>) -> Self {
        Self {
            loader,
            cell: OnceCell::new(),
        }
    }

    /// Whether the loader has already run successfully
    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }

    /// Load the component if needed and return it
    pub async fn resolve(&self) -> Result<Arc<dyn PluginComponent>> {
        self.cell
            .get_or_try_init(|| self.loader.load())
            .await
            .cloned()
    }
}

impl std::fmt::Debug for LazyComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LazyComponent")
            .field("loaded", &self.is_loaded())
            .finish()
    }
}
