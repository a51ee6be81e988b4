//! Backend-rendered plugin fragments and extra tabs
//!
//! Every fetch here is best-effort: a failure yields `None` (or no tabs) and
//! the caller renders its primary content regardless. Returned [`Markup`] is
//! injected without escaping; the producing backend or plugin is trusted.

use crate::config::ApiConfig;
use crate::fetch::Fetcher;
use crate::render::Markup;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;

/// Suffix appended to a resource URL to get its full-width plugin fragment
pub const FULL_WIDTH_FRAGMENT_SUFFIX: &str = "plugin_full_width_fragment/";

/// Extra tab contributed by a plugin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginTab {
    /// Key of the entry in the tab document
    pub key: String,
    pub title: String,
    /// Where the tab content is fetched from
    pub url: String,
}

/// Fetches plugin fragments for detail views
#[derive(Clone)]
pub struct FragmentCompositor {
    fetcher: Arc<dyn Fetcher>,
}

impl FragmentCompositor {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self { fetcher }
    }

    /// Full-width fragment for the resource at `resource_url`
    pub async fn fetch_fragment(&self, resource_url: &str) -> Option<Markup> {
        self.fetch_markup(&fragment_url(resource_url)).await
    }

    /// `{base}/{app}/{resource}/{slug}/?fragment=true`
    pub async fn fetch_slug_fragment(
        &self,
        api: &ApiConfig,
        app: &str,
        resource: &str,
        slug: &str,
    ) -> Option<Markup> {
        let url = format!("{}?fragment=true", api.slug_view_url(app, resource, slug));
        self.fetch_markup(&url).await
    }

    /// Extra tabs listed at `{base}/{app}/{resource}/{slug}/?format=json`.
    /// Tab URLs are resolved against the API origin.
    pub async fn fetch_tabs(
        &self,
        api: &ApiConfig,
        app: &str,
        resource: &str,
        slug: &str,
    ) -> Vec<PluginTab> {
        let url = format!("{}?format=json", api.slug_view_url(app, resource, slug));
        match self.fetcher.get_json(&url).await {
            Ok(document) => parse_tabs(&document)
                .into_iter()
                .map(|tab| PluginTab {
                    url: api.absolute_url(&tab.url),
                    ..tab
                })
                .collect(),
            Err(e) => {
                tracing::debug!(url = %url, error = %e, "Plugin tabs unavailable");
                Vec::new()
            }
        }
    }

    /// Content of one extra tab
    pub async fn fetch_tab_content(&self, tab: &PluginTab) -> Option<Markup> {
        self.fetch_markup(&tab.url).await
    }

    async fn fetch_markup(&self, url: &str) -> Option<Markup> {
        match self.fetcher.get_text(url).await {
            Ok(body) => Some(Markup::trusted(body)),
            Err(e) => {
                tracing::debug!(url = %url, error = %e, "Plugin fragment unavailable");
                None
            }
        }
    }
}

/// Fragment URL for a resource's canonical URL
pub fn fragment_url(resource_url: &str) -> String {
    if resource_url.ends_with('/') {
        format!("{}{}", resource_url, FULL_WIDTH_FRAGMENT_SUFFIX)
    } else {
        format!("{}/{}", resource_url, FULL_WIDTH_FRAGMENT_SUFFIX)
    }
}

/// Parse `{ "tabs": [ { "<key>": { "title": ..., "url": ... } } ] }`.
/// Entries missing a title or url are skipped. Keys are made unique in
/// document order: a repeated key gets a `-2`, `-3`, ... suffix.
pub fn parse_tabs(document: &Value) -> Vec<PluginTab> {
    let Some(tabs) = document.get("tabs").and_then(Value::as_array) else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    tabs.iter()
        .filter_map(Value::as_object)
        .flat_map(|group| group.iter())
        .filter_map(|(key, tab)| {
            let title = tab.get("title")?.as_str()?;
            let url = tab.get("url")?.as_str()?;
            Some(PluginTab {
                key: unique_key(&mut seen, key),
                title: title.to_string(),
                url: url.to_string(),
            })
        })
        .collect()
}

fn unique_key(seen: &mut HashSet<String>, key: &str) -> String {
    let mut candidate = key.to_string();
    let mut n = 1;
    while !seen.insert(candidate.clone()) {
        n += 1;
        candidate = format!("{}-{}", key, n);
    }
    candidate
}
