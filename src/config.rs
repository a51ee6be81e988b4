//! Netfront configuration management

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::path::{Path, PathBuf};

/// Environment variable overriding `api.base_url`
pub const API_URL_ENV: &str = "NETFRONT_API_URL";

/// Main Netfront configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrontendConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Backend API configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Plugin configuration
    #[serde(default)]
    pub plugins: PluginsConfig,
}

impl FrontendConfig {
    /// Load configuration from a TOML file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Load from `path` if given, else from the default location if it exists,
    /// else fall back to defaults. Environment overrides are applied last.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_from(path)?,
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::load_from(&path)?,
                _ => Self::default(),
            },
        };
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Default config file path (`{config_dir}/netfront/config.toml`)
    pub fn default_path() -> Option<PathBuf> {
        dirs_next::config_dir().map(|p| p.join("netfront").join("config.toml"))
    }

    /// Apply environment variable overrides
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                self.api.base_url = url;
            }
        }
    }

    /// Reject configurations that cannot produce working requests
    pub fn validate(&self) -> Result<()> {
        let base = self.api.base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(Error::Config(format!(
                "api.base_url must be an http(s) URL, got '{}'",
                self.api.base_url
            )));
        }
        if self.api.timeout_secs == 0 {
            return Err(Error::Config("api.timeout_secs must be positive".to_string()));
        }
        Ok(())
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Allowed CORS origins (empty = any)
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            cors_origins: Vec::new(),
        }
    }
}

/// Backend API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// API origin, e.g. `http://localhost:8080`
    pub base_url: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Resource types (`app/resource`) whose detail views are slug-addressed
    /// and expose the `?fragment=true` / `?format=json` endpoints
    pub slug_views: Vec<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout_secs: 10,
            slug_views: vec!["dcim/sites".to_string()],
        }
    }
}

impl ApiConfig {
    fn origin(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// `GET {base}/api/get-menu/`
    pub fn menu_url(&self) -> String {
        format!("{}/api/get-menu/", self.origin())
    }

    /// `GET {base}/api/{app}/{resource}/`
    pub fn list_url(&self, app: &str, resource: &str) -> String {
        format!("{}/api/{}/{}/", self.origin(), encode(app), encode(resource))
    }

    /// `GET {base}/api/{app}/{resource}/{id}/`
    pub fn object_url(&self, app: &str, resource: &str, id: &str) -> String {
        format!(
            "{}/api/{}/{}/{}/",
            self.origin(),
            encode(app),
            encode(resource),
            encode(id)
        )
    }

    /// `{base}/{app}/{resource}/{slug}/`, the slug-addressed detail view
    pub fn slug_view_url(&self, app: &str, resource: &str, slug: &str) -> String {
        format!(
            "{}/{}/{}/{}/",
            self.origin(),
            encode(app),
            encode(resource),
            encode(slug)
        )
    }

    /// Resolve a backend-relative URL (`/plugins/...`) against the API origin
    pub fn absolute_url(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else if url.starts_with('/') {
            format!("{}{}", self.origin(), url)
        } else {
            format!("{}/{}", self.origin(), url)
        }
    }

    /// Whether `app/resource` uses slug-addressed detail views
    pub fn uses_slug_view(&self, app: &str, resource: &str) -> bool {
        let wanted = format!("{}/{}", app, resource);
        self.slug_views.iter().any(|v| v.trim_matches('/') == wanted)
    }
}

/// Whether `segment` can be placed in a backend URL path as a single segment.
///
/// Empty and dot segments are rejected: URL normalization would collapse them
/// (`%2E%2E` included) and move the request to a different backend path.
pub fn is_safe_segment(segment: &str) -> bool {
    let decoded = segment.to_ascii_lowercase().replace("%2e", ".");
    !(segment.is_empty() || decoded == "." || decoded == "..")
}

// Percent-encode one path segment; `/`, `?` and `#` never survive raw.
fn encode(segment: &str) -> Cow<'_, str> {
    urlencoding::encode(segment)
}

/// Plugin configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginsConfig {
    /// Scan the plugin directory at start
    pub enabled: bool,

    /// Directory holding one sub-directory per installed plugin
    pub dir: PathBuf,
}

impl Default for PluginsConfig {
    fn default() -> Self {
        let dir = dirs_next::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("netfront")
            .join("plugins");
        Self { enabled: true, dir }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FrontendConfig::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.api.base_url, "http://localhost:8080");
        assert!(config.plugins.enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_endpoint_urls() {
        let api = ApiConfig {
            base_url: "http://nautobot:8080/".to_string(),
            ..Default::default()
        };
        assert_eq!(api.menu_url(), "http://nautobot:8080/api/get-menu/");
        assert_eq!(
            api.object_url("dcim", "devices", "5"),
            "http://nautobot:8080/api/dcim/devices/5/"
        );
        assert_eq!(api.list_url("ipam", "vlans"), "http://nautobot:8080/api/ipam/vlans/");
        assert_eq!(
            api.slug_view_url("dcim", "sites", "ams01"),
            "http://nautobot:8080/dcim/sites/ams01/"
        );
    }

    #[test]
    fn test_absolute_url() {
        let api = ApiConfig {
            base_url: "http://nb/".to_string(),
            ..Default::default()
        };
        assert_eq!(api.absolute_url("/plugins/tab/"), "http://nb/plugins/tab/");
        assert_eq!(api.absolute_url("plugins/tab/"), "http://nb/plugins/tab/");
        assert_eq!(api.absolute_url("https://cdn/x"), "https://cdn/x");
    }

    #[test]
    fn test_uses_slug_view() {
        let api = ApiConfig::default();
        assert!(api.uses_slug_view("dcim", "sites"));
        assert!(!api.uses_slug_view("dcim", "devices"));
    }

    #[test]
    fn test_parse_partial_toml() {
        let config: FrontendConfig = toml::from_str(
            r#"
            [api]
            base_url = "https://netbox.example.com"
            timeout_secs = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://netbox.example.com");
        assert_eq!(config.api.slug_views, vec!["dcim/sites".to_string()]);
        assert!(config.api.uses_slug_view("dcim", "sites"));
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_single_key_sections_use_defaults() {
        let config: FrontendConfig = toml::from_str(
            r#"
            [server]
            port = 8000

            [api]
            base_url = "https://nb.example.com"

            [plugins]
            enabled = false
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.api.slug_views, vec!["dcim/sites".to_string()]);
        assert!(!config.plugins.enabled);
        assert_eq!(config.plugins.dir, PluginsConfig::default().dir);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_endpoint_urls_encode_segments() {
        let api = ApiConfig {
            base_url: "http://nb".to_string(),
            ..Default::default()
        };
        assert_eq!(
            api.object_url("dcim", "devices", "../../x"),
            "http://nb/api/dcim/devices/..%2F..%2Fx/"
        );
        assert_eq!(
            api.slug_view_url("dcim", "sites", "a b?c#d"),
            "http://nb/dcim/sites/a%20b%3Fc%23d/"
        );
        assert_eq!(api.list_url("ipam", "vlans"), "http://nb/api/ipam/vlans/");
    }

    #[test]
    fn test_is_safe_segment() {
        assert!(is_safe_segment("ams01"));
        assert!(is_safe_segment("..%2F..%2Fx"));
        assert!(is_safe_segment("a.b"));
        assert!(!is_safe_segment(""));
        assert!(!is_safe_segment("."));
        assert!(!is_safe_segment(".."));
        assert!(!is_safe_segment("%2E%2e"));
    }

    #[test]
    fn test_validate_rejects_bad_base_url() {
        let mut config = FrontendConfig::default();
        config.api.base_url = "localhost:8080".to_string();
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = FrontendConfig::default();
        config.api.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nhost = \"0.0.0.0\"\nport = 8000\n").unwrap();

        let config = FrontendConfig::load_from(&path).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn test_load_from_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server\n").unwrap();

        assert!(matches!(
            FrontendConfig::load_from(&path),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_config_roundtrips_through_toml() {
        let config = FrontendConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: FrontendConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.api.slug_views, config.api.slug_views);
    }
}
