//! Plugin extension points
//!
//! Plugins extend the front-end in two ways:
//!
//! - **Fragments**: the backend renders plugin HTML for a resource and the
//!   detail page splices it in ([`FragmentCompositor`]).
//! - **Routes**: installed plugins contribute pages mounted under
//!   `/plugins/{mount_path}` ([`augment_routes`]). Their UI is loaded lazily on
//!   first navigation ([`LazyComponent`]).

pub mod component;
pub mod fragment;
pub mod manifest;
pub mod registry;

pub use component::{ComponentLoader, FileComponentLoader, LazyComponent, PluginComponent, StaticComponent};
pub use fragment::{FragmentCompositor, PluginTab, FULL_WIDTH_FRAGMENT_SUFFIX};
pub use manifest::{discover, ManifestFile, PluginManifest, MANIFEST_FILE};
pub use registry::{augment_routes, PluginRoute, RouteEntry, RouteTable, RouteTarget, INSTALLED_PLUGINS_PATH, PLUGINS_PREFIX};
