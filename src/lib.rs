//! Netfront - Server-rendered front-end for network-management APIs
//!
//! Netfront renders browsable pages over a NetBox/Nautobot-style REST API:
//! a navigation bar built from the backend's menu document, generic list and
//! detail views for any resource, and extension points through which
//! installed plugins contribute HTML fragments, extra tabs and whole pages.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                        Netfront server                            │
//! │  ┌────────────────────────────────────────────────────────────┐  │
//! │  │                         Views                               │  │
//! │  │   home │ list │ detail │ installed plugins │ plugin pages   │  │
//! │  └───┬───────────┬──────────────┬──────────────────┬──────────┘  │
//! │      │           │              │                  │             │
//! │  ┌───▼────┐ ┌────▼─────┐ ┌──────▼───────┐ ┌────────▼─────────┐  │
//! │  │  Menu  │ │  Render  │ │  Fragments   │ │  Route registry  │  │
//! │  │ builder│ │ rows/tier│ │  and tabs    │ │  lazy components │  │
//! │  └───┬────┘ └──────────┘ └──────┬───────┘ └──────────────────┘  │
//! │      └──────────────┬───────────┘                                │
//! │              ┌──────▼──────┐                                     │
//! │              │   Fetcher   │                                     │
//! │              └──────┬──────┘                                     │
//! └─────────────────────┼────────────────────────────────────────────┘
//!                       │ HTTP (JSON and HTML)
//!              ┌────────▼────────┐
//!              │   Backend API   │
//!              └─────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`menu`]: Menu document ingestion and nav tree projection
//! - [`render`]: Field values, formatting and visibility tiers
//! - [`plugins`]: Fragments, tabs, manifests and plugin routes
//! - [`fetch`]: Backend access
//! - [`views`]: HTTP handlers and page assembly
//! - [`server`]: Application wiring and serving
//! - [`config`]: Configuration management

pub mod config;
pub mod error;
pub mod fetch;
pub mod menu;
pub mod plugins;
pub mod render;
pub mod server;
pub mod views;

pub use config::FrontendConfig;
pub use error::{Error, Result};
pub use server::{Frontend, FrontendBuilder};
