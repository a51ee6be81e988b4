//! Navigation menu
//!
//! The backend publishes its navigation taxonomy at `/api/get-menu/`.
//! [`MenuDocument::from_json`] ingests it leniently and [`build`] projects it
//! into the three-level tree rendered as the nav bar.

mod builder;
mod document;

pub use builder::{build, MenuChild, MenuGroupNode, MenuItemNode, MenuNode};
pub use document::{GroupEntry, MenuDocument, MenuEntry, MenuItem};
