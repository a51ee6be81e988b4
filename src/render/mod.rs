//! Schema-less object rendering
//!
//! Turns a resource object of unknown shape into labeled, tiered display rows:
//!
//! ```text
//! JSON ──► ResourceObject (FieldValue per field)
//!              │
//!              ▼
//!        VisibilityFilter (tier per field name)
//!              │
//!              ▼
//!        FieldFormatter ──► Vec<FieldRow>
//! ```

pub mod format;
pub mod html;
pub mod rows;
pub mod value;
pub mod visibility;

pub use format::{format, humanize, RenderedValue, FALSE_GLYPH, PLACEHOLDER, TRUE_GLYPH};
pub use html::{escape, Markup};
pub use rows::{rows, FieldRow};
pub use value::{FieldValue, ResourceObject};
pub use visibility::{is_visible, tier_of, Tier, SYSTEM_FIELDS};
