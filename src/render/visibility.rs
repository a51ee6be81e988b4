//! Field visibility tiers

use serde::{Deserialize, Serialize};

/// System and control fields
pub const SYSTEM_FIELDS: [&str; 5] = ["id", "url", "display", "slug", "notes_url"];

/// Field visibility partition.
///
/// The names are kept as observed in the product: `Basic` holds only the
/// system fields and `Advanced` holds every business field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// System/control fields only
    Basic,
    /// Everything except the system/control fields
    Advanced,
}

/// Tier a field belongs to. Depends on the name only.
pub fn tier_of(key: &str) -> Tier {
    if SYSTEM_FIELDS.contains(&key) {
        Tier::Basic
    } else {
        Tier::Advanced
    }
}

/// Whether `key` is shown when rendering the `requested` tier
pub fn is_visible(key: &str, requested: Tier) -> bool {
    tier_of(key) == requested
}
