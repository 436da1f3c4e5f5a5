//! Compile-time category catalog.
//!
//! The catalog is embedded from `catalog.toml` via [`include_str!`] and
//! parsed once on first use. It holds the presentation data for each
//! [`ObjectKind`]: palette label, emoji, hint, and map marker style.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::ObjectKind;

/// Emoji used for categories that are not in the catalog.
pub const FALLBACK_EMOJI: &str = "📍";

/// Embedded TOML catalog definition.
const CATALOG_TOML: &str = include_str!("../catalog.toml");

/// Presentation data for one object kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// The kind this entry describes.
    pub kind: ObjectKind,
    /// Human-readable palette label.
    pub label: String,
    /// Emoji shown in the palette and object lists.
    pub emoji: String,
    /// One-sentence placement hint.
    pub hint: String,
    /// Map marker colour name.
    pub marker_color: String,
    /// Map marker icon name.
    pub marker_icon: String,
}

#[derive(Deserialize)]
struct CatalogFile {
    entries: Vec<CatalogEntry>,
}

static CATALOG: LazyLock<Vec<CatalogEntry>> = LazyLock::new(|| {
    toml::de::from_str::<CatalogFile>(CATALOG_TOML)
        .unwrap_or_else(|e| panic!("Failed to parse embedded category catalog: {e}"))
        .entries
});

/// Returns every catalog entry in palette order.
///
/// # Panics
///
/// Panics on first use if the embedded TOML fails to parse. Since the file
/// is a compile-time constant, a parse failure is a development error and
/// is caught by this module's tests.
#[must_use]
pub fn entries() -> &'static [CatalogEntry] {
    &CATALOG
}

/// Looks up the catalog entry for a kind.
#[must_use]
pub fn entry(kind: ObjectKind) -> Option<&'static CatalogEntry> {
    entries().iter().find(|e| e.kind == kind)
}

/// Returns the emoji for a kind, or [`FALLBACK_EMOJI`] if it has no entry.
#[must_use]
pub fn emoji_for(kind: ObjectKind) -> &'static str {
    entry(kind).map_or(FALLBACK_EMOJI, |e| e.emoji.as_str())
}

/// Returns the palette label for a kind, falling back to its enum name.
#[must_use]
pub fn label_for(kind: ObjectKind) -> &'static str {
    entry(kind).map_or_else(|| kind.into(), |e| e.label.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn covers_every_kind_exactly_once() {
        let kinds: BTreeSet<ObjectKind> = entries().iter().map(|e| e.kind).collect();
        assert_eq!(entries().len(), ObjectKind::all().len());
        assert_eq!(kinds.len(), ObjectKind::all().len());
        for kind in ObjectKind::all() {
            assert!(entry(*kind).is_some(), "{kind} missing from catalog");
        }
    }

    #[test]
    fn entries_have_required_fields() {
        for e in entries() {
            assert!(!e.label.is_empty(), "{} has empty label", e.kind);
            assert!(!e.emoji.is_empty(), "{} has empty emoji", e.kind);
            assert!(!e.hint.is_empty(), "{} has empty hint", e.kind);
            assert!(!e.marker_color.is_empty(), "{} has empty color", e.kind);
        }
    }

    #[test]
    fn palette_order_starts_with_housing() {
        assert_eq!(entries()[0].kind, ObjectKind::Housing);
        assert_eq!(emoji_for(ObjectKind::Industry), "🏭");
        assert_eq!(label_for(ObjectKind::School), "School");
    }
}
