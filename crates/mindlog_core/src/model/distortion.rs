//! Cognitive distortion catalog.
//!
//! # Responsibility
//! - Declare the fixed, closed set of distortion tags known at build time.
//! - Resolve persisted slugs back to catalog entries.
//!
//! # Invariants
//! - Slugs are permanent identifiers; an entry's slug never changes once
//!   shipped, even when labels/descriptions are reworded.
//! - Lookup by an unknown slug is an explicit error, never a default entry.
//!
//! # See also
//! - docs/architecture/data-model.md

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One entry of the closed distortion catalog.
///
/// Display strings live in the catalog, not in persisted data: the modern
/// record format stores only the slug, so relabeling an entry retroactively
/// applies to every stored thought.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Distortion {
    /// Stable persistence identifier. Immutable once shipped.
    pub slug: &'static str,
    /// Short display name.
    pub label: &'static str,
    /// One-line explanation shown in the picker.
    pub description: &'static str,
    /// Display emoji.
    pub emoji: &'static str,
}

/// Pre-versioning persisted shape of a distortion.
///
/// Old records embed the whole entry inline instead of referencing it by
/// slug. Such data exists on devices, so this shape stays decodable forever.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyDistortionV0 {
    pub slug: String,
    pub label: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<bool>,
}

/// Raised when a persisted slug is not part of the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSlugError {
    pub slug: String,
}

impl Display for UnknownSlugError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "no such distortion slug: {}", self.slug)
    }
}

impl Error for UnknownSlugError {}

/// The full catalog, in declaration order.
///
/// Order matters for stable picker rendering; `sorted_list` is the
/// label-ordered view.
pub const CATALOG: [Distortion; 12] = [
    Distortion {
        slug: "all-or-nothing",
        label: "All or Nothing Thinking",
        description: "Seeing things in absolute, black and white categories.",
        emoji: "🌓",
    },
    Distortion {
        slug: "overgeneralization",
        label: "Overgeneralization",
        description: "Taking one negative event as a never-ending pattern.",
        emoji: "👯‍",
    },
    Distortion {
        slug: "mind-reading",
        label: "Mind Reading",
        description: "Assuming you know what someone else is thinking.",
        emoji: "🧠",
    },
    Distortion {
        slug: "fortune-telling",
        label: "Fortune Telling",
        description: "Predicting a bad outcome as if it were already fact.",
        emoji: "🔮",
    },
    Distortion {
        slug: "magnification-of-the-negative",
        label: "Magnification of the Negative",
        description: "Blowing the bad parts of a situation out of proportion.",
        emoji: "👎",
    },
    Distortion {
        slug: "minimization-of-the-positive",
        label: "Minimization of the Positive",
        description: "Discounting the good parts as if they don't count.",
        emoji: "👍",
    },
    Distortion {
        slug: "catastrophizing",
        label: "Catastrophizing",
        description: "Expecting the worst possible outcome of every situation.",
        emoji: "🤯",
    },
    Distortion {
        slug: "emotional-reasoning",
        label: "Emotional Reasoning",
        description: "Treating a feeling as evidence for what is true.",
        emoji: "🎭",
    },
    Distortion {
        slug: "should-statements",
        label: "Should Statements",
        description: "Criticizing yourself or others with shoulds and musts.",
        emoji: "✨",
    },
    Distortion {
        slug: "labeling",
        label: "Labeling",
        description: "Reducing yourself or others to a single negative label.",
        emoji: "🏷",
    },
    Distortion {
        slug: "self-blaming",
        label: "Self Blaming",
        description: "Holding yourself responsible for things outside your control.",
        emoji: "👁",
    },
    Distortion {
        slug: "other-blaming",
        label: "Other Blaming",
        description: "Holding others responsible for your own pain.",
        emoji: "🧛‍",
    },
];

static BY_SLUG: Lazy<BTreeMap<&'static str, Distortion>> = Lazy::new(|| {
    CATALOG
        .iter()
        .map(|entry| (entry.slug, *entry))
        .collect::<BTreeMap<_, _>>()
});

/// Returns the full catalog in declaration order.
pub fn list() -> &'static [Distortion] {
    &CATALOG
}

/// Resolves one catalog entry by its stable slug.
///
/// # Errors
/// - `UnknownSlugError` when the slug is not part of the closed set.
pub fn by_slug(slug: &str) -> Result<Distortion, UnknownSlugError> {
    BY_SLUG
        .get(slug)
        .copied()
        .ok_or_else(|| UnknownSlugError {
            slug: slug.to_string(),
        })
}

/// Returns the catalog ordered by case-insensitive label.
pub fn sorted_list() -> Vec<Distortion> {
    let mut entries = CATALOG.to_vec();
    entries.sort_by_key(|entry| entry.label.to_uppercase());
    entries
}

/// Returns the emoji for a slug, or a shrug for anything unknown.
///
/// Unlike `by_slug` this is a display helper and must never fail; list
/// rendering calls it with whatever slug a record happens to carry.
pub fn emoji_for_slug(slug: &str) -> &'static str {
    BY_SLUG.get(slug).map_or("🤷‍", |entry| entry.emoji)
}

/// Converts one catalog entry to the pre-versioning inline shape.
pub fn to_legacy_v0(entry: &Distortion) -> LegacyDistortionV0 {
    LegacyDistortionV0 {
        slug: entry.slug.to_string(),
        label: entry.label.to_string(),
        description: entry.description.to_string(),
        emoji: Some(entry.emoji.to_string()),
        selected: None,
    }
}

/// Returns the label-sorted catalog as pre-versioning inline objects.
///
/// Used by compatibility tooling and fixtures, not by the normal write path.
pub fn legacy_list() -> Vec<LegacyDistortionV0> {
    sorted_list().iter().map(to_legacy_v0).collect()
}
