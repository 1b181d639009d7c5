//! Legacy (microformats v1) classname table.
//!
//! Maps legacy root classes such as `vcard` onto mf2 item types, and legacy
//! property classes such as `fn` onto typed mf2 properties per vocabulary.
//! The table is plain immutable data handed to the parser through
//! [`crate::ParseOptions`].

use std::collections::HashMap;

use crate::classify::{PropertyKind, property_token};

/// Legacy roots and the mf2 item type they stand for.
const ROOTS: &[(&str, &str)] = &[
    ("vcard", "card"),
    ("hentry", "entry"),
    ("vevent", "event"),
    ("adr", "adr"),
    ("geo", "geo"),
    ("hreview", "review"),
];

/// Per item type: legacy property class and its mf2 property class.
const PROPERTIES: &[(&str, &[(&str, &str)])] = &[
    (
        "card",
        &[
            ("fn", "p-name"),
            ("honorific-prefix", "p-honorific-prefix"),
            ("given-name", "p-given-name"),
            ("additional-name", "p-additional-name"),
            ("family-name", "p-family-name"),
            ("honorific-suffix", "p-honorific-suffix"),
            ("nickname", "p-nickname"),
            ("email", "u-email"),
            ("logo", "u-logo"),
            ("photo", "u-photo"),
            ("url", "u-url"),
            ("uid", "u-uid"),
            ("category", "p-category"),
            ("adr", "p-adr"),
            ("street-address", "p-street-address"),
            ("extended-address", "p-extended-address"),
            ("locality", "p-locality"),
            ("region", "p-region"),
            ("postal-code", "p-postal-code"),
            ("country-name", "p-country-name"),
            ("label", "p-label"),
            ("geo", "p-geo"),
            ("latitude", "p-latitude"),
            ("longitude", "p-longitude"),
            ("tel", "p-tel"),
            ("note", "p-note"),
            ("bday", "dt-bday"),
            ("org", "p-org"),
            ("title", "p-job-title"),
            ("role", "p-role"),
        ],
    ),
    (
        "entry",
        &[
            ("entry-title", "p-name"),
            ("entry-summary", "p-summary"),
            ("entry-content", "e-content"),
            ("published", "dt-published"),
            ("updated", "dt-updated"),
            ("author", "p-author"),
            ("category", "p-category"),
            ("geo", "p-geo"),
            ("latitude", "p-latitude"),
            ("longitude", "p-longitude"),
        ],
    ),
    (
        "event",
        &[
            ("summary", "p-name"),
            ("description", "p-description"),
            ("dtstart", "dt-start"),
            ("dtend", "dt-end"),
            ("duration", "dt-duration"),
            ("location", "p-location"),
            ("url", "u-url"),
            ("category", "p-category"),
            ("geo", "p-location"),
        ],
    ),
    (
        "adr",
        &[
            ("post-office-box", "p-post-office-box"),
            ("extended-address", "p-extended-address"),
            ("street-address", "p-street-address"),
            ("locality", "p-locality"),
            ("region", "p-region"),
            ("postal-code", "p-postal-code"),
            ("country-name", "p-country-name"),
        ],
    ),
    ("geo", &[("latitude", "p-latitude"), ("longitude", "p-longitude")]),
    (
        "review",
        &[
            ("summary", "p-name"),
            ("description", "e-content"),
            ("item", "p-item"),
            ("reviewer", "p-author"),
            ("dtreviewed", "dt-published"),
            ("rating", "p-rating"),
            ("best", "p-best"),
            ("worst", "p-worst"),
        ],
    ),
];

/// Immutable legacy classname lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Backcompat {
    roots: HashMap<String, String>,
    properties: HashMap<String, HashMap<String, (PropertyKind, String)>>,
}

impl Backcompat {
    /// A table that recognizes nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The classic vocabularies: hCard, hEntry, hCalendar, adr, geo, hReview.
    pub fn standard() -> Self {
        let mut table = Self::empty();
        for (legacy, mf2_type) in ROOTS {
            table = table.with_root(legacy, mf2_type);
        }
        for (mf2_type, entries) in PROPERTIES {
            for (legacy, mf2_class) in *entries {
                table = table.with_property(mf2_type, legacy, mf2_class);
            }
        }
        table
    }

    /// Map a legacy root class onto an item type (no `h-` prefix).
    pub fn with_root(mut self, legacy: &str, mf2_type: &str) -> Self {
        self.roots.insert(legacy.to_string(), mf2_type.to_string());
        self
    }

    /// Map a legacy property class onto an mf2 property class such as
    /// `p-name`, inside items of `mf2_type`. Invalid mf2 classes are skipped.
    pub fn with_property(mut self, mf2_type: &str, legacy: &str, mf2_class: &str) -> Self {
        match property_token(mf2_class) {
            Some((kind, name)) => {
                self.properties
                    .entry(mf2_type.to_string())
                    .or_default()
                    .insert(legacy.to_string(), (kind, name.to_string()));
            }
            None => tracing::warn!(mf2_class, "ignoring backcompat entry with invalid class"),
        }
        self
    }

    /// Item type for a legacy root class.
    pub fn root(&self, token: &str) -> Option<&str> {
        self.roots.get(token).map(String::as_str)
    }

    /// Properties a legacy class declares inside items of any of `types`.
    pub fn properties<'a>(
        &'a self,
        types: &'a [String],
        token: &'a str,
    ) -> impl Iterator<Item = (PropertyKind, &'a str)> + 'a {
        types.iter().filter_map(move |t| {
            self.properties
                .get(t)
                .and_then(|vocabulary| vocabulary.get(token))
                .map(|(kind, name)| (*kind, name.as_str()))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty() && self.properties.is_empty()
    }
}
