//! Classname classifier.
//!
//! Turns an element's class tokens into item types (`h-*`) and typed
//! property names (`p-*`, `u-*`, `dt-*`, `e-*`). A token only counts when
//! it *starts* with the prefix and the rest is a valid name, so `xh-card`
//! or `asdfgh-jkl` never classify.

use crate::backcompat::Backcompat;

/// The four property value kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PropertyKind {
    /// `p-*`
    Plain,
    /// `u-*`
    Url,
    /// `dt-*`
    DateTime,
    /// `e-*`
    Embedded,
}

impl PropertyKind {
    pub const ALL: [PropertyKind; 4] = [
        PropertyKind::Plain,
        PropertyKind::Url,
        PropertyKind::DateTime,
        PropertyKind::Embedded,
    ];

    pub fn prefix(self) -> &'static str {
        match self {
            PropertyKind::Plain => "p-",
            PropertyKind::Url => "u-",
            PropertyKind::DateTime => "dt-",
            PropertyKind::Embedded => "e-",
        }
    }
}

/// Classification of one element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classes {
    /// Item type names without the `h-` prefix, in token order.
    pub types: Vec<String>,
    /// Property declarations without prefixes, in token order.
    pub properties: Vec<(PropertyKind, String)>,
    /// Types came from legacy root classes rather than `h-*`.
    pub legacy: bool,
}

impl Classes {
    /// Whether the element opens an item.
    pub fn is_root(&self) -> bool {
        !self.types.is_empty()
    }

    pub fn has_properties(&self) -> bool {
        !self.properties.is_empty()
    }

    fn push_type(&mut self, name: &str) {
        if !self.types.iter().any(|t| t == name) {
            self.types.push(name.to_string());
        }
    }

    fn push_property(&mut self, kind: PropertyKind, name: &str) {
        if !self.properties.iter().any(|(k, n)| *k == kind && n == name) {
            self.properties.push((kind, name.to_string()));
        }
    }
}

/// Strip `prefix` (ASCII case-insensitive) and validate the remaining name.
fn strip_prefixed<'a>(token: &'a str, prefix: &str) -> Option<&'a str> {
    let head = token.get(..prefix.len())?;
    if !head.eq_ignore_ascii_case(prefix) {
        return None;
    }
    let name = &token[prefix.len()..];
    is_name(name).then_some(name)
}

/// Names are ASCII alphanumerics and hyphens, starting alphanumeric.
fn is_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphanumeric())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// Item type named by an `h-*` token.
pub fn type_token(token: &str) -> Option<&str> {
    strip_prefixed(token, "h-")
}

/// Property kind and name declared by a `p-`/`u-`/`dt-`/`e-` token.
pub fn property_token(token: &str) -> Option<(PropertyKind, &str)> {
    PropertyKind::ALL
        .into_iter()
        .find_map(|kind| strip_prefixed(token, kind.prefix()).map(|name| (kind, name)))
}

/// Classify an element's class tokens.
///
/// Legacy root classes are only consulted when no `h-*` token is present.
/// Legacy property classes are only consulted when `legacy_scope` carries
/// the types of an enclosing item that was itself found through a legacy
/// root.
pub fn classify(
    tokens: &[String],
    backcompat: &Backcompat,
    legacy_scope: Option<&[String]>,
) -> Classes {
    let mut classes = Classes::default();

    for token in tokens {
        if let Some(name) = type_token(token) {
            classes.push_type(name);
        } else if let Some((kind, name)) = property_token(token) {
            classes.push_property(kind, name);
        }
    }

    if classes.types.is_empty() {
        for token in tokens {
            if let Some(name) = backcompat.root(token) {
                classes.push_type(name);
                classes.legacy = true;
            }
        }
    }

    if let Some(scope) = legacy_scope {
        for token in tokens {
            for (kind, name) in backcompat.properties(scope, token) {
                classes.push_property(kind, name);
            }
        }
    }

    classes
}
