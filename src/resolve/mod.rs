//! Property value resolvers.
//!
//! Each property kind owns an ordered table of rules. A rule is a plain
//! function from an element to an optional raw value; the first rule that
//! produces something wins. Keeping the tables as data makes the priority
//! order visible and lets each rule be tested on its own.

mod datetime;
mod embedded;
mod link;
mod plain;
mod value_class;

pub use datetime::{DATETIME_RULES, resolve_datetime};
pub use embedded::resolve_embedded;
pub use link::{URL_RULES, resolve_url};
pub use plain::{PLAIN_RULES, resolve_plain};

use url::Url;

use crate::backcompat::Backcompat;
use crate::classify::{PropertyKind, classify};
use crate::dom::{Dom, NodeId};
use crate::value::PropertyValue;

/// Read-only state shared by resolvers and the implied-property engine.
#[derive(Clone, Copy)]
pub struct Context<'a> {
    pub dom: &'a Dom,
    pub base: Option<&'a Url>,
    pub backcompat: &'a Backcompat,
}

impl<'a> Context<'a> {
    pub fn new(dom: &'a Dom, base: Option<&'a Url>, backcompat: &'a Backcompat) -> Self {
        Self {
            dom,
            base,
            backcompat,
        }
    }

    /// Whether `id` opens an item, either via `h-*` or a legacy root.
    pub fn is_item_root(&self, id: NodeId) -> bool {
        classify(self.dom.classes(id), self.backcompat, None).is_root()
    }

    /// Whether `id` carries any mf2 class at all.
    fn is_microformat_element(&self, id: NodeId) -> bool {
        let classes = classify(self.dom.classes(id), self.backcompat, None);
        classes.is_root() || classes.has_properties()
    }

    fn absolute_url(&self, value: &str) -> String {
        crate::util::resolve_url(self.base, value)
    }
}

/// One resolution rule.
pub type Rule = fn(&Context<'_>, NodeId) -> Option<String>;

/// Run `rules` in order; first match wins.
pub fn first_match(rules: &[Rule], cx: &Context<'_>, id: NodeId) -> Option<String> {
    rules.iter().find_map(|rule| rule(cx, id))
}

/// Resolve one property declaration on `id`.
///
/// `None` only for datetimes that do not parse.
pub fn resolve(kind: PropertyKind, cx: &Context<'_>, id: NodeId) -> Option<PropertyValue> {
    match kind {
        PropertyKind::Plain => Some(PropertyValue::Text(resolve_plain(cx, id))),
        PropertyKind::Url => Some(PropertyValue::Url(resolve_url(cx, id))),
        PropertyKind::DateTime => resolve_datetime(cx, id).map(PropertyValue::DateTime),
        PropertyKind::Embedded => Some(PropertyValue::Markup(resolve_embedded(cx, id))),
    }
}

// Rules shared between kinds.

fn attr_on(cx: &Context<'_>, id: NodeId, tags: &[&str], attr: &str) -> Option<String> {
    if !cx.dom.tag_is(id, tags) {
        return None;
    }
    cx.dom.attr(id, attr).map(|v| v.trim().to_string())
}

/// `<abbr title>`
pub fn abbr_title(cx: &Context<'_>, id: NodeId) -> Option<String> {
    attr_on(cx, id, &["abbr"], "title")
}

/// `<data value>`, `<input value>`
pub fn data_value(cx: &Context<'_>, id: NodeId) -> Option<String> {
    attr_on(cx, id, &["data", "input"], "value")
}

/// Trimmed rendered text. Always matches.
pub fn rendered_text(cx: &Context<'_>, id: NodeId) -> Option<String> {
    Some(cx.dom.rendered_text(id).trim().to_string())
}


#[cfg(test)]
mod tests {
    use super::test_support::element_with_class;
    use super::*;

    #[test]
    fn test_first_match_stops_at_first_rule() {
        let dom = Dom::parse(r#"<abbr class="x" title=" Full "> short </abbr>"#);
        let backcompat = Backcompat::empty();
        let cx = Context::new(&dom, None, &backcompat);
        let id = element_with_class(&dom, "x");

        assert_eq!(first_match(&[abbr_title, rendered_text], &cx, id).as_deref(), Some("Full"));
        assert_eq!(first_match(&[data_value, rendered_text], &cx, id).as_deref(), Some("short"));
        assert_eq!(first_match(&[data_value], &cx, id), None);
    }

    #[test]
    fn test_resolve_dispatches_by_kind() {
        let dom = Dom::parse(r#"<time class="x" datetime="2012-08-05">Sunday</time>"#);
        let backcompat = Backcompat::empty();
        let cx = Context::new(&dom, None, &backcompat);
        let id = element_with_class(&dom, "x");

        assert_eq!(
            resolve(PropertyKind::Plain, &cx, id),
            Some(PropertyValue::Text("Sunday".into()))
        );
        assert!(matches!(
            resolve(PropertyKind::DateTime, &cx, id),
            Some(PropertyValue::DateTime(_))
        ));
        assert!(matches!(
            resolve(PropertyKind::Embedded, &cx, id),
            Some(PropertyValue::Markup(_))
        ));
    }
}
