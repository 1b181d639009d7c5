//! Implied `name`, `photo` and `url`.
//!
//! Each is looked for on the item root, then on its only element child, then
//! on that child's only element child. Candidates that are item roots
//! themselves are skipped. Only properties with no explicit value get an
//! implied one.

use crate::dom::NodeId;
use crate::model::Item;
use crate::resolve::Context;
use crate::value::PropertyValue;

/// The root and its single-child chain, at most two levels down.
fn candidates(cx: &Context<'_>, root: NodeId) -> Vec<NodeId> {
    let mut chain = vec![root];
    let mut current = root;
    for _ in 0..2 {
        match cx.dom.only_element_child(current) {
            Some(child) if !cx.is_item_root(child) => {
                chain.push(child);
                current = child;
            }
            _ => break,
        }
    }
    chain
}

fn attr_of(cx: &Context<'_>, id: NodeId, tags: &[&str], attr: &str) -> Option<String> {
    cx.dom
        .tag_is(id, tags)
        .then(|| cx.dom.attr(id, attr))
        .flatten()
        .map(str::to_string)
}

fn name_shape(cx: &Context<'_>, id: NodeId) -> Option<String> {
    attr_of(cx, id, &["img", "area"], "alt").or_else(|| attr_of(cx, id, &["abbr"], "title"))
}

fn photo_shape(cx: &Context<'_>, id: NodeId) -> Option<String> {
    attr_of(cx, id, &["img"], "src").or_else(|| attr_of(cx, id, &["object"], "data"))
}

fn url_shape(cx: &Context<'_>, id: NodeId) -> Option<String> {
    attr_of(cx, id, &["a", "area"], "href")
}

/// Implied name. Falls back to the root's rendered text.
pub fn implied_name(cx: &Context<'_>, root: NodeId) -> String {
    candidates(cx, root)
        .into_iter()
        .find_map(|id| name_shape(cx, id))
        .unwrap_or_else(|| cx.dom.rendered_text(root))
        .trim()
        .to_string()
}

/// Implied photo, resolved against the base URL.
pub fn implied_photo(cx: &Context<'_>, root: NodeId) -> Option<String> {
    candidates(cx, root)
        .into_iter()
        .find_map(|id| photo_shape(cx, id))
        .map(|src| crate::util::resolve_url(cx.base, &src))
}

/// Implied url, resolved against the base URL.
pub fn implied_url(cx: &Context<'_>, root: NodeId) -> Option<String> {
    candidates(cx, root)
        .into_iter()
        .find_map(|id| url_shape(cx, id))
        .map(|href| crate::util::resolve_url(cx.base, &href))
}

/// Add implied properties to `item`, built from `root`.
pub fn apply_implied(cx: &Context<'_>, root: NodeId, item: &mut Item) {
    if !item.contains("name") {
        let name = implied_name(cx, root);
        if !name.is_empty() {
            item.push("name", PropertyValue::Text(name));
        }
    }
    if !item.contains("photo") {
        if let Some(photo) = implied_photo(cx, root) {
            item.push("photo", PropertyValue::Url(photo));
        }
    }
    if !item.contains("url") {
        if let Some(url) = implied_url(cx, root) {
            item.push("url", PropertyValue::Url(url));
        }
    }
}
