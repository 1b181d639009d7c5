//! Tree walker and item builder.
//!
//! Walks the document depth-first. Outside any item only roots matter; each
//! root opens an item whose scope collects the property classes of every
//! descendant up to the next nested root. Nested roots that carry property
//! classes become item values of the enclosing item; nested roots without
//! any are reported at top level.

use std::io::Read;
use std::sync::Arc;

use url::Url;

use crate::classify::{Classes, PropertyKind, classify};
use crate::dom::{Dom, NodeId};
use crate::error::Result;
use crate::implied::apply_implied;
use crate::model::{Item, Microformats};
use crate::options::ParseOptions;
use crate::resolve::{self, Context};
use crate::util::{decode_text, sniff_meta_charset};
use crate::value::{PropertyValue, merge_datetimes};

/// Extract microformats from an HTML string.
pub fn parse_html(html: &str, options: &ParseOptions) -> Microformats {
    let dom = Dom::parse(html);
    parse_dom(&dom, options)
}

/// Extract microformats from raw bytes.
///
/// UTF-8 is tried first, then the `<meta charset>` encoding, then
/// Windows-1252.
pub fn parse_bytes(bytes: &[u8], options: &ParseOptions) -> Microformats {
    let text = decode_text(bytes, sniff_meta_charset(bytes));
    parse_html(&text, options)
}

/// Read a whole document from `reader` and extract microformats from it.
pub fn parse_reader<R: Read>(mut reader: R, options: &ParseOptions) -> Result<Microformats> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    Ok(parse_bytes(&bytes, options))
}

/// Extract microformats from an already-built tree.
pub fn parse_dom(dom: &Dom, options: &ParseOptions) -> Microformats {
    let base = document_base(dom, options.base_url());
    let cx = Context::new(dom, base.as_ref(), options.backcompat());
    let mut walker = Walker {
        cx,
        max_depth: options.max_depth(),
        top_level: Vec::new(),
    };
    walker.find_items(dom.document(), 0);

    let mut result = Microformats::new();
    for item in walker.top_level.into_iter().flatten() {
        result.insert(item);
    }
    result
}

/// Configured base URL, refined by the document's `<base href>`.
fn document_base(dom: &Dom, configured: Option<&Url>) -> Option<Url> {
    let Some(href) = dom.base_href() else {
        return configured.cloned();
    };
    let joined = match configured {
        Some(base) => base.join(href),
        None => Url::parse(href),
    };
    match joined {
        Ok(url) => Some(url),
        Err(err) => {
            tracing::debug!(href, %err, "ignoring unusable <base href>");
            configured.cloned()
        }
    }
}

struct Walker<'a> {
    cx: Context<'a>,
    max_depth: usize,
    /// Top-level items in document order. Slots are reserved when a root is
    /// found so outer items precede the items nested inside them.
    top_level: Vec<Option<Arc<Item>>>,
}

impl Walker<'_> {
    fn too_deep(&self, id: NodeId, depth: usize) -> bool {
        if depth <= self.max_depth {
            return false;
        }
        tracing::warn!(
            depth,
            max_depth = self.max_depth,
            tag = self.cx.dom.tag(id).unwrap_or_default(),
            "nesting too deep, skipping subtree"
        );
        true
    }

    fn add_top_level(&mut self, root: NodeId, classes: Classes, depth: usize) {
        let slot = self.top_level.len();
        self.top_level.push(None);
        let item = self.build_item(root, &classes, depth);
        self.top_level[slot] = Some(Arc::new(item));
    }

    /// Look for roots outside any item.
    fn find_items(&mut self, parent: NodeId, depth: usize) {
        let dom = self.cx.dom;
        for child in dom.element_children(parent) {
            if self.too_deep(child, depth + 1) {
                continue;
            }
            let classes = classify(dom.classes(child), self.cx.backcompat, None);
            if classes.is_root() {
                self.add_top_level(child, classes, depth + 1);
            } else {
                self.find_items(child, depth + 1);
            }
        }
    }

    fn build_item(&mut self, root: NodeId, classes: &Classes, depth: usize) -> Item {
        tracing::debug!(types = ?classes.types, legacy = classes.legacy, "opening item");

        let mut item = Item::new(classes.types.clone());
        let legacy_scope = classes.legacy.then_some(classes.types.as_slice());
        self.collect_properties(root, &mut item, legacy_scope, depth);

        apply_implied(&self.cx, root, &mut item);
        item.rewrite_properties(merge_datetimes);

        tracing::debug!(
            types = ?classes.types,
            properties = item.properties().len(),
            "closing item"
        );
        item
    }

    /// Collect property classes of descendants of `parent` into `item`.
    fn collect_properties(
        &mut self,
        parent: NodeId,
        item: &mut Item,
        legacy_scope: Option<&[String]>,
        depth: usize,
    ) {
        let dom = self.cx.dom;
        for child in dom.element_children(parent) {
            if self.too_deep(child, depth + 1) {
                continue;
            }
            let classes = classify(dom.classes(child), self.cx.backcompat, legacy_scope);

            if classes.is_root() {
                if classes.has_properties() {
                    let nested = self.nested_item(child, &classes, depth + 1);
                    for (_, name) in &classes.properties {
                        tracing::trace!(property = %name, "nested item value");
                        item.push(name, PropertyValue::Item(Arc::clone(&nested)));
                    }
                } else {
                    self.add_top_level(child, classes, depth + 1);
                }
                continue;
            }

            for (kind, name) in &classes.properties {
                match resolve::resolve(*kind, &self.cx, child) {
                    Some(value) => {
                        tracing::trace!(property = %name, ?kind, "resolved");
                        item.push(name, value);
                    }
                    None => tracing::trace!(property = %name, ?kind, "no value"),
                }
            }
            self.collect_properties(child, item, legacy_scope, depth + 1);
        }
    }

    /// Build a nested item and derive its `value` from its first property
    /// class.
    fn nested_item(&mut self, root: NodeId, classes: &Classes, depth: usize) -> Arc<Item> {
        let mut nested = self.build_item(root, classes, depth);
        let value = classes
            .properties
            .first()
            .map(|(kind, _)| self.nested_value(*kind, root, &nested));
        nested.set_value(value);
        Arc::new(nested)
    }

    fn nested_value(&self, kind: PropertyKind, root: NodeId, nested: &Item) -> String {
        let cx = &self.cx;
        match kind {
            PropertyKind::Plain => match nested.first_str("name") {
                Some(name) => name.to_string(),
                None => resolve::resolve_plain(cx, root),
            },
            PropertyKind::Url => match nested.first_str("url") {
                Some(url) => url.to_string(),
                None => resolve::resolve_url(cx, root),
            },
            PropertyKind::DateTime => match resolve::resolve_datetime(cx, root) {
                Some(datetime) => datetime.to_string(),
                None => resolve::resolve_plain(cx, root),
            },
            PropertyKind::Embedded => resolve::resolve_embedded(cx, root).text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(html: &str) -> Microformats {
        parse_html(html, &ParseOptions::new())
    }

    #[test]
    fn test_top_level_items() {
        let result = parse(r#"<div class="h-card"><span class="p-name">Jo</span></div>"#);
        assert_eq!(result.get("card").len(), 1);
        assert_eq!(result.get("card")[0].first_str("name"), Some("Jo"));
    }

    #[test]
    fn test_properties_outside_items_ignored() {
        let result = parse(r#"<span class="p-name">Jo</span>"#);
        assert!(result.is_empty());
    }

    #[test]
    fn test_nested_property_item() {
        let result = parse(
            r#"<div class="h-entry"><div class="p-author h-card"><span class="p-name">Jo</span></div></div>"#,
        );
        assert!(!result.contains("card"));
        let author = result.get("entry")[0].get("author")[0].as_item().unwrap();
        assert!(author.has_type("card"));
        assert_eq!(author.value(), Some("Jo"));
    }

    #[test]
    fn test_nested_root_without_property_is_top_level() {
        let result = parse(
            r#"<div class="h-entry"><p class="p-name">Post</p><div class="h-card">Jo</div></div>"#,
        );
        assert_eq!(result.get("entry").len(), 1);
        assert_eq!(result.get("card").len(), 1);
        assert_eq!(result.get("entry")[0].first_str("name"), Some("Post"));
    }

    #[test]
    fn test_nested_properties_stay_with_nearest_item() {
        let result = parse(
            r#"<div class="h-entry"><div class="p-author h-card"><span class="p-name">Jo</span></div><span class="p-name">Post</span></div>"#,
        );
        let entry = &result.get("entry")[0];
        assert_eq!(entry.get("name").len(), 1);
        assert_eq!(entry.first_str("name"), Some("Post"));
    }

    #[test]
    fn test_base_element_refines_configured_base() {
        let html = r#"<html><head><base href="/blog/"></head><body><a class="h-card" href="me">Jo</a></body></html>"#;
        let options = ParseOptions::new().with_base_url("http://example.com/x").unwrap();
        let result = parse_html(html, &options);
        assert_eq!(result.get("card")[0].first_str("url"), Some("http://example.com/blog/me"));
    }

    #[test]
    fn test_parse_bytes_legacy_encoding() {
        let mut bytes = br#"<meta charset="windows-1252"><p class="h-card">Caf"#.to_vec();
        bytes.push(0xE9);
        bytes.extend_from_slice(b"</p>");
        let result = parse_bytes(&bytes, &ParseOptions::new());
        assert_eq!(result.get("card")[0].first_str("name"), Some("Café"));
    }

    #[test]
    fn test_parse_reader() {
        let html = r#"<p class="h-card">Jo</p>"#;
        let result = parse_reader(html.as_bytes(), &ParseOptions::new()).unwrap();
        assert_eq!(result.get("card")[0].first_str("name"), Some("Jo"));
    }

    #[test]
    fn test_depth_guard_skips_subtree() {
        let html = r#"<div><div><div><p class="h-card">Deep</p></div></div></div><p class="h-card">Shallow</p>"#;
        let options = ParseOptions::new().with_max_depth(4);
        let result = parse_html(html, &options);
        let names: Vec<_> = result.get("card").iter().filter_map(|c| c.first_str("name")).collect();
        assert_eq!(names, ["Shallow"]);
    }
}
