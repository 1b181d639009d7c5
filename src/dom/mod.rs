//! Read-only document tree handed to the extraction engine.
//!
//! HTML tokenizing and tree construction are html5ever's job; this module
//! only owns the arena it parses into and the accessors the engine needs
//! (tag, attributes, classes, children, text and inner HTML).

mod arena;
mod serialize;
mod tree_sink;

pub use arena::{Attribute, Children, Dom, Node, NodeData, NodeId};
pub use serialize::SubtreeRef;
pub use tree_sink::{DomSink, NodeHandle};

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;

impl Dom {
    /// Parse an HTML document (or fragment) into an arena tree.
    ///
    /// Fragments get the usual `html`/`head`/`body` scaffolding; malformed
    /// markup is repaired the way browsers do.
    pub fn parse(html: &str) -> Dom {
        parse_document(DomSink::new(), ParseOpts::default())
            .from_utf8()
            .one(html.as_bytes())
            .into_dom()
    }

    /// `href` of the first `<base>` element, if any.
    pub fn base_href(&self) -> Option<&str> {
        let base = self.find_by_tag("base")?;
        self.attr(base, "href")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_href() {
        let dom = Dom::parse(
            r#"<html><head><base href="/root/"></head><body><a href="x">x</a></body></html>"#,
        );
        assert_eq!(dom.base_href(), Some("/root/"));

        let dom = Dom::parse("<p>no base</p>");
        assert_eq!(dom.base_href(), None);
    }
}
