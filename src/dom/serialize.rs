//! Inner-HTML serialization through html5ever's HTML serializer.
//!
//! Relative `href`/`src` attributes are rewritten against the base URL on
//! the way out; the tree itself is never touched.

use std::io;

use html5ever::QualName;
use html5ever::serialize::{Serialize, SerializeOpts, Serializer, TraversalScope, serialize};
use url::Url;

use super::arena::{Dom, NodeData, NodeId};
use crate::util::resolve_url;

const URL_ATTRS: &[&str] = &["href", "src"];

/// A subtree view that html5ever can serialize.
pub struct SubtreeRef<'a> {
    dom: &'a Dom,
    id: NodeId,
    base: Option<&'a Url>,
}

impl<'a> SubtreeRef<'a> {
    pub fn new(dom: &'a Dom, id: NodeId, base: Option<&'a Url>) -> Self {
        Self { dom, id, base }
    }

    /// Serialize `id` and its descendants without recursing per level.
    fn serialize_node<S: Serializer>(&self, serializer: &mut S, id: NodeId) -> io::Result<()> {
        let mut stack = vec![Step::Open(id)];
        while let Some(step) = stack.pop() {
            let id = match step {
                Step::Open(id) => id,
                Step::Close(id) => {
                    if let Some(NodeData::Element { name, .. }) = self.dom.get(id).map(|n| &n.data) {
                        serializer.end_elem(name.clone())?;
                    }
                    continue;
                }
            };
            let Some(node) = self.dom.get(id) else {
                continue;
            };
            match &node.data {
                NodeData::Element { name, attrs, .. } => {
                    let attrs: Vec<(&QualName, String)> = attrs
                        .iter()
                        .map(|a| {
                            let value = if URL_ATTRS.contains(&a.name.local.as_ref()) {
                                resolve_url(self.base, &a.value)
                            } else {
                                a.value.clone()
                            };
                            (&a.name, value)
                        })
                        .collect();
                    serializer.start_elem(
                        name.clone(),
                        attrs.iter().map(|(name, value)| (*name, value.as_str())),
                    )?;
                    stack.push(Step::Close(id));
                    self.push_children(id, &mut stack);
                }
                NodeData::Text(text) => serializer.write_text(text)?,
                NodeData::Comment(text) => serializer.write_comment(text)?,
                NodeData::Doctype { name, .. } => serializer.write_doctype(name)?,
                NodeData::Document => self.push_children(id, &mut stack),
            }
        }
        Ok(())
    }

    fn push_children(&self, id: NodeId, stack: &mut Vec<Step>) {
        let start = stack.len();
        stack.extend(self.dom.children(id).map(Step::Open));
        stack[start..].reverse();
    }
}

enum Step {
    Open(NodeId),
    Close(NodeId),
}

impl Serialize for SubtreeRef<'_> {
    fn serialize<S: Serializer>(
        &self,
        serializer: &mut S,
        traversal_scope: TraversalScope,
    ) -> io::Result<()> {
        match traversal_scope {
            TraversalScope::IncludeNode => self.serialize_node(serializer, self.id),
            TraversalScope::ChildrenOnly(_) => {
                for child in self.dom.children(self.id) {
                    self.serialize_node(serializer, child)?;
                }
                Ok(())
            }
        }
    }
}

impl Dom {
    /// Serialize the children of `id` as authored HTML.
    ///
    /// With a base URL, relative `href`/`src` values are made absolute.
    pub fn inner_html(&self, id: NodeId, base: Option<&Url>) -> String {
        let mut bytes = Vec::new();
        let opts = SerializeOpts {
            traversal_scope: TraversalScope::ChildrenOnly(None),
            ..Default::default()
        };
        if let Err(err) = serialize(&mut bytes, &SubtreeRef::new(self, id, base), opts) {
            // Writing into a Vec only fails on serializer invariants.
            tracing::warn!(%err, "inner html serialization failed");
        }
        String::from_utf8(bytes).unwrap_or_default()
    }
}
