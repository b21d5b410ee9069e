//! Arena-backed text tree.
//!
//! The tree is an ordered forest of element nodes, text leaves and
//! annotation nodes under a single root element. Tagging never mutates the
//! tree it scans; it produces [`LeafSpan`] records that [`TextTree::apply`]
//! turns into annotation nodes in one pass.

use std::collections::BTreeMap;

use crate::error::{HighlightError, Result};
use crate::model::{AnnotationKind, ItemRef, MatchSpan};
use crate::tagger::{build_char_to_byte_map, ranges_overlap, slice_char_range, LeafSpan};
use crate::types::HighlightConfig;

/// Index of a node in its [`TextTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Raw arena index.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Matched text wrapped by the tagger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    /// Kanji or vocabulary match.
    pub kind: AnnotationKind,
    /// Literal matched text.
    pub text: String,
    /// Item the match was produced from.
    pub source: ItemRef,
    /// Mastery level, set by the level resolver.
    pub level: Option<String>,
}

/// Payload of one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Container with a tag name.
    Element(String),
    /// Plain text leaf.
    Text(String),
    /// Tagged match. Never rescanned.
    Annotation(Annotation),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Ordered tree of elements and text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextTree {
    nodes: Vec<Node>,
}

impl TextTree {
    /// Creates a tree with a single root element.
    pub fn new(root_name: impl Into<String>) -> Self {
        Self {
            nodes: vec![Node {
                kind: NodeKind::Element(root_name.into()),
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// Creates a tree whose root holds a single text leaf.
    pub fn from_text(text: impl Into<String>) -> Self {
        let mut tree = Self::new("body");
        let root = tree.root();
        tree.push(root, NodeKind::Text(text.into()));
        tree
    }

    /// The root element.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Appends a child element to `parent`.
    pub fn add_element(&mut self, parent: NodeId, name: impl Into<String>) -> Result<NodeId> {
        self.expect_element(parent)?;
        Ok(self.push(parent, NodeKind::Element(name.into())))
    }

    /// Appends a text leaf to `parent`.
    pub fn add_text(&mut self, parent: NodeId, text: impl Into<String>) -> Result<NodeId> {
        self.expect_element(parent)?;
        Ok(self.push(parent, NodeKind::Text(text.into())))
    }

    /// Payload of `id`, or `None` for an unknown node.
    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.nodes.get(id.0).map(|node| &node.kind)
    }

    /// Children of `id` in document order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id.0)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    /// Parent of `id`; `None` for the root.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0).and_then(|node| node.parent)
    }

    fn push(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    fn expect_element(&self, id: NodeId) -> Result<()> {
        match self.kind(id) {
            Some(NodeKind::Element(_)) => Ok(()),
            Some(_) => Err(HighlightError::InvalidArgument(format!(
                "node {} is not an element",
                id.0
            ))),
            None => Err(HighlightError::InvalidArgument(format!(
                "node {} does not exist",
                id.0
            ))),
        }
    }

    /// Text leaves reachable from the root, in reverse document order
    /// (last sibling first, children before the elements that follow them).
    ///
    /// Annotation nodes and elements for which `skip` returns `true` are not
    /// descended into.
    pub fn text_leaves<F>(&self, skip: F) -> Vec<NodeId>
    where
        F: Fn(&str) -> bool,
    {
        let mut leaves = Vec::new();
        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id.0];
            match &node.kind {
                NodeKind::Text(_) => leaves.push(id),
                NodeKind::Annotation(_) => {}
                NodeKind::Element(name) => {
                    if id != self.root() && skip(name) {
                        continue;
                    }
                    // pushed forward so the last sibling pops first
                    stack.extend(node.children.iter().copied());
                }
            }
        }
        leaves
    }

    /// Text of a leaf, if `id` is one.
    pub fn leaf_text(&self, id: NodeId) -> Option<&str> {
        match self.kind(id) {
            Some(NodeKind::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// Splits text leaves around the given spans and wraps each matched
    /// segment in an annotation node.
    ///
    /// Spans are grouped per leaf and applied highest offset first, so each
    /// split leaves the offsets of the remaining spans valid. Spans must lie
    /// within their leaf and must not overlap.
    pub fn apply(&mut self, spans: &[LeafSpan]) -> Result<()> {
        let mut by_leaf: BTreeMap<NodeId, Vec<&MatchSpan>> = BTreeMap::new();
        for leaf_span in spans {
            by_leaf.entry(leaf_span.leaf).or_default().push(&leaf_span.span);
        }

        // nothing is mutated until every leaf has been split successfully
        let mut replacements = Vec::with_capacity(by_leaf.len());
        for (leaf, mut leaf_spans) in by_leaf {
            let Some(text) = self.leaf_text(leaf) else {
                return Err(HighlightError::InvalidArgument(format!(
                    "node {} is not a text leaf",
                    leaf.0
                )));
            };
            leaf_spans.sort_by(|a, b| b.start.cmp(&a.start));
            replacements.push((leaf, split_leaf(text, &leaf_spans)?));
        }
        for (leaf, replacement) in replacements {
            self.replace_leaf(leaf, replacement);
        }
        Ok(())
    }

    fn replace_leaf(&mut self, leaf: NodeId, replacement: Vec<NodeKind>) {
        let Some(parent) = self.nodes[leaf.0].parent else {
            return;
        };
        let mut new_ids = Vec::with_capacity(replacement.len());
        let mut kinds = replacement.into_iter();
        // the first segment reuses the leaf's slot
        if let Some(first) = kinds.next() {
            self.nodes[leaf.0].kind = first;
            new_ids.push(leaf);
        }
        for kind in kinds {
            let id = NodeId(self.nodes.len());
            self.nodes.push(Node {
                kind,
                parent: Some(parent),
                children: Vec::new(),
            });
            new_ids.push(id);
        }

        let siblings = &mut self.nodes[parent.0].children;
        if let Some(position) = siblings.iter().position(|id| *id == leaf) {
            siblings.splice(position..=position, new_ids);
        }
    }

    /// Annotation nodes in document order.
    pub fn annotations(&self) -> Vec<(NodeId, &Annotation)> {
        let mut out = Vec::new();
        self.walk(self.root(), &mut |id, kind| {
            if let NodeKind::Annotation(annotation) = kind {
                out.push((id, annotation));
            }
        });
        out
    }

    pub(crate) fn annotation_mut(&mut self, id: NodeId) -> Option<&mut Annotation> {
        match self.nodes.get_mut(id.0).map(|node| &mut node.kind) {
            Some(NodeKind::Annotation(annotation)) => Some(annotation),
            _ => None,
        }
    }

    /// Concatenated text of the whole tree, annotations included.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.walk(self.root(), &mut |_, kind| match kind {
            NodeKind::Text(text) => out.push_str(text),
            NodeKind::Annotation(annotation) => out.push_str(&annotation.text),
            NodeKind::Element(_) => {}
        });
        out
    }

    fn walk<'a>(&'a self, id: NodeId, visit: &mut dyn FnMut(NodeId, &'a NodeKind)) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let node = &self.nodes[current.0];
            visit(current, &node.kind);
            stack.extend(node.children.iter().rev().copied());
        }
    }

    /// Serializes the tree as markup. Annotations become
    /// `<tag data-level="…" style="color:…">text</tag>` using the tag names
    /// and colours of `config`.
    pub fn render_markup(&self, config: &HighlightConfig) -> String {
        let mut out = String::new();
        self.render_node(self.root(), config, &mut out);
        out
    }

    fn render_node(&self, id: NodeId, config: &HighlightConfig, out: &mut String) {
        let node = &self.nodes[id.0];
        match &node.kind {
            NodeKind::Text(text) => push_escaped(out, text),
            NodeKind::Annotation(annotation) => {
                let tag = config.tag_for(annotation.kind);
                out.push('<');
                out.push_str(tag);
                if let Some(level) = &annotation.level {
                    out.push_str(" data-level=\"");
                    push_escaped(out, level);
                    out.push('"');
                }
                out.push_str(" style=\"color:");
                push_escaped(out, config.color_for(annotation.kind));
                out.push_str("\">");
                push_escaped(out, &annotation.text);
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
            NodeKind::Element(name) => {
                out.push('<');
                out.push_str(name);
                out.push('>');
                for child in &node.children {
                    self.render_node(*child, config, out);
                }
                out.push_str("</");
                out.push_str(name);
                out.push('>');
            }
        }
    }
}

/// Nodes replacing one leaf, highest offset first then reversed into
/// document order. `spans` are sorted by descending start.
fn split_leaf(text: &str, spans: &[&MatchSpan]) -> Result<Vec<NodeKind>> {
    let map = build_char_to_byte_map(text);
    let char_len = map.len() - 1;
    let mut tail: Vec<NodeKind> = Vec::with_capacity(spans.len() * 2 + 1);
    let mut remaining_end = char_len;
    let mut previous: Option<&MatchSpan> = None;

    for span in spans {
        if span.start >= span.end || span.end > char_len {
            return Err(HighlightError::InvalidArgument(format!(
                "span {}..{} is outside a leaf of {} characters",
                span.start, span.end, char_len
            )));
        }
        if let Some(later) = previous {
            if ranges_overlap(span.start, span.end, later.start, later.end) {
                return Err(HighlightError::InvalidArgument(format!(
                    "spans {}..{} and {}..{} overlap",
                    span.start, span.end, later.start, later.end
                )));
            }
        }

        let after = slice_char_range(text, &map, span.end, remaining_end);
        if !after.is_empty() {
            tail.push(NodeKind::Text(after.to_string()));
        }
        tail.push(NodeKind::Annotation(Annotation {
            kind: span.kind(),
            text: slice_char_range(text, &map, span.start, span.end).to_string(),
            source: span.source,
            level: None,
        }));
        remaining_end = span.start;
        previous = Some(span);
    }

    let before = slice_char_range(text, &map, 0, remaining_end);
    if !before.is_empty() {
        tail.push(NodeKind::Text(before.to_string()));
    }
    tail.reverse();
    Ok(tail)
}

fn push_escaped(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}
