//! Headless document model the widget renders into.
//!
//! Elements live in an arena indexed by [`NodeId`]. Removing an element drops
//! its whole subtree; ids are never handed out twice, so a stale id simply
//! stops resolving.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Handle to an element in a [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct NodeId(usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Element {
    pub tag: String,
    pub classes: Vec<String>,
    pub text: String,
    pub dataset: BTreeMap<String, String>,
    /// Current value, only meaningful for `input` elements
    pub value: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Debug, Default)]
pub struct Document {
    nodes: Vec<Option<Element>>,
    body: Option<NodeId>,
}

/// The three elements the widget attaches to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageHandles {
    pub input: NodeId,
    pub candidates: NodeId,
    pub saved: NodeId,
}

impl Document {
    pub fn new() -> Self {
        let mut doc = Self::default();
        let body = doc.create_element("body");
        doc.body = Some(body);
        doc
    }

    /// Builds the search page markup: one text input, the candidate list and
    /// the saved list.
    pub fn with_search_page() -> (Self, PageHandles) {
        let mut doc = Self::new();
        let body = doc.body();

        let block = doc.create_element("div");
        doc.add_class(block, "search-block");
        let input = doc.create_element("input");
        let candidates = doc.create_element("div");
        doc.add_class(candidates, "search-block__results");
        doc.append_child(block, input);
        doc.append_child(block, candidates);

        let saved = doc.create_element("div");
        doc.add_class(saved, "saved");

        doc.append_child(body, block);
        doc.append_child(body, saved);

        (
            doc,
            PageHandles {
                input,
                candidates,
                saved,
            },
        )
    }

    pub fn body(&self) -> NodeId {
        self.body.unwrap_or(NodeId(0))
    }

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Some(Element {
            tag: tag.to_string(),
            ..Default::default()
        }));
        id
    }

    pub fn get(&self, node: NodeId) -> Option<&Element> {
        self.nodes.get(node.0).and_then(Option::as_ref)
    }

    fn get_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        self.nodes.get_mut(node.0).and_then(Option::as_mut)
    }

    pub fn exists(&self, node: NodeId) -> bool {
        self.get(node).is_some()
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(el) = self.get_mut(node) {
            if !el.classes.iter().any(|c| c == class) {
                el.classes.push(class.to_string());
            }
        }
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.get(node)
            .map(|el| el.classes.iter().any(|c| c == class))
            .unwrap_or(false)
    }

    pub fn set_text(&mut self, node: NodeId, text: impl Into<String>) {
        if let Some(el) = self.get_mut(node) {
            el.text = text.into();
        }
    }

    /// Own text followed by the text of every descendant, depth first
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node, &mut out);
        out
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        if let Some(el) = self.get(node) {
            out.push_str(&el.text);
            for child in &el.children {
                self.collect_text(*child, out);
            }
        }
    }

    pub fn set_data(&mut self, node: NodeId, key: &str, value: impl Into<String>) {
        if let Some(el) = self.get_mut(node) {
            el.dataset.insert(key.to_string(), value.into());
        }
    }

    pub fn data(&self, node: NodeId, key: &str) -> Option<&str> {
        self.get(node)
            .and_then(|el| el.dataset.get(key))
            .map(String::as_str)
    }

    pub fn value(&self, node: NodeId) -> &str {
        self.get(node).map(|el| el.value.as_str()).unwrap_or("")
    }

    pub fn set_value(&mut self, node: NodeId, value: impl Into<String>) {
        if let Some(el) = self.get_mut(node) {
            el.value = value.into();
        }
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.get(node).and_then(|el| el.parent)
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.get(node).map(|el| el.children.as_slice()).unwrap_or(&[])
    }

    /// Moves `child` under `parent`, detaching it from any previous parent
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if parent == child || !self.exists(parent) || !self.exists(child) {
            return;
        }
        if self.is_inclusive_descendant(parent, child) {
            return;
        }
        self.detach(child);
        if let Some(el) = self.get_mut(child) {
            el.parent = Some(parent);
        }
        if let Some(el) = self.get_mut(parent) {
            el.children.push(child);
        }
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.parent(node) {
            if let Some(el) = self.get_mut(parent) {
                el.children.retain(|c| *c != node);
            }
        }
        if let Some(el) = self.get_mut(node) {
            el.parent = None;
        }
    }

    /// Detaches `node` and drops it with all of its descendants
    pub fn remove(&mut self, node: NodeId) {
        if !self.exists(node) || Some(node) == self.body {
            return;
        }
        self.detach(node);
        self.drop_subtree(node);
    }

    fn drop_subtree(&mut self, node: NodeId) {
        let children = match self.nodes.get_mut(node.0).and_then(Option::take) {
            Some(el) => el.children,
            None => return,
        };
        for child in children {
            self.drop_subtree(child);
        }
    }

    /// Removes every child of `node`; a no-op on an empty element
    pub fn clear_children(&mut self, node: NodeId) {
        let children = match self.get_mut(node) {
            Some(el) => std::mem::take(&mut el.children),
            None => return,
        };
        for child in children {
            self.drop_subtree(child);
        }
    }

    /// True when `node` is `ancestor` or sits somewhere below it
    pub fn is_inclusive_descendant(&self, node: NodeId, ancestor: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if !self.exists(id) {
                return false;
            }
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Nearest inclusive ancestor of `node` carrying `class`
    pub fn closest(&self, node: NodeId, class: &str) -> Option<NodeId> {
        let mut current = Some(node);
        while let Some(id) = current {
            if !self.exists(id) {
                return None;
            }
            if self.has_class(id, class) {
                return Some(id);
            }
            current = self.parent(id);
        }
        None
    }

    /// Number of live elements, including the body
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }
}
