pub mod parser;
pub mod css;

use std::collections::HashMap;

use css::InlineStyle;

/// Index of a node inside its `Document` arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    Document,
    Element,
    Text,
}

/// A single node. Elements keep their class list separately from the other
/// attributes because class flags are what the view controller writes.
#[derive(Debug, Clone)]
pub struct DomNode {
    pub tag: String,
    pub attributes: HashMap<String, String>,
    pub classes: Vec<String>,
    pub text: String,
    pub children: Vec<NodeId>,
    pub parent: Option<NodeId>,
    pub node_type: NodeType,
    pub style: InlineStyle,
}

impl DomNode {
    fn new(node_type: NodeType, tag: String, parent: Option<NodeId>) -> Self {
        Self {
            tag,
            attributes: HashMap::new(),
            classes: Vec::new(),
            text: String::new(),
            children: Vec::new(),
            parent,
            node_type,
            style: InlineStyle::default(),
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|s| s.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn is_element(&self) -> bool {
        self.node_type == NodeType::Element
    }
}

/// Mutable document tree. Nodes are never removed, so a `NodeId` stays
/// valid for the lifetime of the page.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<DomNode>,
    pub url: String,
    pub title: String,
}

impl Document {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            nodes: vec![DomNode::new(NodeType::Document, "#document".into(), None)],
            url: url.into(),
            title: String::new(),
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    pub fn node(&self, id: NodeId) -> &DomNode {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut DomNode {
        &mut self.nodes[id.0]
    }

    /// Append a new element under `parent`.
    pub fn create_element(&mut self, parent: NodeId, tag: &str, classes: &[&str]) -> NodeId {
        let id = NodeId(self.nodes.len());
        let mut node = DomNode::new(NodeType::Element, tag.to_string(), Some(parent));
        node.classes = classes.iter().map(|c| c.to_string()).collect();
        self.nodes.push(node);
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Append a text node under `parent`.
    pub fn create_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        let mut node = DomNode::new(NodeType::Text, String::new(), Some(parent));
        node.text = text.to_string();
        self.nodes.push(node);
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.node(id).attr(name)
    }

    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        self.node_mut(id)
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    pub fn remove_attr(&mut self, id: NodeId, name: &str) {
        self.node_mut(id).attributes.remove(name);
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.node(id).has_class(class)
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) {
        let node = self.node_mut(id);
        if !node.has_class(class) {
            node.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        self.node_mut(id).classes.retain(|c| c != class);
    }

    pub fn set_class(&mut self, id: NodeId, class: &str, on: bool) {
        if on {
            self.add_class(id, class);
        } else {
            self.remove_class(id, class);
        }
    }

    /// All nodes below `id` in document order (excluding `id` itself).
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_descendants(id, &mut out);
        out
    }

    fn collect_descendants(&self, id: NodeId, out: &mut Vec<NodeId>) {
        for &child in &self.node(id).children {
            out.push(child);
            self.collect_descendants(child, out);
        }
    }

    /// Direct element children of `id`.
    pub fn element_children(&self, id: NodeId) -> Vec<NodeId> {
        self.node(id)
            .children
            .iter()
            .copied()
            .filter(|&c| self.node(c).is_element())
            .collect()
    }

    pub fn element_by_id(&self, html_id: &str) -> Option<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .find(|&n| self.node(n).attr("id") == Some(html_id))
    }

    pub fn elements_with_class(&self, class: &str) -> Vec<NodeId> {
        self.elements_with_class_in(self.root(), class)
    }

    pub fn elements_with_class_in(&self, scope: NodeId, class: &str) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|&n| self.node(n).has_class(class))
            .collect()
    }

    pub fn elements_with_tag(&self, tag: &str) -> Vec<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .filter(|&n| self.node(n).is_element() && self.node(n).tag == tag)
            .collect()
    }

    pub fn first_with_class(&self, class: &str) -> Option<NodeId> {
        self.elements_with_class(class).into_iter().next()
    }

    /// Whether `ancestor` is `node` or one of its ancestors.
    pub fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cur = Some(node);
        while let Some(id) = cur {
            if id == ancestor {
                return true;
            }
            cur = self.node(id).parent;
        }
        false
    }

    /// Nearest node at or above `node` matching `pred`.
    pub fn closest(&self, node: NodeId, pred: impl Fn(&DomNode) -> bool) -> Option<NodeId> {
        let mut cur = Some(node);
        while let Some(id) = cur {
            if pred(self.node(id)) {
                return Some(id);
            }
            cur = self.node(id).parent;
        }
        None
    }

    /// Concatenated, trimmed text of the subtree.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut buf = String::new();
        self.collect_text_inner(id, &mut buf);
        buf
    }

    fn collect_text_inner(&self, id: NodeId, buf: &mut String) {
        let node = self.node(id);
        if !node.text.trim().is_empty() {
            if !buf.is_empty() {
                buf.push(' ');
            }
            buf.push_str(node.text.trim());
        }
        for &child in &node.children {
            self.collect_text_inner(child, buf);
        }
    }

    /// Replace the element's content with a single text node and return it.
    /// The first existing text child is rewritten in place; any other
    /// children are detached but stay in the arena.
    pub fn set_text(&mut self, id: NodeId, text: &str) -> NodeId {
        let old = std::mem::take(&mut self.node_mut(id).children);
        let reused = old
            .iter()
            .copied()
            .find(|&c| self.node(c).node_type == NodeType::Text);
        for child in old {
            if Some(child) != reused {
                self.node_mut(child).parent = None;
            }
        }
        match reused {
            Some(child) => {
                self.node_mut(child).text = text.to_string();
                self.node_mut(id).children.push(child);
                child
            }
            None => self.create_text(id, text),
        }
    }

    pub fn style(&self, id: NodeId) -> &InlineStyle {
        &self.node(id).style
    }

    pub fn style_mut(&mut self, id: NodeId) -> &mut InlineStyle {
        &mut self.node_mut(id).style
    }
}
