//! Arena-backed element tree standing in for the mount-point subtree.
//!
//! The tree under the single mount root is the only shared mutable surface
//! in the engine. Navigation replaces the mount's children in one synchronous
//! step; the displaced subtree is detached, and `NodeId` handles into it stay
//! usable but inert: detached nodes are unreachable from live queries and the
//! engine ignores clicks on them. Nothing is ever freed during a session, so
//! a late async completion writing through an old handle mutates a fragment
//! nobody can see.

use crate::actions::Action;

/// Handle to a node in a [`Document`]. Copyable; never dangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// One element: tag, identity, display text, and input state.
#[derive(Debug, Clone, Default)]
pub struct Node {
    pub tag: String,
    pub id: Option<String>,
    pub name: Option<String>,
    pub classes: Vec<String>,
    pub text: String,
    pub value: String,
    pub checked: bool,
    pub read_only: bool,
    pub required: bool,
    pub max_length: Option<usize>,
    pub custom_validity: String,
    on_click: Option<Action>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    attached: bool,
}

impl Node {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }
}

/// The element arena. The root node is the mount point.
#[derive(Debug)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Document {
    pub fn new() -> Self {
        let mut root = Node::new("main").with_id("app");
        root.attached = true;
        Self {
            nodes: vec![root],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Add a node to the arena, initially detached.
    pub fn create(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn is_attached(&self, id: NodeId) -> bool {
        self.nodes[id.0].attached
    }

    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
        if self.nodes[parent.0].attached {
            self.set_attached(child, true);
        }
    }

    /// Fully replace `parent`'s contents in one synchronous step. The old
    /// subtree is detached along with any action bindings it carried.
    pub fn replace_children(&mut self, parent: NodeId, children: Vec<NodeId>) {
        self.clear_children(parent);
        for child in children {
            self.append(parent, child);
        }
    }

    pub fn clear_children(&mut self, parent: NodeId) {
        let old = std::mem::take(&mut self.nodes[parent.0].children);
        for child in old {
            self.nodes[child.0].parent = None;
            self.set_attached(child, false);
        }
    }

    /// Detach a single node from its parent (e.g. removing a table row).
    pub fn remove(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.0].parent.take() {
            self.nodes[parent.0].children.retain(|child| *child != id);
        }
        self.set_attached(id, false);
    }

    fn set_attached(&mut self, id: NodeId, attached: bool) {
        self.nodes[id.0].attached = attached;
        let children = self.nodes[id.0].children.clone();
        for child in children {
            self.set_attached(child, attached);
        }
    }

    // ------------------------------------------------------------------------
    // Queries (live subtree only)
    // ------------------------------------------------------------------------

    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.find_from(self.root, &|node| node.id.as_deref() == Some(id))
    }

    /// First descendant of `scope` (inclusive) with the given id.
    pub fn descendant_by_id(&self, scope: NodeId, id: &str) -> Option<NodeId> {
        self.find_from(scope, &|node| node.id.as_deref() == Some(id))
    }

    /// First descendant of `scope` (inclusive) with the given `name`.
    pub fn query_by_name(&self, scope: NodeId, name: &str) -> Option<NodeId> {
        self.find_from(scope, &|node| node.name.as_deref() == Some(name))
    }

    fn find_from(&self, from: NodeId, matches: &dyn Fn(&Node) -> bool) -> Option<NodeId> {
        let node = &self.nodes[from.0];
        if matches(node) {
            return Some(from);
        }
        node.children
            .iter()
            .find_map(|child| self.find_from(*child, matches))
    }

    // ------------------------------------------------------------------------
    // Node state
    // ------------------------------------------------------------------------

    pub fn value(&self, id: NodeId) -> &str {
        &self.nodes[id.0].value
    }

    pub fn set_value(&mut self, id: NodeId, value: &str) {
        self.nodes[id.0].value = value.to_string();
    }

    pub fn text(&self, id: NodeId) -> &str {
        &self.nodes[id.0].text
    }

    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) {
        self.nodes[id.0].text = text.into();
    }

    pub fn is_checked(&self, id: NodeId) -> bool {
        self.nodes[id.0].checked
    }

    pub fn set_checked(&mut self, id: NodeId, checked: bool) {
        self.nodes[id.0].checked = checked;
    }

    pub fn set_read_only(&mut self, id: NodeId, read_only: bool) {
        self.nodes[id.0].read_only = read_only;
    }

    pub fn set_required(&mut self, id: NodeId, required: bool) {
        self.nodes[id.0].required = required;
    }

    pub fn set_max_length(&mut self, id: NodeId, max_length: usize) {
        self.nodes[id.0].max_length = Some(max_length);
    }

    pub fn custom_validity(&self, id: NodeId) -> &str {
        &self.nodes[id.0].custom_validity
    }

    pub fn set_custom_validity(&mut self, id: NodeId, message: &str) {
        self.nodes[id.0].custom_validity = message.to_string();
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.nodes[id.0].classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if !self.has_class(id, class) {
            self.nodes[id.0].classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        self.nodes[id.0].classes.retain(|c| c != class);
    }

    pub fn click_action(&self, id: NodeId) -> Option<&Action> {
        self.nodes[id.0].on_click.as_ref()
    }

    pub fn set_on_click(&mut self, id: NodeId, action: Action) {
        self.nodes[id.0].on_click = Some(action);
    }

    // ------------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------------

    /// Plain-text dump of the live tree for shells and test diagnostics.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_node(self.root, 0, &mut out);
        out
    }

    fn render_node(&self, id: NodeId, depth: usize, out: &mut String) {
        let node = &self.nodes[id.0];
        out.push_str(&"  ".repeat(depth));
        out.push('<');
        out.push_str(&node.tag);
        if let Some(id) = &node.id {
            out.push_str(&format!(" #{id}"));
        }
        if let Some(name) = &node.name {
            out.push_str(&format!(" name={name}"));
        }
        if !node.classes.is_empty() {
            out.push_str(&format!(" .{}", node.classes.join(".")));
        }
        out.push('>');
        if !node.text.is_empty() {
            out.push_str(&format!(" {}", node.text));
        }
        if !node.value.is_empty() {
            out.push_str(&format!(" [value={}]", node.value));
        }
        if node.checked {
            out.push_str(" [checked]");
        }
        out.push('\n');
        for child in &node.children {
            self.render_node(*child, depth + 1, out);
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
