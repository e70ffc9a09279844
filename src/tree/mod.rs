//! Test tree model.
//!
//! Nodes live in an arena owned by [`Tree`] and refer to each other through
//! [`NodeId`] handles. Ownership flows strictly from the arena; a node's
//! `parent` is a plain index and never keeps anything alive.
//!
//! Structure is fixed once [`parse_listing`] returns: only display state
//! (`expanded`, `selected`, `status`) changes afterwards.

mod layout;
mod listing;
mod navigation;

pub use layout::{
    compute_alignment, display_label, display_width, render_row, render_rows, self_position,
    visible_rows, RenderRow, SymbolSet, DEFAULT_INDENT_WIDTH,
};
pub use listing::{parse_listing, SYNTHETIC_ROOT_NAME};
pub use navigation::{down, enter, left, navigate, right, up};

use crate::Status;

/// Separator between path segments in a node's fully-qualified path.
pub const PATH_SEPARATOR: &str = "/";

/// Handle to a node inside a [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in the arena (creation order).
    pub fn index(self) -> usize {
        self.0
    }
}

/// Variant payload distinguishing directories from tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// A path segment (directory or module file) that groups other nodes.
    Directory {
        /// Children in the order the listing introduced them.
        children: Vec<NodeId>,
        /// Whether children are visible and reachable with `Right`.
        expanded: bool,
    },
    /// A single test function.
    Leaf,
}

/// A directory or test in the tree.
#[derive(Debug, Clone)]
pub struct Node {
    name: String,
    parent: Option<NodeId>,
    selected: bool,
    status: Status,
    kind: NodeKind,
}

impl Node {
    fn directory(name: String, parent: Option<NodeId>) -> Self {
        Self {
            name,
            parent,
            selected: false,
            status: Status::NotRun,
            kind: NodeKind::Directory {
                children: Vec::new(),
                expanded: true,
            },
        }
    }

    fn leaf(name: String, parent: NodeId) -> Self {
        Self {
            name,
            parent: Some(parent),
            selected: false,
            status: Status::NotRun,
            kind: NodeKind::Leaf,
        }
    }

    /// Raw name: a path segment (possibly with a file suffix) or a function name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The owning directory, `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Whether this node carries the cursor.
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Status of the last run that targeted this node.
    pub fn status(&self) -> Status {
        self.status
    }

    /// Directory or leaf payload.
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Returns `true` for directory nodes.
    pub fn is_directory(&self) -> bool {
        matches!(self.kind, NodeKind::Directory { .. })
    }

    /// Returns `true` for an expanded directory; always `false` for leaves.
    pub fn is_expanded(&self) -> bool {
        matches!(self.kind, NodeKind::Directory { expanded: true, .. })
    }

    /// Children in insertion order; empty for leaves.
    pub fn children(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::Directory { children, .. } => children,
            NodeKind::Leaf => &[],
        }
    }
}

/// Arena of nodes with a single root directory.
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Tree {
    /// Creates a tree holding only a root directory, which carries the cursor.
    pub(crate) fn with_root(name: impl Into<String>) -> Self {
        let mut root = Node::directory(name.into(), None);
        root.selected = true;
        Self {
            nodes: vec![root],
            root: NodeId(0),
        }
    }

    /// Appends a directory under `parent`. The parent must be a directory.
    pub(crate) fn add_directory(&mut self, parent: NodeId, name: impl Into<String>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::directory(name.into(), Some(parent)));
        self.attach(parent, id);
        id
    }

    /// Appends a test under `parent`. The parent must be a directory.
    pub(crate) fn add_leaf(&mut self, parent: NodeId, name: impl Into<String>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::leaf(name.into(), parent));
        self.attach(parent, id);
        id
    }

    fn attach(&mut self, parent: NodeId, child: NodeId) {
        match &mut self.nodes[parent.0].kind {
            NodeKind::Directory { children, .. } => children.push(child),
            NodeKind::Leaf => debug_assert!(false, "leaf nodes cannot own children"),
        }
    }

    /// The root node id.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Borrows a node. Ids only come from this tree, so lookups cannot miss.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Total node count, hidden nodes and the root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// All node ids in creation order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Ids of every node whose `selected` flag is set.
    pub fn selected(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.ids().filter(|&id| self.node(id).selected)
    }

    /// Number of leaf (test) nodes.
    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| !n.is_directory()).count()
    }

    /// Children of `id`; empty for leaves.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).children()
    }

    /// Children of `id`'s parent, including `id`; empty for the root.
    pub fn siblings(&self, id: NodeId) -> &[NodeId] {
        match self.node(id).parent {
            Some(parent) => self.children(parent),
            None => &[],
        }
    }

    /// Position of `id` among its siblings, `None` for the root.
    pub fn index_in_parent(&self, id: NodeId) -> Option<usize> {
        self.siblings(id).iter().position(|&s| s == id)
    }

    /// Distance from the root: `depth(root) == 0`.
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = self.node(id).parent;
        while let Some(parent) = current {
            depth += 1;
            current = self.node(parent).parent;
        }
        depth
    }

    /// Names from the root down to `id`, inclusive.
    pub fn path_segments(&self, id: NodeId) -> Vec<&str> {
        let mut segments = vec![self.node(id).name.as_str()];
        let mut current = self.node(id).parent;
        while let Some(parent) = current {
            segments.push(self.node(parent).name.as_str());
            current = self.node(parent).parent;
        }
        segments.reverse();
        segments
    }

    /// Fully-qualified path: ancestor names joined with `/`, no leading separator.
    pub fn path(&self, id: NodeId) -> String {
        self.path_segments(id).join(PATH_SEPARATOR)
    }

    /// Flips `expanded` on a directory and returns the new value.
    ///
    /// Leaves are left alone and report `false`.
    pub fn toggle_expanded(&mut self, id: NodeId) -> bool {
        match &mut self.nodes[id.0].kind {
            NodeKind::Directory { expanded, .. } => {
                *expanded = !*expanded;
                *expanded
            }
            NodeKind::Leaf => false,
        }
    }

    /// Sets `expanded` on a directory; no effect on leaves.
    pub fn set_expanded(&mut self, id: NodeId, value: bool) {
        if let NodeKind::Directory { expanded, .. } = &mut self.nodes[id.0].kind {
            *expanded = value;
        }
    }

    /// Records the outcome of a run on a single node.
    pub fn set_status(&mut self, id: NodeId, status: Status) {
        self.nodes[id.0].status = status;
    }

    /// Moves the selection flag from `from` to `to`.
    ///
    /// Touches exactly those two flags, and nothing when they are the same node.
    pub(crate) fn move_selection(&mut self, from: NodeId, to: NodeId) {
        if from == to {
            return;
        }
        self.nodes[from.0].selected = false;
        self.nodes[to.0].selected = true;
    }
}
