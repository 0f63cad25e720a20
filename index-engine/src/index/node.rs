//! B+ tree node implementation.
//!
//! This module defines leaf and internal nodes and the arena that owns
//! them. Nodes reference each other by `NodeId` (an index into the
//! arena), so the leaf chain's `next` link is a plain id rather than a
//! second owner of the leaf.

use super::key::IndexKey;

/// A unique identifier for a node in the arena.
pub type NodeId = usize;

/// A constant to represent an invalid node ID (end of the leaf chain).
pub const INVALID_NODE_ID: NodeId = usize::MAX;

/// A leaf node holding a sorted run of indexed keys.
#[derive(Debug)]
pub struct Leaf {
    /// Keys in strictly increasing order, no duplicates.
    pub keys: Vec<IndexKey>,
    /// The next leaf in ascending key order, or `INVALID_NODE_ID`.
    pub next: NodeId,
}

impl Leaf {
    /// Creates an empty leaf with no successor.
    pub fn new() -> Self {
        Self {
            keys: Vec::new(),
            next: INVALID_NODE_ID,
        }
    }

    /// Performs binary search for a key.
    ///
    /// Returns Ok(index) if the key is found, or Err(index) indicating where
    /// the key should be inserted to maintain sorted order.
    pub fn binary_search(&self, key: &IndexKey) -> Result<usize, usize> {
        self.keys.binary_search_by(|probe| probe.compare(key))
    }

    /// Inserts a key at the specified index, shifting later keys right.
    pub fn insert_at(&mut self, index: usize, key: IndexKey) {
        assert!(index <= self.keys.len(), "Insert index out of bounds");
        self.keys.insert(index, key);
    }
}

impl Default for Leaf {
    fn default() -> Self {
        Self::new()
    }
}

/// An internal node holding separator keys and child references.
///
/// Separators route searches only; they are not members of the indexed
/// key set. `children` always has exactly one more entry than `keys`.
#[derive(Debug)]
pub struct InternalNode {
    /// Separator keys in strictly increasing order.
    pub keys: Vec<IndexKey>,
    /// Child node ids, length = keys.len() + 1.
    pub children: Vec<NodeId>,
}

impl InternalNode {
    /// Creates an internal node from separators and children.
    pub fn new(keys: Vec<IndexKey>, children: Vec<NodeId>) -> Self {
        assert_eq!(
            children.len(),
            keys.len() + 1,
            "Internal node needs one more child than keys"
        );
        Self { keys, children }
    }

    /// Performs binary search for a key among the separators.
    ///
    /// Returns Ok(index) if the key equals a separator, or Err(index)
    /// with the insertion point.
    pub fn binary_search(&self, key: &IndexKey) -> Result<usize, usize> {
        self.keys.binary_search_by(|probe| probe.compare(key))
    }

    /// Returns the index of the child subtree that covers `key`.
    ///
    /// Keys equal to a separator route to the right of that separator.
    pub fn child_index(&self, key: &IndexKey) -> usize {
        match self.binary_search(key) {
            Ok(i) => i + 1, // Key equals a separator, go to right child
            Err(i) => i,    // i is the insertion point
        }
    }

    /// Inserts a separator and its right child at the specified index.
    ///
    /// The new child becomes the right neighbor of the new separator.
    pub fn insert_key_child(&mut self, index: usize, key: IndexKey, right_child: NodeId) {
        assert!(index <= self.keys.len(), "Insert index out of bounds");
        self.keys.insert(index, key);
        self.children.insert(index + 1, right_child);
    }
}

/// A B+ tree node, either a leaf or an internal node.
#[derive(Debug)]
pub enum Node {
    Leaf(Leaf),
    Internal(InternalNode),
}

impl Node {
    /// Returns whether this node is a leaf node.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }
}

/// The arena owning every node of a tree.
///
/// Nodes are allocated once and never freed; the tree is insert-only, so
/// a node id stays valid for the lifetime of the tree.
#[derive(Debug, Default)]
pub struct NodeArena {
    nodes: Vec<Node>,
}

impl NodeArena {
    /// Creates an empty arena.
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Stores a node and returns its id.
    pub fn alloc(&mut self, node: Node) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(node);
        id
    }

    /// Returns the node with the given id.
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// Returns the node with the given id, mutably.
    pub fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id]
    }

    /// Returns the leaf with the given id.
    ///
    /// # Panics
    /// Panics if the id refers to an internal node.
    pub fn leaf(&self, id: NodeId) -> &Leaf {
        match &self.nodes[id] {
            Node::Leaf(leaf) => leaf,
            Node::Internal(_) => panic!("leaf() called on internal node {}", id),
        }
    }

    /// Returns the leaf with the given id, mutably.
    ///
    /// # Panics
    /// Panics if the id refers to an internal node.
    pub fn leaf_mut(&mut self, id: NodeId) -> &mut Leaf {
        match &mut self.nodes[id] {
            Node::Leaf(leaf) => leaf,
            Node::Internal(_) => panic!("leaf_mut() called on internal node {}", id),
        }
    }

    /// Returns the internal node with the given id, mutably.
    ///
    /// # Panics
    /// Panics if the id refers to a leaf node.
    pub fn internal_mut(&mut self, id: NodeId) -> &mut InternalNode {
        match &mut self.nodes[id] {
            Node::Internal(node) => node,
            Node::Leaf(_) => panic!("internal_mut() called on leaf node {}", id),
        }
    }

    /// Returns the number of nodes allocated so far.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns whether the arena is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
