//! B+ tree implementation over the node arena.
//!
//! This module implements an insert-only B+ tree index with the
//! following features:
//! - Recursive insert with split/promotion propagation
//! - Silent no-op on duplicate keys
//! - Ordered key enumeration via the leaf chain
//! - Structural statistics and a level-by-level rendering

use std::fmt;

use super::iterator::KeyIterator;
use super::key::IndexKey;
use super::node::{InternalNode, Leaf, Node, NodeArena, NodeId, INVALID_NODE_ID};

/// Structural statistics of a B+ tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexStats {
    /// Number of levels, counting the root level (a root-leaf tree has height 1).
    pub height: usize,
    /// Number of internal nodes.
    pub num_nodes: usize,
    /// Number of leaves.
    pub num_leaves: usize,
    /// Number of indexed keys (separators are not counted).
    pub num_keys: usize,
}

/// An in-memory B+ tree index over unique orderable keys.
///
/// Every node shares the same key capacity, fixed at construction. The
/// tree grows in height only when a split propagates all the way to the
/// root, so all leaves stay at the same depth.
pub struct BPlusTree {
    arena: NodeArena,
    root: NodeId,
    capacity: usize,
}

impl BPlusTree {
    /// Creates an empty B+ tree whose nodes hold at most `capacity` keys.
    ///
    /// # Panics
    /// Panics if `capacity` is zero; splitting is ill-defined below one
    /// key per node.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity >= 1, "B+ tree capacity must be at least 1");
        let mut arena = NodeArena::new();
        let root = arena.alloc(Node::Leaf(Leaf::new()));
        Self {
            arena,
            root,
            capacity,
        }
    }

    /// Returns the per-node key capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the arena holding the tree's nodes.
    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    /// Returns the id of the root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    // ===== SEARCH OPERATION =====

    /// Returns whether `key` is present in the tree.
    pub fn search(&self, key: &IndexKey) -> bool {
        let mut current_id = self.root;

        loop {
            match self.arena.get(current_id) {
                Node::Leaf(leaf) => return leaf.binary_search(key).is_ok(),
                Node::Internal(node) => {
                    current_id = node.children[node.child_index(key)];
                }
            }
        }
    }

    // ===== INSERT OPERATION =====

    /// Inserts a key into the tree.
    ///
    /// Inserting a key that is already present leaves the tree unchanged.
    /// If the insert propagates a split up to the root, a new internal
    /// root is created with the old root and the new sibling as its two
    /// children; this is the only way the tree gains a level.
    pub fn insert(&mut self, key: IndexKey) {
        if let Some((promoted, sibling_id)) = self.insert_into(self.root, key) {
            let old_root = self.root;
            self.root = self.arena.alloc(Node::Internal(InternalNode::new(
                vec![promoted],
                vec![old_root, sibling_id],
            )));
        }
    }

    /// Recursive insert into the subtree rooted at `node_id`.
    ///
    /// Returns the promotion produced if this node had to split: the
    /// separator to hand to the parent and the id of the newly created
    /// right sibling.
    fn insert_into(&mut self, node_id: NodeId, key: IndexKey) -> Option<(IndexKey, NodeId)> {
        let child_id = match self.arena.get(node_id) {
            Node::Leaf(_) => return self.insert_into_leaf(node_id, key),
            Node::Internal(node) => node.children[node.child_index(&key)],
        };

        let (promoted, sibling_id) = self.insert_into(child_id, key)?;

        // Separators are unique, so lower and upper bound coincide
        let node = self.arena.internal_mut(node_id);
        let position = match node.binary_search(&promoted) {
            Ok(i) | Err(i) => i,
        };
        node.insert_key_child(position, promoted, sibling_id);

        if node.keys.len() > self.capacity {
            return Some(self.split_internal(node_id));
        }
        None
    }

    /// Inserts a key into a leaf, splitting it on overflow.
    fn insert_into_leaf(&mut self, leaf_id: NodeId, key: IndexKey) -> Option<(IndexKey, NodeId)> {
        let leaf = self.arena.leaf_mut(leaf_id);

        match leaf.binary_search(&key) {
            // Duplicate key: the tree is left unchanged
            Ok(_) => return None,
            Err(index) => leaf.insert_at(index, key),
        }

        if leaf.keys.len() > self.capacity {
            return Some(self.split_leaf(leaf_id));
        }
        None
    }

    /// Splits an overflowing leaf.
    ///
    /// The new right sibling takes the upper half of the keys and the
    /// current `next` link; this leaf's `next` is pointed at the sibling.
    /// The promoted separator is the sibling's first key and stays in the
    /// sibling: leaf keys are data, not routing information.
    fn split_leaf(&mut self, leaf_id: NodeId) -> (IndexKey, NodeId) {
        let split_index = (self.capacity + 1) / 2;

        let leaf = self.arena.leaf_mut(leaf_id);
        let sibling_keys = leaf.keys.split_off(split_index);
        let old_next = leaf.next;

        let promoted = sibling_keys[0].clone();

        let sibling_id = self.arena.alloc(Node::Leaf(Leaf {
            keys: sibling_keys,
            next: old_next,
        }));
        self.arena.leaf_mut(leaf_id).next = sibling_id;

        (promoted, sibling_id)
    }

    /// Splits an overflowing internal node.
    ///
    /// Unlike a leaf split, the promoted separator is removed from both
    /// sides: it only exists one level up after the split.
    fn split_internal(&mut self, node_id: NodeId) -> (IndexKey, NodeId) {
        let split_index = (self.capacity + 1) / 2;

        let node = self.arena.internal_mut(node_id);
        let sibling_keys = node.keys.split_off(split_index + 1);
        let sibling_children = node.children.split_off(split_index + 1);
        let promoted = node.keys.remove(split_index);

        let sibling_id = self
            .arena
            .alloc(Node::Internal(InternalNode::new(sibling_keys, sibling_children)));

        (promoted, sibling_id)
    }

    // ===== ORDERED ENUMERATION =====

    /// Finds the leftmost (first) leaf in the tree.
    pub fn find_leftmost_leaf(&self) -> NodeId {
        let mut current_id = self.root;

        loop {
            match self.arena.get(current_id) {
                Node::Leaf(_) => return current_id,
                Node::Internal(node) => current_id = node.children[0],
            }
        }
    }

    /// Returns an iterator over all keys in ascending order.
    pub fn iter(&self) -> KeyIterator<'_> {
        KeyIterator::full_scan(&self.arena, self.find_leftmost_leaf())
    }

    /// Returns all keys in ascending order.
    pub fn keys(&self) -> Vec<IndexKey> {
        self.iter().cloned().collect()
    }

    // ===== STRUCTURAL STATISTICS =====

    /// Returns the height of the tree.
    ///
    /// The root holder counts as one level, so a tree whose root is a
    /// leaf reports height 1.
    pub fn height(&self) -> usize {
        self.subtree_height(self.root) + 1
    }

    /// Returns the number of internal nodes in the tree.
    pub fn num_nodes(&self) -> usize {
        self.subtree_nodes(self.root)
    }

    /// Returns the number of leaves in the tree.
    pub fn num_leaves(&self) -> usize {
        self.subtree_leaves(self.root)
    }

    /// Returns the number of indexed keys. Separators are not counted.
    pub fn num_keys(&self) -> usize {
        self.subtree_keys(self.root)
    }

    /// Returns the tree's structural statistics.
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            height: self.height(),
            num_nodes: self.num_nodes(),
            num_leaves: self.num_leaves(),
            num_keys: self.num_keys(),
        }
    }

    fn subtree_height(&self, node_id: NodeId) -> usize {
        match self.arena.get(node_id) {
            Node::Leaf(_) => 0,
            Node::Internal(node) => 1 + self.subtree_height(node.children[0]),
        }
    }

    fn subtree_nodes(&self, node_id: NodeId) -> usize {
        match self.arena.get(node_id) {
            Node::Leaf(_) => 0,
            Node::Internal(node) => {
                1 + node
                    .children
                    .iter()
                    .map(|&child_id| self.subtree_nodes(child_id))
                    .sum::<usize>()
            }
        }
    }

    fn subtree_leaves(&self, node_id: NodeId) -> usize {
        match self.arena.get(node_id) {
            Node::Leaf(_) => 1,
            Node::Internal(node) => node
                .children
                .iter()
                .map(|&child_id| self.subtree_leaves(child_id))
                .sum(),
        }
    }

    fn subtree_keys(&self, node_id: NodeId) -> usize {
        match self.arena.get(node_id) {
            Node::Leaf(leaf) => leaf.keys.len(),
            Node::Internal(node) => node
                .children
                .iter()
                .map(|&child_id| self.subtree_keys(child_id))
                .sum(),
        }
    }
}

/// Renders a node's key-set as `[k1, k2, ...]`.
fn fmt_keys(keys: &[IndexKey]) -> String {
    let rendered: Vec<String> = keys.iter().map(|key| key.to_string()).collect();
    format!("[{}]", rendered.join(", "))
}

impl fmt::Display for BPlusTree {
    /// Renders the tree one line per level, top down.
    ///
    /// Internal levels show each node's separator set left to right; the
    /// leaf level is walked via the chain and joined with `->`. For
    /// visual inspection only.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut level: Vec<NodeId> = vec![self.root];

        while !self.arena.get(level[0]).is_leaf() {
            let mut next_level = Vec::new();
            for (position, &node_id) in level.iter().enumerate() {
                if let Node::Internal(node) = self.arena.get(node_id) {
                    if position > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", fmt_keys(&node.keys))?;
                    next_level.extend_from_slice(&node.children);
                }
            }
            writeln!(f)?;
            level = next_level;
        }

        let mut current_id = level[0];
        loop {
            let leaf = self.arena.leaf(current_id);
            write!(f, "{}", fmt_keys(&leaf.keys))?;
            if leaf.next == INVALID_NODE_ID {
                break;
            }
            write!(f, "->")?;
            current_id = leaf.next;
        }
        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(val: i64) -> IndexKey {
        IndexKey::Integer(val)
    }

    #[test]
    fn test_bptree_create_and_search() {
        let tree = BPlusTree::new(3);

        assert!(!tree.search(&int(42)));
        assert_eq!(tree.height(), 1);
        assert!(tree.keys().is_empty());
    }

    #[test]
    #[should_panic(expected = "capacity must be at least 1")]
    fn test_bptree_rejects_zero_capacity() {
        let _ = BPlusTree::new(0);
    }

    #[test]
    fn test_bptree_simple_insert_and_search() {
        let mut tree = BPlusTree::new(3);
        tree.insert(int(10));

        assert!(tree.search(&int(10)));
        assert!(!tree.search(&int(20)));
        assert_eq!(tree.keys(), vec![int(10)]);
    }

    #[test]
    fn test_leaf_split_keeps_promoted_key() {
        let mut tree = BPlusTree::new(3);
        for key in [3, 8, 15, 32] {
            tree.insert(int(key));
        }

        // One leaf split: [3, 8] and [15, 32], separator 15 promoted but
        // still present in the right leaf
        assert_eq!(tree.height(), 2);
        assert!(tree.search(&int(8)));
        assert!(tree.search(&int(15)));
        assert!(!tree.search(&int(99)));
        assert_eq!(tree.keys(), vec![int(3), int(8), int(15), int(32)]);
    }

    #[test]
    fn test_duplicate_insert_is_noop() {
        let mut tree = BPlusTree::new(3);
        for _ in 0..3 {
            tree.insert(int(5));
        }

        let stats = tree.stats();
        assert_eq!(stats.num_keys, 1);
        assert_eq!(stats.height, 1);
        assert_eq!(tree.keys(), vec![int(5)]);
    }

    #[test]
    fn test_stats_after_split() {
        let mut tree = BPlusTree::new(3);
        for key in [3, 8, 15, 32] {
            tree.insert(int(key));
        }

        assert_eq!(
            tree.stats(),
            IndexStats {
                height: 2,
                num_nodes: 1,
                num_leaves: 2,
                num_keys: 4,
            }
        );
    }

    #[test]
    fn test_varchar_tree() {
        let mut tree = BPlusTree::new(2);
        for word in ["pear", "apple", "quince", "banana", "fig"] {
            tree.insert(IndexKey::from(word));
        }

        assert!(tree.search(&IndexKey::from("fig")));
        assert!(!tree.search(&IndexKey::from("grape")));
        assert_eq!(
            tree.keys(),
            vec![
                IndexKey::from("apple"),
                IndexKey::from("banana"),
                IndexKey::from("fig"),
                IndexKey::from("pear"),
                IndexKey::from("quince"),
            ]
        );
    }

    #[test]
    fn test_display_rendering() {
        let mut tree = BPlusTree::new(3);
        for key in [3, 8, 15, 32] {
            tree.insert(int(key));
        }

        assert_eq!(tree.to_string(), "[15]\n[3, 8]->[15, 32]\n");
    }

    #[test]
    fn test_display_root_leaf_only() {
        let mut tree = BPlusTree::new(3);
        tree.insert(int(1));
        tree.insert(int(2));

        assert_eq!(tree.to_string(), "[1, 2]\n");
    }

    #[test]
    fn test_minimum_capacity_growth() {
        let mut tree = BPlusTree::new(1);
        for key in 1..=7 {
            tree.insert(int(key));
        }

        assert_eq!(tree.num_keys(), 7);
        assert_eq!(tree.keys(), (1..=7).map(int).collect::<Vec<_>>());
        for key in 1..=7 {
            assert!(tree.search(&int(key)));
        }
        assert!(!tree.search(&int(0)));
        assert!(!tree.search(&int(8)));
    }
}
