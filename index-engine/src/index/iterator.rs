//! B+ tree key iterator.
//!
//! Provides ordered full-key enumeration by following the leaf chain,
//! without touching internal nodes.

use super::key::IndexKey;
use super::node::{NodeArena, NodeId, INVALID_NODE_ID};

/// An iterator over the keys of a B+ tree in ascending order.
///
/// The iterator follows the leaf chain from a starting leaf, yielding
/// keys until the end of the chain.
pub struct KeyIterator<'a> {
    arena: &'a NodeArena,
    current_id: NodeId,
    current_index: usize,
}

impl<'a> KeyIterator<'a> {
    /// Creates a new key iterator.
    ///
    /// # Arguments
    /// * `arena` - The arena holding the tree's nodes
    /// * `start_id` - The leaf to start from
    /// * `start_index` - The index within the start leaf
    pub fn new(arena: &'a NodeArena, start_id: NodeId, start_index: usize) -> Self {
        Self {
            arena,
            current_id: start_id,
            current_index: start_index,
        }
    }

    /// Creates an iterator that scans an entire leaf chain.
    pub fn full_scan(arena: &'a NodeArena, start_id: NodeId) -> Self {
        Self::new(arena, start_id, 0)
    }
}

impl<'a> Iterator for KeyIterator<'a> {
    type Item = &'a IndexKey;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.current_id == INVALID_NODE_ID {
                return None;
            }

            let leaf = self.arena.leaf(self.current_id);

            // Check if we've exhausted the current leaf
            if self.current_index >= leaf.keys.len() {
                self.current_id = leaf.next;
                self.current_index = 0;
                continue;
            }

            let key = &leaf.keys[self.current_index];
            self.current_index += 1;

            return Some(key);
        }
    }
}
