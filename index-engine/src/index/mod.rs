//! B+ tree index implementation.
//!
//! This module provides an in-memory B+ tree index with:
//! - Support for Integer and Varchar keys
//! - Ordered full-key enumeration via the leaf chain
//! - Structural statistics and a level-by-level textual rendering

pub mod key;
pub mod node;
pub mod bptree;
pub mod iterator;

// Re-export main types
pub use key::IndexKey;
pub use node::{Node, NodeArena, NodeId, INVALID_NODE_ID};
pub use bptree::{BPlusTree, IndexStats};
pub use iterator::KeyIterator;
