//! In-memory ordered index engine.
//!
//! Provides a B+ tree over unique orderable keys: internal nodes route by
//! separator keys, leaves hold the indexed key set and are chained for
//! ordered traversal.

pub mod index;

pub use index::{BPlusTree, IndexKey, IndexStats, KeyIterator};
