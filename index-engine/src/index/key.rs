//! Key abstraction for B+ tree indexes.
//!
//! This module defines the key types that can be used in B+ tree indexes,
//! providing total ordering within a key type.

use std::cmp::Ordering;
use std::fmt;

/// A key value that can be stored in a B+ tree index.
///
/// Supports Integer and Varchar types. A single tree holds keys of one
/// type only; mixing types is a caller contract violation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IndexKey {
    /// An integer key value.
    Integer(i64),
    /// A variable-length string key value.
    Varchar(String),
}

impl IndexKey {
    /// Compares this key with another key.
    ///
    /// # Panics
    /// Panics if comparing keys of different types.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (IndexKey::Integer(a), IndexKey::Integer(b)) => a.cmp(b),
            (IndexKey::Varchar(a), IndexKey::Varchar(b)) => a.cmp(b),
            _ => panic!("Cannot compare keys of different types"),
        }
    }
}

impl PartialOrd for IndexKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.compare(other))
    }
}

impl Ord for IndexKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl fmt::Display for IndexKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexKey::Integer(val) => write!(f, "{}", val),
            IndexKey::Varchar(val) => write!(f, "{}", val),
        }
    }
}

impl From<i64> for IndexKey {
    fn from(val: i64) -> Self {
        IndexKey::Integer(val)
    }
}

impl From<&str> for IndexKey {
    fn from(val: &str) -> Self {
        IndexKey::Varchar(val.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_key_comparison() {
        let key1 = IndexKey::Integer(10);
        let key2 = IndexKey::Integer(20);
        let key3 = IndexKey::Integer(10);

        assert_eq!(key1.compare(&key2), Ordering::Less);
        assert_eq!(key2.compare(&key1), Ordering::Greater);
        assert_eq!(key1.compare(&key3), Ordering::Equal);
    }

    #[test]
    fn test_varchar_key_comparison() {
        let key1 = IndexKey::Varchar("apple".to_string());
        let key2 = IndexKey::Varchar("banana".to_string());
        let key3 = IndexKey::Varchar("apple".to_string());

        assert_eq!(key1.compare(&key2), Ordering::Less);
        assert_eq!(key2.compare(&key1), Ordering::Greater);
        assert_eq!(key1.compare(&key3), Ordering::Equal);
    }

    #[test]
    #[should_panic(expected = "Cannot compare keys of different types")]
    fn test_mixed_key_comparison_panics() {
        let key1 = IndexKey::Integer(10);
        let key2 = IndexKey::Varchar("apple".to_string());
        let _ = key1.compare(&key2);
    }

    #[test]
    fn test_key_display() {
        assert_eq!(IndexKey::Integer(42).to_string(), "42");
        assert_eq!(IndexKey::Varchar("hello".to_string()).to_string(), "hello");
    }

    #[test]
    fn test_key_from_conversions() {
        assert_eq!(IndexKey::from(7), IndexKey::Integer(7));
        assert_eq!(IndexKey::from("abc"), IndexKey::Varchar("abc".to_string()));
    }
}
