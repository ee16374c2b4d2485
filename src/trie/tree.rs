//! Persistent copy-on-write trie

use super::node::{TrieNode, Value};
use std::any::Any;
use std::sync::Arc;
use tracing::{debug, trace};

/// An immutable trie mapping byte keys to values of any type
///
/// Every mutation returns a new `Trie` and leaves the receiver untouched.
/// Only the nodes on the mutated key's path are copied; every other subtree
/// is shared by reference between the old and new versions. Cloning a
/// `Trie` is cheap and shares the whole structure.
#[derive(Clone, Debug, Default)]
pub struct Trie {
    root: Option<Arc<TrieNode>>,
}

impl Trie {
    /// Create an empty trie
    pub fn new() -> Self {
        Trie { root: None }
    }

    /// Borrow the root node, if the trie is non-empty
    pub fn root(&self) -> Option<&Arc<TrieNode>> {
        self.root.as_ref()
    }

    /// Check if the trie holds no keys
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Check if two handles share the same root allocation
    pub fn ptr_eq(&self, other: &Trie) -> bool {
        match (&self.root, &other.root) {
            (None, None) => true,
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Get the value stored under `key` as `T`
    ///
    /// Returns `None` if the key is absent, if it only names a prefix of
    /// longer keys, or if its value was stored with a type other than `T`.
    pub fn get<T: Any>(&self, key: impl AsRef<[u8]>) -> Option<&T> {
        self.find(key.as_ref())?.value::<T>()
    }

    /// Check if `key` holds a value of any type
    pub fn contains_key(&self, key: impl AsRef<[u8]>) -> bool {
        self.find(key.as_ref()).map_or(false, TrieNode::is_value_node)
    }

    /// Return a new trie in which `key` maps to `value`
    ///
    /// Any value previously stored under `key` is replaced, whatever its
    /// type. Children of the key's node are kept.
    pub fn put<T: Any + Send + Sync>(&self, key: impl AsRef<[u8]>, value: T) -> Trie {
        let key = key.as_ref();
        let path = self.walk(key);
        let cloned = path.len();

        // Build the new path bottom-up, cloning existing nodes and creating
        // fresh ones past the end of the existing path.
        let mut node = match path.get(key.len()) {
            Some(existing) => TrieNode::clone(existing).with_value(Value::new(value)),
            None => TrieNode::leaf(Value::new(value)),
        };
        for (depth, &byte) in key.iter().enumerate().rev() {
            let mut parent = match path.get(depth) {
                Some(existing) => TrieNode::clone(existing),
                None => TrieNode::branch(),
            };
            parent.insert_child(byte, Arc::new(node));
            node = parent;
        }

        debug!(
            key_len = key.len(),
            cloned,
            created = key.len() + 1 - cloned,
            "put"
        );
        Trie {
            root: Some(Arc::new(node)),
        }
    }

    /// Return a new trie without `key`
    ///
    /// Nodes left with neither a value nor children are pruned, cascading
    /// towards the root. If `key` holds no value the returned trie shares the
    /// receiver's root.
    pub fn remove(&self, key: impl AsRef<[u8]>) -> Trie {
        let key = key.as_ref();
        let path = self.walk(key);

        let target = match path.get(key.len()) {
            Some(node) if node.is_value_node() => node,
            _ => {
                trace!(key_len = key.len(), "remove: key not present");
                return self.clone();
            }
        };

        let mut pruned = 0;
        let mut child = Some(TrieNode::clone(target).into_branch()).filter(|n| !n.is_dead());
        for (depth, &byte) in key.iter().enumerate().rev() {
            let mut parent = TrieNode::clone(&path[depth]);
            match child {
                Some(node) => parent.insert_child(byte, Arc::new(node)),
                None => {
                    parent.remove_child(byte);
                    pruned += 1;
                }
            }
            child = Some(parent).filter(|n| !n.is_dead());
        }
        if child.is_none() {
            pruned += 1;
        }

        debug!(key_len = key.len(), pruned, "remove");
        Trie {
            root: child.map(Arc::new),
        }
    }

    /// Follow `key` from the root without cloning
    fn find(&self, key: &[u8]) -> Option<&TrieNode> {
        let mut node = self.root.as_deref()?;
        for byte in key {
            node = node.child(*byte)?;
        }
        Some(node)
    }

    /// Record the existing nodes along `key`, starting at the root
    ///
    /// Entry `i` is the node reached after consuming `i` bytes. The walk stops
    /// at the first missing child, so a path of length `key.len() + 1` means
    /// the key's node exists.
    fn walk(&self, key: &[u8]) -> Vec<&Arc<TrieNode>> {
        let mut path = Vec::with_capacity(key.len() + 1);
        let mut current = self.root.as_ref();
        let mut bytes = key.iter();
        while let Some(node) = current {
            path.push(node);
            current = bytes.next().and_then(|byte| node.child(*byte));
        }
        trace!(key_len = key.len(), depth = path.len(), "walk");
        path
    }
}
