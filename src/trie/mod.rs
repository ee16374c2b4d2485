//! Persistent trie with structural sharing
//!
//! This implements an immutable prefix tree where:
//! - Each key byte is one level of the tree
//! - Every mutation copies only the nodes on the key's path
//! - Unchanged subtrees are shared by reference across versions

mod node;
mod tree;

pub use node::{Children, TrieNode, Value};
pub use tree::Trie;
