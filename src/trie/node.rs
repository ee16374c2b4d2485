//! Trie node types

use std::any::{type_name, Any};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Child links of a node, one per key byte
pub type Children = BTreeMap<u8, Arc<TrieNode>>;

/// A type-erased value stored in a trie node
///
/// Cloning a `Value` copies the handle, not the value itself, so a node
/// cloned onto a new path keeps pointing at the same allocation.
#[derive(Clone)]
pub struct Value {
    inner: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl Value {
    /// Move a value into a new erased handle
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Value {
            inner: Arc::new(value),
            type_name: type_name::<T>(),
        }
    }

    /// Borrow the value as `T`, or `None` if it was stored as another type
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    /// Check whether the stored value has type `T`
    pub fn is<T: Any>(&self) -> bool {
        self.inner.is::<T>()
    }

    /// Name of the stored type, for diagnostics only
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Value<{}>", self.type_name)
    }
}

/// A node in the trie
///
/// A node is either a plain branch or carries a value. Both variants own a
/// map of shared child links. Once a node has been linked into a published
/// [`Trie`](super::Trie) it sits behind an `Arc` and is never written again;
/// writers clone it first.
#[derive(Clone, Debug)]
pub enum TrieNode {
    /// A node that only exists as a prefix of longer keys
    Branch {
        /// Children indexed by the next key byte
        children: Children,
    },
    /// A node terminating a stored key
    Value {
        /// Children indexed by the next key byte
        children: Children,
        /// The value stored for this exact key
        value: Value,
    },
}

impl TrieNode {
    /// Create a branch node with no children
    pub fn branch() -> Self {
        TrieNode::Branch {
            children: Children::new(),
        }
    }

    /// Create a value node with no children
    pub fn leaf(value: Value) -> Self {
        TrieNode::Value {
            children: Children::new(),
            value,
        }
    }

    /// Borrow this node's child links
    pub fn children(&self) -> &Children {
        match self {
            TrieNode::Branch { children } | TrieNode::Value { children, .. } => children,
        }
    }

    fn children_mut(&mut self) -> &mut Children {
        match self {
            TrieNode::Branch { children } | TrieNode::Value { children, .. } => children,
        }
    }

    /// Check if a child exists for `byte`
    pub fn has_child(&self, byte: u8) -> bool {
        self.children().contains_key(&byte)
    }

    /// Get the shared child for `byte`
    pub fn child(&self, byte: u8) -> Option<&Arc<TrieNode>> {
        self.children().get(&byte)
    }

    /// Attach `node` under `byte`, replacing any previous child
    ///
    /// Only callable on a node the caller owns outright, i.e. one that has
    /// not been wrapped in an `Arc` and published yet.
    pub fn insert_child(&mut self, byte: u8, node: Arc<TrieNode>) {
        self.children_mut().insert(byte, node);
    }

    /// Detach the child under `byte`, returning it if present
    pub fn remove_child(&mut self, byte: u8) -> Option<Arc<TrieNode>> {
        self.children_mut().remove(&byte)
    }

    /// Check if this node carries a value
    pub fn is_value_node(&self) -> bool {
        matches!(self, TrieNode::Value { .. })
    }

    /// Check if this node has any children
    pub fn has_children(&self) -> bool {
        !self.children().is_empty()
    }

    /// Get the erased value handle, if any
    pub fn raw_value(&self) -> Option<&Value> {
        match self {
            TrieNode::Branch { .. } => None,
            TrieNode::Value { value, .. } => Some(value),
        }
    }

    /// Get the value as `T`
    ///
    /// Returns `None` for branch nodes and for values of a different type.
    pub fn value<T: Any>(&self) -> Option<&T> {
        self.raw_value().and_then(Value::downcast_ref::<T>)
    }

    /// Turn this node into a value node holding `value`, keeping its children
    pub fn with_value(self, value: Value) -> Self {
        TrieNode::Value {
            children: self.into_children(),
            value,
        }
    }

    /// Drop this node's value, keeping its children
    pub fn into_branch(self) -> Self {
        TrieNode::Branch {
            children: self.into_children(),
        }
    }

    fn into_children(mut self) -> Children {
        std::mem::take(self.children_mut())
    }

    /// Check if this node holds neither a value nor children
    pub(crate) fn is_dead(&self) -> bool {
        !self.is_value_node() && !self.has_children()
    }
}

impl Default for TrieNode {
    fn default() -> Self {
        TrieNode::branch()
    }
}

// Dropping a long chain through the derived glue would recurse once per
// level. Unlink children onto a heap stack instead; nodes still shared with
// another version are left to their remaining owners.
impl Drop for TrieNode {
    fn drop(&mut self) {
        let mut stack: Vec<Arc<TrieNode>> =
            std::mem::take(self.children_mut()).into_values().collect();
        while let Some(node) = stack.pop() {
            if let Some(mut node) = Arc::into_inner(node) {
                stack.extend(std::mem::take(node.children_mut()).into_values());
            }
        }
    }
}
