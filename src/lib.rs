//! # cowtrie
//!
//! A persistent, copy-on-write trie mapping byte keys to values of any type.
//!
//! Every `put` and `remove` returns a new [`Trie`] and leaves earlier
//! versions fully usable. Versions share every subtree the mutation did not
//! touch, so keeping many versions alive costs only the copied paths.
//!
//! ## Core Concepts
//!
//! - **Trie**: an immutable handle on a shared root node
//! - **Nodes**: plain branches, or value nodes holding one type-erased value
//! - **Typed reads**: `get::<T>` returns `None` when the stored type differs
//! - **Replay sessions**: drive many versions from a JSON Lines script
//!
//! ## Example
//!
//! ```
//! use cowtrie::Trie;
//!
//! let v1 = Trie::new().put("ab", 1u32);
//! let v2 = v1.put("a", String::from("prefix"));
//!
//! assert_eq!(v1.get::<String>("a"), None);
//! assert_eq!(v2.get::<u32>("ab"), Some(&1));
//! assert!(v2.remove("ab").remove("a").is_empty());
//! ```

pub mod script;
pub mod trie;

mod error;

pub use error::{Error, Result};
pub use script::{Command, Outcome, Session, TypedValue, ValueType};
pub use trie::{Trie, TrieNode, Value};
