//! Replay sessions over trie versions
//!
//! A session keeps every version it has produced. Version 0 is the empty
//! trie; each `put` or `remove` derives a new version from any earlier one,
//! so a script can branch history freely and read old versions afterwards.
//!
//! Scripts are JSON Lines, one [`Command`] per line:
//!
//! ```text
//! # comments and blank lines are skipped
//! {"op":"put","from":0,"key":"ab","value":{"u32":1}}
//! {"op":"remove","from":1,"key":"ab"}
//! {"op":"get","at":1,"key":"ab","type":"u32"}
//! ```

use crate::trie::Trie;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::io::BufRead;
use tracing::debug;

/// A value carried by a script
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypedValue {
    U32(u32),
    U64(u64),
    String(String),
}

/// The type a `get` reads a value back as
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    U32,
    U64,
    String,
}

/// One scripted operation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Command {
    /// Derive a version with `key` set to `value`
    Put {
        from: usize,
        key: String,
        value: TypedValue,
    },
    /// Derive a version without `key`
    Remove { from: usize, key: String },
    /// Read `key` from a version as the given type
    Get {
        at: usize,
        key: String,
        #[serde(rename = "type")]
        value_type: ValueType,
    },
}

/// Result of applying one command
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Outcome {
    Put {
        from: usize,
        version: usize,
    },
    Remove {
        from: usize,
        version: usize,
        /// False when the key held no value and the version shares its source's root
        changed: bool,
    },
    Get {
        at: usize,
        key: String,
        value: Option<TypedValue>,
    },
}

/// An append-only list of trie versions
#[derive(Debug)]
pub struct Session {
    versions: Vec<Trie>,
}

impl Session {
    /// Create a session holding only the empty version 0
    pub fn new() -> Self {
        Session {
            versions: vec![Trie::new()],
        }
    }

    /// Number of versions, including version 0
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.versions.len()
    }

    /// Get a version by id
    pub fn version(&self, id: usize) -> Result<&Trie> {
        self.versions.get(id).ok_or(Error::UnknownVersion(id))
    }

    /// Apply one command, recording any new version
    pub fn apply(&mut self, command: Command) -> Result<Outcome> {
        debug!(?command, "apply");
        match command {
            Command::Put { from, key, value } => {
                let source = self.version(from)?;
                let next = match value {
                    TypedValue::U32(v) => source.put(&key, v),
                    TypedValue::U64(v) => source.put(&key, v),
                    TypedValue::String(v) => source.put(&key, v),
                };
                let version = self.push(next);
                Ok(Outcome::Put { from, version })
            }
            Command::Remove { from, key } => {
                let source = self.version(from)?;
                let next = source.remove(&key);
                let changed = !next.ptr_eq(source);
                let version = self.push(next);
                Ok(Outcome::Remove {
                    from,
                    version,
                    changed,
                })
            }
            Command::Get {
                at,
                key,
                value_type,
            } => {
                let trie = self.version(at)?;
                let value = match value_type {
                    ValueType::U32 => trie.get::<u32>(&key).copied().map(TypedValue::U32),
                    ValueType::U64 => trie.get::<u64>(&key).copied().map(TypedValue::U64),
                    ValueType::String => trie.get::<String>(&key).cloned().map(TypedValue::String),
                };
                Ok(Outcome::Get { at, key, value })
            }
        }
    }

    /// Replay a JSON Lines script, returning one outcome per command
    ///
    /// Blank lines and lines starting with `#` are skipped.
    pub fn run<R: BufRead>(&mut self, reader: R) -> Result<Vec<Outcome>> {
        let mut outcomes = Vec::new();
        self.run_with(reader, |outcome| {
            outcomes.push(outcome);
            Ok::<(), Error>(())
        })?;
        Ok(outcomes)
    }

    /// Replay a JSON Lines script, handing each outcome to `on_outcome` as
    /// soon as its command has been applied
    ///
    /// Returns the number of commands applied. On error, outcomes of the
    /// earlier lines have already been delivered.
    pub fn run_with<R, F, E>(
        &mut self,
        reader: R,
        mut on_outcome: F,
    ) -> std::result::Result<usize, E>
    where
        R: BufRead,
        F: FnMut(Outcome) -> std::result::Result<(), E>,
        E: From<Error>,
    {
        let mut applied = 0;
        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(Error::from)?;
            if let Some(command) = parse_line(index + 1, &line)? {
                on_outcome(self.apply(command)?)?;
                applied += 1;
            }
        }
        Ok(applied)
    }

    fn push(&mut self, trie: Trie) -> usize {
        self.versions.push(trie);
        self.versions.len() - 1
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_line(line: usize, text: &str) -> Result<Option<Command>> {
    let text = text.trim();
    if text.is_empty() || text.starts_with('#') {
        return Ok(None);
    }
    serde_json::from_str(text)
        .map(Some)
        .map_err(|e| Error::Parse {
            line,
            message: e.to_string(),
        })
}
