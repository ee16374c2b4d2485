//! Property-based tests for the persistent trie.
//!
//! Each case replays a random sequence of puts and removes against both the
//! trie and a `HashMap` model, keeping every intermediate version alive.

use cowtrie::Trie;
use proptest::prelude::*;
use std::collections::HashMap;

#[derive(Clone, Debug)]
enum Op {
    Put(String, u32),
    Remove(String),
}

// Short keys over a tiny alphabet so prefixes and collisions are common
fn key_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[ab]{0,4}").unwrap()
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (key_strategy(), any::<u32>()).prop_map(|(k, v)| Op::Put(k, v)),
        key_strategy().prop_map(Op::Remove),
    ]
}

fn all_keys() -> Vec<String> {
    let mut keys = vec![String::new()];
    let mut frontier = vec![String::new()];
    for _ in 0..4 {
        let mut next = Vec::new();
        for prefix in &frontier {
            for c in ['a', 'b'] {
                next.push(format!("{}{}", prefix, c));
            }
        }
        keys.extend(next.iter().cloned());
        frontier = next;
    }
    keys
}

fn assert_matches_model(trie: &Trie, model: &HashMap<String, u32>) -> Result<(), TestCaseError> {
    for key in all_keys() {
        prop_assert_eq!(trie.get::<u32>(&key), model.get(&key), "key {:?}", key);
    }
    prop_assert_eq!(trie.is_empty(), model.is_empty());
    Ok(())
}

proptest! {
    // Property: every version agrees with its model, even after later versions were derived
    #[test]
    fn prop_versions_match_model(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let mut versions: Vec<(Trie, HashMap<String, u32>)> = vec![(Trie::new(), HashMap::new())];
        for op in ops {
            let (trie, mut model) = versions.last().unwrap().clone();
            let next = match op {
                Op::Put(key, value) => {
                    model.insert(key.clone(), value);
                    trie.put(&key, value)
                }
                Op::Remove(key) => {
                    model.remove(&key);
                    trie.remove(&key)
                }
            };
            versions.push((next, model));
        }

        for (trie, model) in &versions {
            assert_matches_model(trie, model)?;
        }
    }

    // Property: removing an absent key shares the original root
    #[test]
    fn prop_remove_absent_is_noop(
        ops in prop::collection::vec(op_strategy(), 0..20),
        key in key_strategy(),
    ) {
        let mut trie = Trie::new();
        for op in ops {
            trie = match op {
                Op::Put(k, v) => trie.put(&k, v),
                Op::Remove(k) => trie.remove(&k),
            };
        }
        let removed = trie.remove(&key);
        if trie.get::<u32>(&key).is_none() {
            prop_assert!(removed.ptr_eq(&trie));
        } else {
            prop_assert!(removed.get::<u32>(&key).is_none());
        }
    }

    // Property: put then remove of a fresh key restores the observable keyspace
    #[test]
    fn prop_put_remove_restores(
        ops in prop::collection::vec(op_strategy(), 0..20),
        key in key_strategy(),
        value in any::<u32>(),
    ) {
        let mut trie = Trie::new();
        let mut model = HashMap::new();
        for op in ops {
            match op {
                Op::Put(k, v) => {
                    trie = trie.put(&k, v);
                    model.insert(k, v);
                }
                Op::Remove(k) => {
                    trie = trie.remove(&k);
                    model.remove(&k);
                }
            }
        }
        prop_assume!(!model.contains_key(&key));

        let restored = trie.put(&key, value).remove(&key);
        assert_matches_model(&restored, &model)?;
    }
}
